//! Request and response DTOs for the HTTP API

pub mod balance;
pub mod common;
pub mod currency;
pub mod rate_plan;

pub use balance::{BalanceQuery, BalanceSnapshotResponse, PrepaidBalanceDto};
pub use common::ApiResponse;
pub use currency::{AddCreditProductResponse, SupportedCurrencyResponse};
pub use rate_plan::{PurchasedPlanResponse, RatePlanResponse};
