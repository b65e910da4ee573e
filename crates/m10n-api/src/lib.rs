//! API layer for m10n-portal
//!
//! HTTP handlers and DTOs for prepaid balances (developer and team),
//! purchasable and purchased rate plans, and supported currencies.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::ApiResponse;

// Re-export handler configuration functions
pub use handlers::{
    configure_balances, configure_currencies, configure_rate_plans, configure_teams,
};
