//! HTTP request handlers

pub mod balance;
pub mod currency;
pub mod rate_plan;
pub mod team;

pub use balance::configure as configure_balances;
pub use currency::configure as configure_currencies;
pub use rate_plan::configure as configure_rate_plans;
pub use team::configure as configure_teams;
