//! m10n-portal Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the m10n-portal monetization backend. It includes:
//!
//! - Domain models (BalanceSnapshot, RatePlan, SupportedCurrency, etc.)
//! - Common traits for the billing client, cache store, and services
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
