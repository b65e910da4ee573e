//! Human-readable pricing band summaries
//!
//! Rate plans carry revenue-share and consumption pricing bands as raw
//! numeric ranges. The portal renders each band as a label like
//! "Greater than 0 up to 1000" so developers can read a fee schedule
//! without decoding range semantics.

use m10n_core::models::{ConsumptionRate, RevenueShareRate};
use rust_decimal::Decimal;

/// Label for a band's volume range
///
/// The lower bound defaults to zero; an absent upper bound means the band
/// is open-ended and the "up to" clause is omitted.
fn band_label(start: Option<Decimal>, end: Option<Decimal>) -> String {
    let start = start.unwrap_or(Decimal::ZERO).normalize();

    match end {
        Some(end) => format!("Greater than {} up to {}", start, end.normalize()),
        None => format!("Greater than {}", start),
    }
}

/// Summarize a plan's revenue-share bands, one line per band
pub fn revenue_share_summary(rates: &[RevenueShareRate]) -> Vec<String> {
    rates
        .iter()
        .map(|rate| {
            let share = rate.share_percentage.unwrap_or(Decimal::ZERO).normalize();
            format!("{}: {}%", band_label(rate.start, rate.end), share)
        })
        .collect()
}

/// Summarize a plan's consumption pricing bands, one line per band
pub fn consumption_rate_summary(rates: &[ConsumptionRate]) -> Vec<String> {
    rates
        .iter()
        .map(|rate| format!("{}: {}", band_label(rate.start, rate.end), rate.fee))
        .collect()
}
