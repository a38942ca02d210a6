//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use chrono::NaiveDate;

use crate::core::connect::DemoConnector;
use crate::core::ledger::Seed;
use crate::core::state::App;

/// Fixed date stamped on exchanges made through [`test_app`].
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap_or_default()
}

/// Creates a test App on the default seed with a pinned clock.
pub fn test_app() -> App {
    let mut app = App::new(Seed::default(), Box::new(DemoConnector));
    app.today = test_today;
    app
}
