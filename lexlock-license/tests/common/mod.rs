//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use lexlock_license::License;

/// A date that is safe to unwrap in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// The license from the documented issuance scenario.
pub fn scenario_license() -> License {
    License::new("ABC-123")
        .with_expiry(date(2030, 1, 1))
        .with_feature("pro", true)
}

/// A license exercising every field.
pub fn full_license() -> License {
    License::new("FULL-001")
        .with_issued(date(2026, 5, 1))
        .with_expiry(date(2030, 1, 1))
        .with_feature("pro", true)
        .with_feature("beta", false)
        .with_feature("seats", 25i64)
        .with_custom("customer", "Acme Corp")
        .with_custom("region", "eu-west")
}
