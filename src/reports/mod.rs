//! Reporting engine.
//!
//! Every function in this module is a pure computation over rows the store
//! has already fetched. Keeping the aggregation free of database access means
//! the numbers can be tested with plain fixture vectors, and a report can
//! never observe a partially-written row beyond what the store itself allows.
//!
//! Currency math uses [`rust_decimal::Decimal`] end to end; percentages are
//! rounded to two decimal places with round-half-up, and every rate or
//! average over an empty set is defined as zero.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

pub mod dashboard;
pub mod government;
pub mod secretariat;

pub use dashboard::{
    Alert, Dashboard, ProjectDashboard, ResourceDashboard, build_dashboard, project_dashboard,
    resource_dashboard,
};
pub use government::{GovernmentSummary, government_summary};
pub use secretariat::{SecretariatReport, secretariat_reports};

/// Optional inclusive date window. Each bound applies independently.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    /// Like [`Self::contains`], for rows whose date column is optional.
    /// A missing date only passes when the window is unbounded.
    #[must_use]
    pub fn contains_opt(&self, date: Option<NaiveDate>) -> bool {
        match date {
            Some(d) => self.contains(d),
            None => self.is_unbounded(),
        }
    }
}

/// Round a percentage or average to two decimal places, half-up.
#[must_use]
pub fn round_rate(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// `numerator / denominator * 100`, rounded to two decimals; 0 when the
/// denominator is zero.
#[must_use]
pub fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let ratio = Decimal::from(numerator as u64) * Decimal::from(100_u64)
        / Decimal::from(denominator as u64);
    round_rate(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = DateRange::new(Some(date(2026, 1, 1)), Some(date(2026, 1, 31)));
        assert!(range.contains(date(2026, 1, 1)));
        assert!(range.contains(date(2026, 1, 31)));
        assert!(!range.contains(date(2025, 12, 31)));
        assert!(!range.contains(date(2026, 2, 1)));
    }

    #[test]
    fn test_bounds_apply_independently() {
        let from = DateRange::new(Some(date(2026, 1, 1)), None);
        assert!(from.contains(date(2030, 1, 1)));
        assert!(!from.contains(date(2025, 1, 1)));

        let until = DateRange::new(None, Some(date(2026, 1, 1)));
        assert!(until.contains(date(2020, 1, 1)));
        assert!(!until.contains(date(2026, 1, 2)));
    }

    #[test]
    fn test_missing_date_only_passes_unbounded() {
        assert!(DateRange::default().contains_opt(None));
        let bounded = DateRange::new(Some(date(2026, 1, 1)), None);
        assert!(!bounded.contains_opt(None));
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1/3 * 100 = 33.333... -> 33.33; 1/8 * 100 = 12.5 -> 12.5
        assert!((percentage(1, 3) - 33.33).abs() < f64::EPSILON);
        // 5/800 * 100 = 0.625 -> rounds up to 0.63
        assert!((percentage(5, 800) - 0.63).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentage_of_nothing_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
    }
}
