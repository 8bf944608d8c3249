//! Budget-vs-actual analysis over a trip's duration.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use travelfund_core::{DomainError, DomainResult};

use crate::fund::Fund;
use crate::money::percent;

/// Trip parameters. The three values are only ever set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSettings {
    start_date: NaiveDate,
    duration_days: u32,
    total_budget: Decimal,
}

impl TripSettings {
    pub fn new(
        start_date: NaiveDate,
        duration_days: u32,
        total_budget: Decimal,
    ) -> DomainResult<Self> {
        if duration_days == 0 {
            return Err(DomainError::validation("trip duration must be at least one day"));
        }
        if total_budget < Decimal::ZERO {
            return Err(DomainError::validation("total budget cannot be negative"));
        }
        Ok(Self {
            start_date,
            duration_days,
            total_budget,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn total_budget(&self) -> Decimal {
        self.total_budget
    }

    /// Day after the last trip day.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(u64::from(self.duration_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Trip days counted so far, inclusive of `today`, clamped to `[0, duration]`.
    pub fn days_elapsed(&self, today: NaiveDate) -> u32 {
        let elapsed = (today - self.start_date)
            .num_days()
            .saturating_add(1)
            .clamp(0, i64::from(self.duration_days));
        u32::try_from(elapsed).unwrap_or(self.duration_days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    OnTrack,
    Under,
    Over,
}

impl BudgetStatus {
    pub fn label(self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::Under => "Under Budget",
            BudgetStatus::Over => "Over Budget",
        }
    }
}

/// Snapshot of budget health on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysis {
    pub days_elapsed: u32,
    pub days_remaining: u32,
    pub total_spent: Decimal,
    pub average_daily_budget: Decimal,
    pub actual_daily_spending: Decimal,
    pub expected_spending_to_date: Decimal,
    /// Positive when under budget, negative when over.
    pub budget_variance: Decimal,
    pub budget_usage_percent: Decimal,
    pub days_elapsed_percent: Decimal,
    /// Current burn rate extrapolated to the whole trip.
    pub projected_total: Decimal,
    pub remaining_budget: Decimal,
    /// Daily spend that lands exactly on budget.
    pub remaining_per_day: Decimal,
    pub status: BudgetStatus,
    pub trip_end: NaiveDate,
}

/// Share of a day's budget that still counts as "on track".
fn on_track_tolerance() -> Decimal {
    Decimal::new(1, 1)
}

/// Analyze spending against the trip budget as of `today`.
pub fn analyze(trip: &TripSettings, total_spent: Decimal, today: NaiveDate) -> BudgetAnalysis {
    let duration = Decimal::from(trip.duration_days);
    let days_elapsed = trip.days_elapsed(today);
    let days_remaining = trip.duration_days.saturating_sub(days_elapsed);
    let elapsed = Decimal::from(days_elapsed);
    let budget = trip.total_budget;

    let average_daily_budget = budget / duration;
    let actual_daily_spending = if days_elapsed > 0 {
        total_spent / elapsed
    } else {
        Decimal::ZERO
    };

    let expected_spending_to_date = average_daily_budget.saturating_mul(elapsed);
    let budget_variance = expected_spending_to_date.saturating_sub(total_spent);
    let budget_usage_percent = percent(total_spent, budget);
    let days_elapsed_percent = percent(elapsed, duration);

    let projected_total = actual_daily_spending.saturating_mul(duration);
    let remaining_budget = budget.saturating_sub(total_spent);
    let remaining_per_day = if days_remaining > 0 {
        remaining_budget / Decimal::from(days_remaining)
    } else {
        Decimal::ZERO
    };

    let status = if budget_variance.abs() < average_daily_budget * on_track_tolerance() {
        BudgetStatus::OnTrack
    } else if budget_variance > Decimal::ZERO {
        BudgetStatus::Under
    } else {
        BudgetStatus::Over
    };

    BudgetAnalysis {
        days_elapsed,
        days_remaining,
        total_spent,
        average_daily_budget,
        actual_daily_spending,
        expected_spending_to_date,
        budget_variance,
        budget_usage_percent,
        days_elapsed_percent,
        projected_total,
        remaining_budget,
        remaining_per_day,
        status,
        trip_end: trip.end_date(),
    }
}

impl Fund {
    /// Budget analysis for the configured trip, if any.
    pub fn budget_analysis(&self, today: NaiveDate) -> Option<BudgetAnalysis> {
        self.trip().map(|trip| analyze(trip, self.total_spent(), today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ten_day_trip() -> TripSettings {
        TripSettings::new(date(2026, 3, 1), 10, dec!(1000)).unwrap()
    }

    #[test]
    fn first_day_under_budget() {
        let a = analyze(&ten_day_trip(), dec!(50), date(2026, 3, 1));

        assert_eq!(a.days_elapsed, 1);
        assert_eq!(a.days_remaining, 9);
        assert_eq!(a.average_daily_budget, dec!(100));
        assert_eq!(a.actual_daily_spending, dec!(50));
        assert_eq!(a.expected_spending_to_date, dec!(100));
        assert_eq!(a.budget_variance, dec!(50));
        assert_eq!(a.projected_total, dec!(500));
        assert_eq!(a.remaining_budget, dec!(950));
        assert_eq!(a.remaining_per_day, dec!(950) / dec!(9));
        assert_eq!(a.budget_usage_percent, dec!(5));
        assert_eq!(a.days_elapsed_percent, dec!(10));
        assert_eq!(a.status, BudgetStatus::Under);
        assert_eq!(a.trip_end, date(2026, 3, 11));
    }

    #[test]
    fn variance_inside_tolerance_band_is_on_track() {
        // expected 300, spent 295: |5| < 100 * 0.1
        let a = analyze(&ten_day_trip(), dec!(295), date(2026, 3, 3));
        assert_eq!(a.status, BudgetStatus::OnTrack);

        // |10| is not strictly below the band
        let a = analyze(&ten_day_trip(), dec!(310), date(2026, 3, 3));
        assert_eq!(a.status, BudgetStatus::Over);
    }

    #[test]
    fn before_trip_start_nothing_has_elapsed() {
        let a = analyze(&ten_day_trip(), dec!(80), date(2026, 2, 20));

        assert_eq!(a.days_elapsed, 0);
        assert_eq!(a.days_remaining, 10);
        assert_eq!(a.actual_daily_spending, Decimal::ZERO);
        assert_eq!(a.projected_total, Decimal::ZERO);
        assert_eq!(a.budget_variance, dec!(-80));
        assert_eq!(a.remaining_per_day, dec!(92));
        assert_eq!(a.status, BudgetStatus::Over);
    }

    #[test]
    fn after_trip_end_elapsed_is_clamped() {
        let a = analyze(&ten_day_trip(), dec!(1000), date(2026, 4, 30));

        assert_eq!(a.days_elapsed, 10);
        assert_eq!(a.days_remaining, 0);
        assert_eq!(a.remaining_per_day, Decimal::ZERO);
        assert_eq!(a.projected_total, dec!(1000));
        assert_eq!(a.status, BudgetStatus::OnTrack);
    }

    #[test]
    fn zero_budget_reports_zero_usage() {
        let trip = TripSettings::new(date(2026, 3, 1), 5, Decimal::ZERO).unwrap();
        let a = analyze(&trip, dec!(20), date(2026, 3, 2));
        assert_eq!(a.budget_usage_percent, Decimal::ZERO);
        assert_eq!(a.status, BudgetStatus::Over);
    }

    #[test]
    fn tiny_budget_with_large_spend_saturates() {
        let trip = TripSettings::new(date(2026, 3, 1), 10, Decimal::new(1, 20)).unwrap();
        let a = analyze(&trip, dec!(10000000000), date(2026, 3, 1));

        assert_eq!(a.budget_usage_percent, Decimal::MAX);
        assert_eq!(a.projected_total, dec!(100000000000));
        assert!(a.remaining_budget < Decimal::ZERO);
        assert_eq!(a.status, BudgetStatus::Over);
    }

    #[test]
    fn maximal_spend_does_not_overflow_projection() {
        let a = analyze(&ten_day_trip(), Decimal::MAX, date(2026, 3, 1));
        assert_eq!(a.projected_total, Decimal::MAX);
        assert_eq!(a.status, BudgetStatus::Over);
    }

    #[test]
    fn trip_settings_reject_invalid_values() {
        assert!(matches!(
            TripSettings::new(date(2026, 3, 1), 0, dec!(100)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            TripSettings::new(date(2026, 3, 1), 3, dec!(-1)),
            Err(DomainError::Validation(_))
        ));
    }
}
