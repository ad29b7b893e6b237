use chrono::{DateTime, Duration, Months, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Category, FinanceEntry};

// ---------------------------------------------------------------------------
// TimeWindow
// ---------------------------------------------------------------------------

/// Dashboard time-window selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    All,
    Today,
    Week,
    Month,
    Year,
}

impl TimeWindow {
    pub fn from_api_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "today" => TimeWindow::Today,
            "week" => TimeWindow::Week,
            "month" => TimeWindow::Month,
            "year" => TimeWindow::Year,
            _ => TimeWindow::All,
        }
    }

    /// Inclusive lower bound of the window, or None for no filter.
    /// The upper bound is always `now`.
    pub fn lower_bound(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Today => Some(now.date_naive().and_time(NaiveTime::MIN).and_utc()),
            TimeWindow::Week => Some(now - Duration::days(7)),
            TimeWindow::Month => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(now - Duration::days(30)),
            ),
            TimeWindow::Year => Some(
                now.checked_sub_months(Months::new(12))
                    .unwrap_or(now - Duration::days(365)),
            ),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::All => write!(f, "all"),
            TimeWindow::Today => write!(f, "today"),
            TimeWindow::Week => write!(f, "week"),
            TimeWindow::Month => write!(f, "month"),
            TimeWindow::Year => write!(f, "year"),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Dashboard summary card totals.
///
/// `total_profit` sums the three sale channels only; extra expenses are
/// tracked separately (as a positive spend magnitude) and not subtracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTotals {
    pub total_b2b: Decimal,
    pub total_b2c_algeria: Decimal,
    pub total_b2c_korea: Decimal,
    pub total_extra_expenses: Decimal,
    pub total_profit: Decimal,
    pub count: i64,
}

impl SummaryTotals {
    fn zero() -> Self {
        Self {
            total_b2b: Decimal::ZERO,
            total_b2c_algeria: Decimal::ZERO,
            total_b2c_korea: Decimal::ZERO,
            total_extra_expenses: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            count: 0,
        }
    }
}

/// Fold net profit per category over the entries whose `created_at` falls
/// inside the window. Pure reduction over an in-memory list; `now` is a
/// parameter so callers and tests agree on the clock.
pub fn aggregate(entries: &[FinanceEntry], window: TimeWindow, now: DateTime<Utc>) -> SummaryTotals {
    let since = window.lower_bound(now);
    let mut totals = SummaryTotals::zero();

    for entry in entries {
        if let Some(since) = since {
            if entry.created_at < since {
                continue;
            }
        }

        match Category::from_api_str(&entry.category) {
            Some(Category::B2b) => totals.total_b2b += entry.net_profit,
            Some(Category::B2cAlgeria) => totals.total_b2c_algeria += entry.net_profit,
            Some(Category::B2cKorea) => totals.total_b2c_korea += entry.net_profit,
            Some(Category::ExtraExpense) => totals.total_extra_expenses += -entry.net_profit,
            // Rows with an unrecognized tag cannot be written through the
            // API; skip rather than poison the totals.
            None => continue,
        }
        totals.count += 1;
    }

    totals.total_profit = totals.total_b2b + totals.total_b2c_algeria + totals.total_b2c_korea;
    totals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn entry(category: &str, net_profit: i64, created_at: DateTime<Utc>) -> FinanceEntry {
        FinanceEntry {
            id: Uuid::new_v4(),
            category: category.into(),
            label: None,
            linked_order_id: None,
            buying_costs: Decimal::ZERO,
            papers_fees: Decimal::ZERO,
            transport_fees: Decimal::ZERO,
            auction_fees: Decimal::ZERO,
            transaction_fees: Decimal::ZERO,
            other_fees: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            amount: Decimal::ZERO,
            revenue: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            net_profit: Decimal::from(net_profit),
            created_at,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_aggregate_all_window() {
        let entries = vec![
            entry("B2B", 100, now()),
            entry("B2C_ALGERIA", -50, now()),
        ];

        let totals = aggregate(&entries, TimeWindow::All, now());
        assert_eq!(totals.total_b2b, Decimal::from(100));
        assert_eq!(totals.total_b2c_algeria, Decimal::from(-50));
        assert_eq!(totals.total_profit, Decimal::from(50));
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn test_aggregate_empty_is_zero() {
        for window in [
            TimeWindow::All,
            TimeWindow::Today,
            TimeWindow::Week,
            TimeWindow::Month,
            TimeWindow::Year,
        ] {
            let totals = aggregate(&[], window, now());
            assert_eq!(totals.total_profit, Decimal::ZERO);
            assert_eq!(totals.total_extra_expenses, Decimal::ZERO);
            assert_eq!(totals.count, 0);
        }
    }

    #[test]
    fn test_all_window_ignores_created_at() {
        let entries = vec![
            entry("B2B", 10, now() - Duration::days(4_000)),
            entry("B2B", 20, now()),
        ];

        let totals = aggregate(&entries, TimeWindow::All, now());
        assert_eq!(totals.total_b2b, Decimal::from(30));
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn test_today_window_is_utc_midnight() {
        let midnight = now().date_naive().and_time(NaiveTime::MIN).and_utc();
        let entries = vec![
            entry("B2B", 100, midnight),                        // inclusive lower bound
            entry("B2B", 40, midnight - Duration::seconds(1)),  // yesterday
        ];

        let totals = aggregate(&entries, TimeWindow::Today, now());
        assert_eq!(totals.total_b2b, Decimal::from(100));
        assert_eq!(totals.count, 1);
    }

    #[test]
    fn test_week_window() {
        let entries = vec![
            entry("B2C_KOREA", 100, now() - Duration::days(6)),
            entry("B2C_KOREA", 30, now() - Duration::days(8)),
        ];

        let totals = aggregate(&entries, TimeWindow::Week, now());
        assert_eq!(totals.total_b2c_korea, Decimal::from(100));
        assert_eq!(totals.count, 1);
    }

    #[test]
    fn test_month_window_calendar_arithmetic() {
        // now = June 15th; May 20th is inside, April 20th is not.
        let inside = Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap();
        let outside = Utc.with_ymd_and_hms(2024, 4, 20, 0, 0, 0).unwrap();
        let entries = vec![
            entry("B2B", 70, inside),
            entry("B2B", 5, outside),
        ];

        let totals = aggregate(&entries, TimeWindow::Month, now());
        assert_eq!(totals.total_b2b, Decimal::from(70));
    }

    #[test]
    fn test_extra_expenses_not_subtracted_from_profit() {
        let entries = vec![
            entry("B2B", 1_000, now()),
            entry("EXTRA_EXPENSE", -250, now()),
        ];

        let totals = aggregate(&entries, TimeWindow::All, now());
        assert_eq!(totals.total_profit, Decimal::from(1_000));
        assert_eq!(totals.total_extra_expenses, Decimal::from(250));
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn test_window_parse_lenient() {
        assert_eq!(TimeWindow::from_api_str("today"), TimeWindow::Today);
        assert_eq!(TimeWindow::from_api_str("YEAR"), TimeWindow::Year);
        assert_eq!(TimeWindow::from_api_str("fortnight"), TimeWindow::All);
        assert_eq!(TimeWindow::from_api_str(""), TimeWindow::All);
    }
}
