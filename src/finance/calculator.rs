use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, FeeInputs};

/// Derived financial outcome for one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Financials {
    pub revenue: Decimal,
    pub total_cost: Decimal,
    pub net_profit: Decimal,
}

/// Compute the derived financials for one entry.
///
/// Total and pure: the same category and fields always produce the same
/// output, and no combination of inputs errors. Fields a category does not
/// use are ignored.
pub fn compute_financials(category: Category, fields: &FeeInputs) -> Financials {
    match category {
        Category::B2b => b2b(fields),
        Category::B2cAlgeria => b2c_algeria(fields),
        Category::B2cKorea => b2c_korea(fields),
        Category::ExtraExpense => extra_expense(fields),
    }
}

// ---------------------------------------------------------------------------
// Per-category formulas
// ---------------------------------------------------------------------------

/// B2B: a 4.4% share of the buying cost is paid through to the business
/// and counted as revenue, so it comes off the total cost.
fn b2b(fields: &FeeInputs) -> Financials {
    let revenue = fields.buying_costs * b2b_revenue_rate();
    let total_cost = fields.buying_costs
        + fields.papers_fees
        + fields.transport_fees
        + fields.other_fees
        - revenue;
    let net_profit = fields.selling_price - total_cost + revenue;

    Financials {
        revenue,
        total_cost,
        net_profit,
    }
}

/// B2C Algeria: 8.8% revenue share; transaction fees apply instead of
/// other fees.
fn b2c_algeria(fields: &FeeInputs) -> Financials {
    let revenue = fields.buying_costs * b2c_revenue_rate();
    let total_cost = fields.auction_fees
        + fields.transport_fees
        + fields.buying_costs
        + fields.transaction_fees
        + fields.papers_fees;
    let net_profit = fields.selling_price - total_cost + revenue;

    Financials {
        revenue,
        total_cost,
        net_profit,
    }
}

/// B2C Korea: 8.8% revenue share; other fees apply instead of
/// transaction fees.
fn b2c_korea(fields: &FeeInputs) -> Financials {
    let revenue = fields.buying_costs * b2c_revenue_rate();
    let total_cost = fields.auction_fees
        + fields.transport_fees
        + fields.buying_costs
        + fields.papers_fees
        + fields.other_fees;
    let net_profit = fields.selling_price - total_cost + revenue;

    Financials {
        revenue,
        total_cost,
        net_profit,
    }
}

/// Standalone expense: the amount is the whole cost, profit is its negation.
fn extra_expense(fields: &FeeInputs) -> Financials {
    Financials {
        revenue: Decimal::ZERO,
        total_cost: fields.amount,
        net_profit: -fields.amount,
    }
}

fn b2b_revenue_rate() -> Decimal {
    Decimal::new(44, 3) // 0.044
}

fn b2c_revenue_rate() -> Decimal {
    Decimal::new(88, 3) // 0.088
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> FeeInputs {
        FeeInputs::default()
    }

    #[test]
    fn test_b2c_algeria_worked_example() {
        let fields = FeeInputs {
            auction_fees: Decimal::from(1_000),
            transport_fees: Decimal::from(2_000),
            buying_costs: Decimal::from(500_000),
            transaction_fees: Decimal::from(1_500),
            papers_fees: Decimal::from(3_000),
            selling_price: Decimal::from(520_000),
            ..inputs()
        };

        let f = compute_financials(Category::B2cAlgeria, &fields);
        // 500000 × 0.088 = 44000
        assert_eq!(f.revenue, Decimal::from(44_000));
        assert_eq!(f.total_cost, Decimal::from(507_500));
        // 520000 − 507500 + 44000 = 56500
        assert_eq!(f.net_profit, Decimal::from(56_500));
    }

    #[test]
    fn test_b2b_revenue_comes_off_total_cost() {
        let fields = FeeInputs {
            buying_costs: Decimal::from(100_000),
            papers_fees: Decimal::from(2_000),
            transport_fees: Decimal::from(3_000),
            other_fees: Decimal::from(1_000),
            selling_price: Decimal::from(110_000),
            ..inputs()
        };

        let f = compute_financials(Category::B2b, &fields);
        // 100000 × 0.044 = 4400
        assert_eq!(f.revenue, Decimal::from(4_400));
        // 100000 + 2000 + 3000 + 1000 − 4400 = 101600
        assert_eq!(f.total_cost, Decimal::from(101_600));
        // 110000 − 101600 + 4400 = 12800
        assert_eq!(f.net_profit, Decimal::from(12_800));
    }

    #[test]
    fn test_b2c_korea_selling_price_only() {
        let fields = FeeInputs {
            selling_price: Decimal::from(1_000),
            ..inputs()
        };

        let f = compute_financials(Category::B2cKorea, &fields);
        assert_eq!(f.revenue, Decimal::ZERO);
        assert_eq!(f.total_cost, Decimal::ZERO);
        assert_eq!(f.net_profit, Decimal::from(1_000));
    }

    #[test]
    fn test_extra_expense_negates_amount() {
        let fields = FeeInputs {
            amount: Decimal::from(7_500),
            ..inputs()
        };

        let f = compute_financials(Category::ExtraExpense, &fields);
        assert_eq!(f.total_cost, Decimal::from(7_500));
        assert_eq!(f.net_profit, Decimal::from(-7_500));
    }

    #[test]
    fn test_deterministic_across_calls() {
        let fields = FeeInputs {
            buying_costs: Decimal::from(250_000),
            auction_fees: Decimal::from(800),
            transport_fees: Decimal::from(1_200),
            papers_fees: Decimal::from(600),
            other_fees: Decimal::from(400),
            selling_price: Decimal::from(275_000),
            ..inputs()
        };

        for category in [
            Category::B2b,
            Category::B2cAlgeria,
            Category::B2cKorea,
            Category::ExtraExpense,
        ] {
            let first = compute_financials(category, &fields);
            let second = compute_financials(category, &fields);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_all_zero_inputs() {
        for category in [
            Category::B2b,
            Category::B2cAlgeria,
            Category::B2cKorea,
            Category::ExtraExpense,
        ] {
            let f = compute_financials(category, &inputs());
            assert_eq!(f.revenue, Decimal::ZERO);
            assert_eq!(f.total_cost, Decimal::ZERO);
            assert_eq!(f.net_profit, Decimal::ZERO);
        }
    }

    #[test]
    fn test_unused_fields_ignored() {
        // Transaction fees belong to B2C Algeria only.
        let fields = FeeInputs {
            buying_costs: Decimal::from(10_000),
            transaction_fees: Decimal::from(999),
            ..inputs()
        };

        let korea = compute_financials(Category::B2cKorea, &fields);
        assert_eq!(korea.total_cost, Decimal::from(10_000));

        let algeria = compute_financials(Category::B2cAlgeria, &fields);
        assert_eq!(algeria.total_cost, Decimal::from(10_999));
    }
}
