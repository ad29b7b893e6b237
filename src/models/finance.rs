use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the finance_entries table.
///
/// `revenue`, `total_cost` and `net_profit` are a cache of the calculator
/// output over the raw fee columns — every edit rewrites raw and derived
/// columns in the same UPDATE, so a stored entry always matches a re-run
/// of the calculator for its category.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FinanceEntry {
    pub id: Uuid,
    pub category: String,
    pub label: Option<String>,
    pub linked_order_id: Option<Uuid>,

    pub buying_costs: Decimal,
    pub papers_fees: Decimal,
    pub transport_fees: Decimal,
    pub auction_fees: Decimal,
    pub transaction_fees: Decimal,
    pub other_fees: Decimal,
    pub selling_price: Decimal,
    pub amount: Decimal,

    pub revenue: Decimal,
    pub total_cost: Decimal,
    pub net_profit: Decimal,

    pub created_at: DateTime<Utc>,
}

/// Raw fee inputs as submitted by the back-office forms.
///
/// Absent fields deserialize to zero, matching how blank form fields are
/// submitted; a malformed value is rejected at the JSON boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeInputs {
    pub buying_costs: Decimal,
    pub papers_fees: Decimal,
    pub transport_fees: Decimal,
    pub auction_fees: Decimal,
    pub transaction_fees: Decimal,
    pub other_fees: Decimal,
    pub selling_price: Decimal,
    pub amount: Decimal,
}
