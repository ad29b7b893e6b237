use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::FinanceEntry;

/// True iff some entry already references the order.
///
/// The creation path checks this before accepting a new linked entry and
/// rejects the write on a match. At most one entry per order is an
/// application-level invariant, not a storage constraint.
pub fn is_financed(order_id: Uuid, entries: &[FinanceEntry]) -> bool {
    entries
        .iter()
        .any(|e| e.linked_order_id == Some(order_id))
}

/// Net profit of the entry linked to the order, if one exists.
pub fn profit_for(order_id: Uuid, entries: &[FinanceEntry]) -> Option<Decimal> {
    entries
        .iter()
        .find(|e| e.linked_order_id == Some(order_id))
        .map(|e| e.net_profit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(linked_order_id: Option<Uuid>, net_profit: i64) -> FinanceEntry {
        FinanceEntry {
            id: Uuid::new_v4(),
            category: "B2B".into(),
            label: None,
            linked_order_id,
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
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_financed() {
        let order_id = Uuid::new_v4();
        let entries = vec![entry(None, 10), entry(Some(order_id), 250)];

        assert!(is_financed(order_id, &entries));
        assert!(!is_financed(Uuid::new_v4(), &entries));
    }

    #[test]
    fn test_profit_for_matching_order() {
        let order_id = Uuid::new_v4();
        let entries = vec![entry(Some(order_id), 250), entry(None, 10)];

        assert_eq!(profit_for(order_id, &entries), Some(Decimal::from(250)));
        assert_eq!(profit_for(Uuid::new_v4(), &entries), None);
    }

    #[test]
    fn test_unlinked_entries_never_match() {
        let entries = vec![entry(None, 10), entry(None, 20)];
        assert!(!is_financed(Uuid::new_v4(), &entries));
    }
}
