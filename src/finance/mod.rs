pub mod aggregator;
pub mod calculator;
pub mod linker;

pub use aggregator::{aggregate, SummaryTotals, TimeWindow};
pub use calculator::{compute_financials, Financials};
pub use linker::{is_financed, profit_for};

use crate::models::Category;

#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    #[error("invalid finance category: {0}")]
    InvalidCategory(String),
}

/// Parse a category tag at the API boundary.
///
/// An unrecognized tag is rejected here so it can never reach the
/// calculator and produce undefined totals.
pub fn parse_category(s: &str) -> Result<Category, FinanceError> {
    Category::from_api_str(s).ok_or_else(|| FinanceError::InvalidCategory(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        assert_eq!(parse_category("B2B").unwrap(), Category::B2b);
        assert_eq!(parse_category("b2c_algeria").unwrap(), Category::B2cAlgeria);
        assert_eq!(parse_category("B2C_KOREA").unwrap(), Category::B2cKorea);
        assert_eq!(parse_category("EXTRA_EXPENSE").unwrap(), Category::ExtraExpense);
    }

    #[test]
    fn test_parse_unknown_category_rejected() {
        let err = parse_category("WHOLESALE").unwrap_err();
        assert!(matches!(err, FinanceError::InvalidCategory(_)));
        assert!(err.to_string().contains("WHOLESALE"));
    }
}
