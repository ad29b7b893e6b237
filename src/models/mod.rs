pub mod car;
pub mod client;
pub mod document;
pub mod finance;
pub mod order;
pub mod transitaire;

pub use car::Car;
pub use client::Client;
pub use document::Document;
pub use finance::{FeeInputs, FinanceEntry};
pub use order::SalesOrder;
pub use transitaire::Transitaire;

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category — sale channel / expense bucket
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    B2b,
    B2cAlgeria,
    B2cKorea,
    ExtraExpense,
}

impl Category {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "B2B" => Some(Category::B2b),
            "B2C_ALGERIA" => Some(Category::B2cAlgeria),
            "B2C_KOREA" => Some(Category::B2cKorea),
            "EXTRA_EXPENSE" => Some(Category::ExtraExpense),
            _ => None,
        }
    }

    /// Sale channels carry a selling price and may link to an order;
    /// the expense bucket does neither.
    pub fn is_sale_channel(self) -> bool {
        !matches!(self, Category::ExtraExpense)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::B2b => write!(f, "B2B"),
            Category::B2cAlgeria => write!(f, "B2C_ALGERIA"),
            Category::B2cKorea => write!(f, "B2C_KOREA"),
            Category::ExtraExpense => write!(f, "EXTRA_EXPENSE"),
        }
    }
}
