use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the orders table.
/// `category` is the sale channel tag; never the expense bucket.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SalesOrder {
    pub id: Uuid,
    pub car_id: Option<Uuid>,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub category: String,
    pub sale_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub const ORDER_STATUSES: &[&str] = &["pending", "confirmed", "delivered", "cancelled"];
