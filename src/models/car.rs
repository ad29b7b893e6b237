use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the cars table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage_km: i32,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub status: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
}

pub const CAR_STATUSES: &[&str] = &["available", "reserved", "sold"];
