use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the transitaires (customs agents) table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transitaire {
    pub id: Uuid,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub port: Option<String>,
    pub license_no: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
