use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the clients table.
/// Created by the public registration/contact form endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub kind: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub const CLIENT_KINDS: &[&str] = &["registration", "contact"];
