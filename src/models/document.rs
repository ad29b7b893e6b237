use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the documents table.
/// The binary payload lives in the external hosting service; this record
/// holds the metadata and the hosted URL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub file_name: String,
    pub url: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

pub const DOCUMENT_ENTITY_TYPES: &[&str] = &["car", "order", "client", "transitaire", "finance"];
