use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use metrics::counter;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::document_repo;
use crate::errors::AppError;
use crate::models::document::DOCUMENT_ENTITY_TYPES;
use crate::models::Document;
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct DocumentListQuery {
    pub entity_type: String,
    pub entity_id: Uuid,
}

#[derive(Deserialize)]
struct StorageUploadResponse {
    url: String,
}

/// GET /api/documents?entity_type=…&entity_id=…
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<DocumentListQuery>,
) -> Result<Json<ApiResponse<Vec<Document>>>, AppError> {
    if !DOCUMENT_ENTITY_TYPES.contains(&q.entity_type.as_str()) {
        return Err(AppError::BadRequest(format!(
            "invalid entity_type: {}",
            q.entity_type
        )));
    }

    let documents =
        document_repo::list_documents_for_entity(&state.db, &q.entity_type, q.entity_id).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(documents),
        error: None,
    }))
}

/// POST /api/documents — multipart upload: `entity_type`, `entity_id`,
/// `file`. The payload is streamed to the external hosting service when
/// one is configured; otherwise only the metadata record is written.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Document>>, AppError> {
    let mut entity_type: Option<String> = None;
    let mut entity_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut content_type = "application/octet-stream".to_string();
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("entity_type") => {
                entity_type = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            Some("entity_id") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                entity_id = Some(
                    raw.parse()
                        .map_err(|_| AppError::BadRequest(format!("invalid entity_id: {raw}")))?,
                );
            }
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                if let Some(ct) = field.content_type() {
                    content_type = ct.to_string();
                }
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let entity_type =
        entity_type.ok_or_else(|| AppError::BadRequest("entity_type is required".into()))?;
    if !DOCUMENT_ENTITY_TYPES.contains(&entity_type.as_str()) {
        return Err(AppError::BadRequest(format!("invalid entity_type: {entity_type}")));
    }
    let entity_id =
        entity_id.ok_or_else(|| AppError::BadRequest("entity_id is required".into()))?;
    let data = data.ok_or_else(|| AppError::BadRequest("file is required".into()))?;
    let file_name = file_name.unwrap_or_else(|| "upload.bin".into());

    if data.len() > state.config.max_upload_bytes {
        return Err(AppError::BadRequest(format!(
            "file exceeds upload limit of {} bytes",
            state.config.max_upload_bytes
        )));
    }

    let size_bytes = data.len() as i64;

    let url = match &state.config.storage_base_url {
        Some(base) => {
            let resp = state
                .http
                .post(format!("{base}/upload"))
                .query(&[("name", file_name.as_str())])
                .header("content-type", &content_type)
                .body(data)
                .send()
                .await
                .map_err(anyhow::Error::from)?;

            if !resp.status().is_success() {
                return Err(AppError::Internal(anyhow::anyhow!(
                    "storage service returned {}",
                    resp.status()
                )));
            }

            let uploaded: StorageUploadResponse =
                resp.json().await.map_err(anyhow::Error::from)?;
            uploaded.url
        }
        // No hosting service configured: record a local-style URL so dev
        // environments still get working metadata.
        None => format!("/files/{}/{}", Uuid::new_v4(), file_name),
    };

    let document = document_repo::insert_document(
        &state.db,
        &entity_type,
        entity_id,
        &file_name,
        &url,
        &content_type,
        size_bytes,
    )
    .await?;

    counter!("documents_uploaded").increment(1);
    tracing::info!(
        document_id = %document.id,
        entity_type = %document.entity_type,
        size_bytes,
        "Document uploaded"
    );

    Ok(Json(ApiResponse {
        success: true,
        data: Some(document),
        error: None,
    }))
}

/// DELETE /api/documents/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted = document_repo::delete_document(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound("document not found".into()));
    }

    Ok(Json(ApiResponse {
        success: true,
        data: Some(()),
        error: None,
    }))
}
