use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::client_repo;
use crate::errors::AppError;
use crate::models::Client;
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct ClientListQuery {
    pub kind: Option<String>,
    pub status: Option<String>,
}

/// GET /api/clients — registration/contact submissions
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<ClientListQuery>,
) -> Result<Json<ApiResponse<Vec<Client>>>, AppError> {
    let clients =
        client_repo::list_clients(&state.db, q.kind.as_deref(), q.status.as_deref()).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(clients),
        error: None,
    }))
}

/// POST /api/clients/{id}/handled
pub async fn mark_handled(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let client = client_repo::mark_handled(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("client not found".into()))?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(client),
        error: None,
    }))
}

/// DELETE /api/clients/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted = client_repo::delete_client(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound("client not found".into()));
    }

    Ok(Json(ApiResponse {
        success: true,
        data: Some(()),
        error: None,
    }))
}
