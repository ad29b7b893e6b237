use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::transitaire_repo;
use crate::errors::AppError;
use crate::models::Transitaire;
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct TransitaireRequest {
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub port: Option<String>,
    pub license_no: Option<String>,
    pub notes: Option<String>,
}

impl TransitaireRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name is required".into()));
        }
        Ok(())
    }
}

/// GET /api/transitaires
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Transitaire>>>, AppError> {
    let transitaires = transitaire_repo::list_transitaires(&state.db).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(transitaires),
        error: None,
    }))
}

/// GET /api/transitaires/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Transitaire>>, AppError> {
    let transitaire = transitaire_repo::get_transitaire(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("transitaire not found".into()))?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(transitaire),
        error: None,
    }))
}

/// POST /api/transitaires
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<TransitaireRequest>,
) -> Result<Json<ApiResponse<Transitaire>>, AppError> {
    body.validate()?;

    let transitaire = transitaire_repo::insert_transitaire(
        &state.db,
        body.name.trim(),
        body.company.as_deref(),
        body.phone.as_deref(),
        body.email.as_deref(),
        body.port.as_deref(),
        body.license_no.as_deref(),
        body.notes.as_deref(),
    )
    .await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(transitaire),
        error: None,
    }))
}

/// PUT /api/transitaires/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitaireRequest>,
) -> Result<Json<ApiResponse<Transitaire>>, AppError> {
    body.validate()?;

    let transitaire = transitaire_repo::update_transitaire(
        &state.db,
        id,
        body.name.trim(),
        body.company.as_deref(),
        body.phone.as_deref(),
        body.email.as_deref(),
        body.port.as_deref(),
        body.license_no.as_deref(),
        body.notes.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("transitaire not found".into()))?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(transitaire),
        error: None,
    }))
}

/// DELETE /api/transitaires/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted = transitaire_repo::delete_transitaire(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound("transitaire not found".into()));
    }

    Ok(Json(ApiResponse {
        success: true,
        data: Some(()),
        error: None,
    }))
}
