use axum::extract::{Path, State};
use axum::Json;
use metrics::gauge;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::car_repo;
use crate::errors::AppError;
use crate::models::car::CAR_STATUSES;
use crate::models::Car;
use crate::AppState;

use super::ApiResponse;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Create/update payload. The back-office wizard collects images, info and
/// features in separate steps and submits them together.
#[derive(Deserialize)]
pub struct CarRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    #[serde(default)]
    pub mileage_km: i32,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl CarRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.make.trim().is_empty() {
            return Err(AppError::BadRequest("make is required".into()));
        }
        if self.model.trim().is_empty() {
            return Err(AppError::BadRequest("model is required".into()));
        }
        if !(1950..=2100).contains(&self.year) {
            return Err(AppError::BadRequest(format!("invalid year: {}", self.year)));
        }
        if self.price < Decimal::ZERO {
            return Err(AppError::BadRequest("price must be non-negative".into()));
        }
        if self.mileage_km < 0 {
            return Err(AppError::BadRequest("mileage must be non-negative".into()));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

async fn refresh_stock_gauge(state: &AppState) {
    if let Ok(n) = car_repo::count_available(&state.db).await {
        gauge!("cars_available").set(n as f64);
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/cars — full inventory
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Car>>>, AppError> {
    let cars = car_repo::list_all_cars(&state.db).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(cars),
        error: None,
    }))
}

/// GET /api/cars/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Car>>, AppError> {
    let car = car_repo::get_car(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("car not found".into()))?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(car),
        error: None,
    }))
}

/// POST /api/cars — add a car to the inventory
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CarRequest>,
) -> Result<Json<ApiResponse<Car>>, AppError> {
    body.validate()?;

    let car = car_repo::insert_car(
        &state.db,
        body.make.trim(),
        body.model.trim(),
        body.year,
        body.price,
        body.mileage_km,
        body.fuel.as_deref(),
        body.transmission.as_deref(),
        body.description.as_deref(),
        &body.images,
        &body.features,
    )
    .await?;

    refresh_stock_gauge(&state).await;
    tracing::info!(car_id = %car.id, make = %car.make, model = %car.model, "Car added");

    Ok(Json(ApiResponse {
        success: true,
        data: Some(car),
        error: None,
    }))
}

/// PUT /api/cars/{id} — full update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CarRequest>,
) -> Result<Json<ApiResponse<Car>>, AppError> {
    body.validate()?;

    let car = car_repo::update_car(
        &state.db,
        id,
        body.make.trim(),
        body.model.trim(),
        body.year,
        body.price,
        body.mileage_km,
        body.fuel.as_deref(),
        body.transmission.as_deref(),
        body.description.as_deref(),
        &body.images,
        &body.features,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("car not found".into()))?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(car),
        error: None,
    }))
}

/// POST /api/cars/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<ApiResponse<Car>>, AppError> {
    if !CAR_STATUSES.contains(&body.status.as_str()) {
        return Err(AppError::BadRequest(format!("invalid status: {}", body.status)));
    }

    let car = car_repo::update_car_status(&state.db, id, &body.status)
        .await?
        .ok_or_else(|| AppError::NotFound("car not found".into()))?;

    refresh_stock_gauge(&state).await;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(car),
        error: None,
    }))
}

/// DELETE /api/cars/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted = car_repo::delete_car(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound("car not found".into()));
    }

    refresh_stock_gauge(&state).await;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(()),
        error: None,
    }))
}
