use axum::extract::{Path, Query, State};
use axum::Json;
use metrics::counter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::car_repo::{self, CarListFilter, CarSort};
use crate::db::client_repo;
use crate::errors::AppError;
use crate::models::client::CLIENT_KINDS;
use crate::models::{Car, Client};
use crate::AppState;

use super::ApiResponse;

const MAX_PER_PAGE: u32 = 100;

// ---------------------------------------------------------------------------
// Car listing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CarListingQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub year: Option<i32>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize)]
pub struct PagedCars {
    pub items: Vec<Car>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// GET /storefront/cars — filtered, sorted, paginated listing
pub async fn list_cars(
    State(state): State<AppState>,
    Query(q): Query<CarListingQuery>,
) -> Result<Json<PagedCars>, AppError> {
    let filter = CarListFilter {
        make: q.make,
        model: q.model,
        status: q.status,
        min_price: q.min_price,
        max_price: q.max_price,
        year: q.year,
    };
    let sort = CarSort::from_api_str(q.sort.as_deref().unwrap_or(""));

    let page = q.page.unwrap_or(1).max(1);
    let per_page = q
        .per_page
        .unwrap_or(state.config.storefront_page_size)
        .clamp(1, MAX_PER_PAGE);
    let offset = i64::from(page - 1) * i64::from(per_page);

    let items = car_repo::list_cars(&state.db, &filter, sort, i64::from(per_page), offset).await?;
    let total = car_repo::count_cars(&state.db, &filter).await?;

    Ok(Json(PagedCars {
        items,
        total,
        page,
        per_page,
    }))
}

/// GET /storefront/cars/{id}
pub async fn car_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Car>, AppError> {
    let car = car_repo::get_car(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("car not found".into()))?;

    Ok(Json(car))
}

// ---------------------------------------------------------------------------
// Registration / contact form
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub kind: Option<String>,
}

/// POST /storefront/registrations — public form submission
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(body): Json<RegistrationRequest>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }

    let email = body.email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("email is required".into()));
    }
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(AppError::BadRequest(format!("invalid email: {email}")));
    }

    let kind = body.kind.as_deref().unwrap_or("registration");
    if !CLIENT_KINDS.contains(&kind) {
        return Err(AppError::BadRequest(format!("invalid kind: {kind}")));
    }

    let client = client_repo::insert_client(
        &state.db,
        name,
        email,
        body.phone.as_deref(),
        body.message.as_deref(),
        kind,
    )
    .await?;

    counter!("registrations_received").increment(1);
    tracing::info!(client_id = %client.id, kind = %client.kind, "Storefront submission received");

    Ok(Json(ApiResponse {
        success: true,
        data: Some(client),
        error: None,
    }))
}
