use axum::extract::{Path, Query, State};
use axum::Json;
use metrics::counter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{car_repo, finance_repo, order_repo};
use crate::errors::AppError;
use crate::finance::{linker, parse_category};
use crate::models::order::ORDER_STATUSES;
use crate::models::SalesOrder;
use crate::AppState;

use super::ApiResponse;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub car_id: Option<Uuid>,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub category: String,
    pub sale_price: Decimal,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
}

/// Order row annotated with its finance state for the back-office list.
#[derive(Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: SalesOrder,
    pub financed: bool,
    pub net_profit: Option<Decimal>,
}

#[derive(Serialize)]
pub struct OrderFinanceStatus {
    pub financed: bool,
    pub net_profit: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/orders — orders annotated as financed or not
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<OrderListQuery>,
) -> Result<Json<ApiResponse<Vec<OrderSummary>>>, AppError> {
    let orders = order_repo::list_orders(&state.db, q.status.as_deref()).await?;
    let entries = finance_repo::list_entries(&state.db, None, None).await?;

    let summaries = orders
        .into_iter()
        .map(|order| {
            let financed = linker::is_financed(order.id, &entries);
            let net_profit = linker::profit_for(order.id, &entries);
            OrderSummary {
                order,
                financed,
                net_profit,
            }
        })
        .collect();

    Ok(Json(ApiResponse {
        success: true,
        data: Some(summaries),
        error: None,
    }))
}

/// GET /api/orders/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SalesOrder>>, AppError> {
    let order = order_repo::get_order(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".into()))?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(order),
        error: None,
    }))
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<Json<ApiResponse<SalesOrder>>, AppError> {
    let client_name = body.client_name.trim();
    if client_name.is_empty() {
        return Err(AppError::BadRequest("client_name is required".into()));
    }

    let category = parse_category(&body.category)?;
    if !category.is_sale_channel() {
        return Err(AppError::BadRequest(
            "an order must use a sale channel, not the expense bucket".into(),
        ));
    }

    if body.sale_price < Decimal::ZERO {
        return Err(AppError::BadRequest("sale_price must be non-negative".into()));
    }

    if let Some(car_id) = body.car_id {
        if car_repo::get_car(&state.db, car_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("unknown car: {car_id}")));
        }
    }

    let order = order_repo::insert_order(
        &state.db,
        body.car_id,
        client_name,
        body.client_phone.as_deref(),
        &category.to_string(),
        body.sale_price,
    )
    .await?;

    counter!("orders_created").increment(1);
    tracing::info!(order_id = %order.id, category = %order.category, "Order created");

    Ok(Json(ApiResponse {
        success: true,
        data: Some(order),
        error: None,
    }))
}

/// POST /api/orders/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<ApiResponse<SalesOrder>>, AppError> {
    if !ORDER_STATUSES.contains(&body.status.as_str()) {
        return Err(AppError::BadRequest(format!("invalid status: {}", body.status)));
    }

    let order = order_repo::update_order_status(&state.db, id, &body.status)
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".into()))?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(order),
        error: None,
    }))
}

/// GET /api/orders/{id}/finance — has finance been recorded for this order?
pub async fn finance_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderFinanceStatus>>, AppError> {
    if order_repo::get_order(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("order not found".into()));
    }

    let entries = finance_repo::get_entries_for_order(&state.db, id).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(OrderFinanceStatus {
            financed: linker::is_financed(id, &entries),
            net_profit: linker::profit_for(id, &entries),
        }),
        error: None,
    }))
}

/// DELETE /api/orders/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted = order_repo::delete_order(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound("order not found".into()));
    }

    Ok(Json(ApiResponse {
        success: true,
        data: Some(()),
        error: None,
    }))
}
