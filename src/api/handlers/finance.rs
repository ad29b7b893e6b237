use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use metrics::counter;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{finance_repo, order_repo};
use crate::errors::AppError;
use crate::finance::{aggregate, compute_financials, linker, parse_category};
use crate::finance::{SummaryTotals, TimeWindow};
use crate::models::{FeeInputs, FinanceEntry};
use crate::AppState;

use super::ApiResponse;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Entry-creation payload. Fee fields arrive flat, as the form submits
/// them; absent fields are zero.
#[derive(Deserialize)]
pub struct CreateEntryRequest {
    pub category: String,
    pub label: Option<String>,
    pub linked_order_id: Option<Uuid>,
    #[serde(flatten)]
    pub fields: FeeInputs,
}

/// Edit payload. The category is immutable; a full set of raw fields is
/// re-submitted and the derived values are recomputed with them.
#[derive(Deserialize)]
pub struct UpdateEntryRequest {
    pub label: Option<String>,
    #[serde(flatten)]
    pub fields: FeeInputs,
}

#[derive(Deserialize)]
pub struct EntryListQuery {
    pub category: Option<String>,
    pub window: Option<String>,
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub window: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/finance — ledger entries, optionally one category and window
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<EntryListQuery>,
) -> Result<Json<ApiResponse<Vec<FinanceEntry>>>, AppError> {
    let category = match q.category.as_deref() {
        Some(s) => Some(parse_category(s)?.to_string()),
        None => None,
    };
    let since = q
        .window
        .as_deref()
        .map(TimeWindow::from_api_str)
        .and_then(|w| w.lower_bound(Utc::now()));

    let entries = finance_repo::list_entries(&state.db, category.as_deref(), since).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(entries),
        error: None,
    }))
}

/// GET /api/finance/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FinanceEntry>>, AppError> {
    let entry = finance_repo::get_entry(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("finance entry not found".into()))?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(entry),
        error: None,
    }))
}

/// POST /api/finance — record an entry, computing its financials
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> Result<Json<ApiResponse<FinanceEntry>>, AppError> {
    let category = parse_category(&body.category)?;

    if let Some(order_id) = body.linked_order_id {
        if !category.is_sale_channel() {
            return Err(AppError::BadRequest(
                "an expense entry cannot link to an order".into(),
            ));
        }
        if order_repo::get_order(&state.db, order_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("unknown order: {order_id}")));
        }

        let existing = finance_repo::get_entries_for_order(&state.db, order_id).await?;
        if linker::is_financed(order_id, &existing) {
            counter!("duplicate_finance_links_rejected").increment(1);
            return Err(AppError::BadRequest(format!(
                "order {order_id} already has a finance entry"
            )));
        }
    }

    let financials = compute_financials(category, &body.fields);

    let entry = finance_repo::insert_entry(
        &state.db,
        &category.to_string(),
        body.label.as_deref(),
        body.linked_order_id,
        &body.fields,
        &financials,
    )
    .await?;

    counter!("finance_entries_created").increment(1);
    tracing::info!(
        entry_id = %entry.id,
        category = %entry.category,
        net_profit = %entry.net_profit,
        "Finance entry recorded"
    );

    Ok(Json(ApiResponse {
        success: true,
        data: Some(entry),
        error: None,
    }))
}

/// PUT /api/finance/{id} — re-submit raw fields, re-derive atomically
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEntryRequest>,
) -> Result<Json<ApiResponse<FinanceEntry>>, AppError> {
    let entry = finance_repo::get_entry(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("finance entry not found".into()))?;

    // Stored tags are written through the parser; a reject here means the
    // row was edited out of band.
    let category = parse_category(&entry.category)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

    let financials = compute_financials(category, &body.fields);

    let updated = finance_repo::update_entry_fields(
        &state.db,
        id,
        body.label.as_deref(),
        &body.fields,
        &financials,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("finance entry not found".into()))?;

    counter!("finance_entries_updated").increment(1);

    Ok(Json(ApiResponse {
        success: true,
        data: Some(updated),
        error: None,
    }))
}

/// DELETE /api/finance/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted = finance_repo::delete_entry(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound("finance entry not found".into()));
    }

    Ok(Json(ApiResponse {
        success: true,
        data: Some(()),
        error: None,
    }))
}

/// GET /api/finance/summary?window=all|today|week|month|year
///
/// Re-fetches and folds on every call rather than maintaining running
/// counters; staleness is bounded by the fetch.
pub async fn summary(
    State(state): State<AppState>,
    Query(q): Query<SummaryQuery>,
) -> Result<Json<SummaryTotals>, AppError> {
    let window = TimeWindow::from_api_str(q.window.as_deref().unwrap_or("all"));
    let now = Utc::now();

    // Coarse SQL prefilter; the aggregator applies the authoritative bound.
    let entries = finance_repo::list_entries(&state.db, None, window.lower_bound(now)).await?;

    let totals = aggregate(&entries, window, now);
    tracing::debug!(window = %window, count = totals.count, "Finance summary computed");

    Ok(Json(totals))
}
