use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::finance::Financials;
use crate::models::{FeeInputs, FinanceEntry};

/// Insert a new finance entry with its computed financials.
pub async fn insert_entry(
    pool: &PgPool,
    category: &str,
    label: Option<&str>,
    linked_order_id: Option<Uuid>,
    fields: &FeeInputs,
    financials: &Financials,
) -> anyhow::Result<FinanceEntry> {
    let entry = sqlx::query_as::<_, FinanceEntry>(
        r#"
        INSERT INTO finance_entries (
            category, label, linked_order_id,
            buying_costs, papers_fees, transport_fees, auction_fees,
            transaction_fees, other_fees, selling_price, amount,
            revenue, total_cost, net_profit
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(category)
    .bind(label)
    .bind(linked_order_id)
    .bind(fields.buying_costs)
    .bind(fields.papers_fees)
    .bind(fields.transport_fees)
    .bind(fields.auction_fees)
    .bind(fields.transaction_fees)
    .bind(fields.other_fees)
    .bind(fields.selling_price)
    .bind(fields.amount)
    .bind(financials.revenue)
    .bind(financials.total_cost)
    .bind(financials.net_profit)
    .fetch_one(pool)
    .await?;

    Ok(entry)
}

/// Get a single entry by id.
pub async fn get_entry(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<FinanceEntry>> {
    let entry = sqlx::query_as::<_, FinanceEntry>(
        "SELECT * FROM finance_entries WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// List entries, optionally restricted to one category and/or a creation
/// lower bound, newest first.
pub async fn list_entries(
    pool: &PgPool,
    category: Option<&str>,
    since: Option<DateTime<Utc>>,
) -> anyhow::Result<Vec<FinanceEntry>> {
    let entries = sqlx::query_as::<_, FinanceEntry>(
        r#"
        SELECT * FROM finance_entries
        WHERE ($1::text IS NULL OR category = $1)
          AND ($2::timestamptz IS NULL OR created_at >= $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(category)
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// All entries referencing a sales order. The creation path keeps this at
/// zero or one; the query tolerates more for the accepted submit race.
pub async fn get_entries_for_order(
    pool: &PgPool,
    order_id: Uuid,
) -> anyhow::Result<Vec<FinanceEntry>> {
    let entries = sqlx::query_as::<_, FinanceEntry>(
        "SELECT * FROM finance_entries WHERE linked_order_id = $1 ORDER BY created_at ASC",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Rewrite an entry's raw fields together with its recomputed financials
/// in a single UPDATE. The category is immutable and never touched here.
pub async fn update_entry_fields(
    pool: &PgPool,
    id: Uuid,
    label: Option<&str>,
    fields: &FeeInputs,
    financials: &Financials,
) -> anyhow::Result<Option<FinanceEntry>> {
    let entry = sqlx::query_as::<_, FinanceEntry>(
        r#"
        UPDATE finance_entries
        SET label = $2,
            buying_costs = $3, papers_fees = $4, transport_fees = $5,
            auction_fees = $6, transaction_fees = $7, other_fees = $8,
            selling_price = $9, amount = $10,
            revenue = $11, total_cost = $12, net_profit = $13
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(label)
    .bind(fields.buying_costs)
    .bind(fields.papers_fees)
    .bind(fields.transport_fees)
    .bind(fields.auction_fees)
    .bind(fields.transaction_fees)
    .bind(fields.other_fees)
    .bind(fields.selling_price)
    .bind(fields.amount)
    .bind(financials.revenue)
    .bind(financials.total_cost)
    .bind(financials.net_profit)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// Delete an entry. Returns false when the id did not exist.
pub async fn delete_entry(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM finance_entries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
