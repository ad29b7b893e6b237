use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::SalesOrder;

pub async fn insert_order(
    pool: &PgPool,
    car_id: Option<Uuid>,
    client_name: &str,
    client_phone: Option<&str>,
    category: &str,
    sale_price: Decimal,
) -> anyhow::Result<SalesOrder> {
    let order = sqlx::query_as::<_, SalesOrder>(
        r#"
        INSERT INTO orders (car_id, client_name, client_phone, category, sale_price)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(car_id)
    .bind(client_name)
    .bind(client_phone)
    .bind(category)
    .bind(sale_price)
    .fetch_one(pool)
    .await?;

    Ok(order)
}

pub async fn get_order(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<SalesOrder>> {
    let order = sqlx::query_as::<_, SalesOrder>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(order)
}

/// All orders, optionally filtered by status, newest first.
pub async fn list_orders(
    pool: &PgPool,
    status: Option<&str>,
) -> anyhow::Result<Vec<SalesOrder>> {
    let orders = sqlx::query_as::<_, SalesOrder>(
        r#"
        SELECT * FROM orders
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

pub async fn update_order_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> anyhow::Result<Option<SalesOrder>> {
    let order = sqlx::query_as::<_, SalesOrder>(
        "UPDATE orders SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

pub async fn delete_order(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
