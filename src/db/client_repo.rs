use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Client;

/// Record a storefront registration/contact submission.
pub async fn insert_client(
    pool: &PgPool,
    name: &str,
    email: &str,
    phone: Option<&str>,
    message: Option<&str>,
    kind: &str,
) -> anyhow::Result<Client> {
    let client = sqlx::query_as::<_, Client>(
        r#"
        INSERT INTO clients (name, email, phone, message, kind)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(message)
    .bind(kind)
    .fetch_one(pool)
    .await?;

    Ok(client)
}

pub async fn get_client(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Client>> {
    let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(client)
}

/// List submissions, optionally filtered by kind and status, newest first.
pub async fn list_clients(
    pool: &PgPool,
    kind: Option<&str>,
    status: Option<&str>,
) -> anyhow::Result<Vec<Client>> {
    let clients = sqlx::query_as::<_, Client>(
        r#"
        SELECT * FROM clients
        WHERE ($1::text IS NULL OR kind = $1)
          AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(kind)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(clients)
}

pub async fn mark_handled(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Client>> {
    let client = sqlx::query_as::<_, Client>(
        "UPDATE clients SET status = 'handled' WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(client)
}

pub async fn delete_client(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
