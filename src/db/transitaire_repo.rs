use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Transitaire;

#[allow(clippy::too_many_arguments)]
pub async fn insert_transitaire(
    pool: &PgPool,
    name: &str,
    company: Option<&str>,
    phone: Option<&str>,
    email: Option<&str>,
    port: Option<&str>,
    license_no: Option<&str>,
    notes: Option<&str>,
) -> anyhow::Result<Transitaire> {
    let transitaire = sqlx::query_as::<_, Transitaire>(
        r#"
        INSERT INTO transitaires (name, company, phone, email, port, license_no, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(company)
    .bind(phone)
    .bind(email)
    .bind(port)
    .bind(license_no)
    .bind(notes)
    .fetch_one(pool)
    .await?;

    Ok(transitaire)
}

pub async fn get_transitaire(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Transitaire>> {
    let transitaire = sqlx::query_as::<_, Transitaire>(
        "SELECT * FROM transitaires WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(transitaire)
}

pub async fn list_transitaires(pool: &PgPool) -> anyhow::Result<Vec<Transitaire>> {
    let transitaires = sqlx::query_as::<_, Transitaire>(
        "SELECT * FROM transitaires ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(transitaires)
}

#[allow(clippy::too_many_arguments)]
pub async fn update_transitaire(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    company: Option<&str>,
    phone: Option<&str>,
    email: Option<&str>,
    port: Option<&str>,
    license_no: Option<&str>,
    notes: Option<&str>,
) -> anyhow::Result<Option<Transitaire>> {
    let transitaire = sqlx::query_as::<_, Transitaire>(
        r#"
        UPDATE transitaires
        SET name = $2, company = $3, phone = $4, email = $5,
            port = $6, license_no = $7, notes = $8
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(company)
    .bind(phone)
    .bind(email)
    .bind(port)
    .bind(license_no)
    .bind(notes)
    .fetch_optional(pool)
    .await?;

    Ok(transitaire)
}

pub async fn delete_transitaire(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM transitaires WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
