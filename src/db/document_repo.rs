use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Document;

pub async fn insert_document(
    pool: &PgPool,
    entity_type: &str,
    entity_id: Uuid,
    file_name: &str,
    url: &str,
    content_type: &str,
    size_bytes: i64,
) -> anyhow::Result<Document> {
    let document = sqlx::query_as::<_, Document>(
        r#"
        INSERT INTO documents (entity_type, entity_id, file_name, url, content_type, size_bytes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(entity_type)
    .bind(entity_id)
    .bind(file_name)
    .bind(url)
    .bind(content_type)
    .bind(size_bytes)
    .fetch_one(pool)
    .await?;

    Ok(document)
}

pub async fn get_document(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Document>> {
    let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(document)
}

/// Documents attached to one entity, oldest first.
pub async fn list_documents_for_entity(
    pool: &PgPool,
    entity_type: &str,
    entity_id: Uuid,
) -> anyhow::Result<Vec<Document>> {
    let documents = sqlx::query_as::<_, Document>(
        r#"
        SELECT * FROM documents
        WHERE entity_type = $1 AND entity_id = $2
        ORDER BY created_at ASC
        "#,
    )
    .bind(entity_type)
    .bind(entity_id)
    .fetch_all(pool)
    .await?;

    Ok(documents)
}

pub async fn delete_document(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM documents WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
