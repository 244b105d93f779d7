//! `site_pages` queries

use serde_json::Value;
use shared::models::Page;
use sqlx::PgPool;

use super::BoxError;

pub async fn get(pool: &PgPool, slug: &str) -> Result<Option<Page>, BoxError> {
    let row: Option<Page> = sqlx::query_as(
        "SELECT slug, data, updated_at FROM site_pages WHERE slug = $1 LIMIT 1",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn upsert(pool: &PgPool, slug: &str, data: &Value) -> Result<Page, BoxError> {
    let row: Page = sqlx::query_as(
        r#"
        INSERT INTO site_pages (slug, data)
        VALUES ($1, $2)
        ON CONFLICT (slug)
        DO UPDATE SET data = EXCLUDED.data, updated_at = now()
        RETURNING slug, data, updated_at
        "#,
    )
    .bind(slug)
    .bind(sqlx::types::Json(data))
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn insert_new(pool: &PgPool, slug: &str, data: &Value) -> Result<Option<Page>, BoxError> {
    let row: Option<Page> = sqlx::query_as(
        r#"
        INSERT INTO site_pages (slug, data)
        VALUES ($1, $2)
        ON CONFLICT (slug) DO NOTHING
        RETURNING slug, data, updated_at
        "#,
    )
    .bind(slug)
    .bind(sqlx::types::Json(data))
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, slug: &str) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM site_pages WHERE slug = $1")
        .bind(slug)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_by_prefix(pool: &PgPool, prefix: &str) -> Result<Vec<Page>, BoxError> {
    // `left()` instead of LIKE: `_` in the prefix must match literally
    let rows: Vec<Page> = sqlx::query_as(
        r#"
        SELECT slug, data, updated_at
        FROM site_pages
        WHERE left(slug, length($1)) = $1
        "#,
    )
    .bind(prefix)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
