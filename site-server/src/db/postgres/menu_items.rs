//! `menu_items` queries

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::PgPool;

use super::BoxError;

const COLUMNS: &str = "id, name, description, price_cents, category, position, is_available, \
                       name_en, description_en, category_en, allergens, image_url";

pub async fn list_available(pool: &PgPool) -> Result<Vec<MenuItem>, BoxError> {
    let rows: Vec<MenuItem> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE is_available = TRUE"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &PgPool, data: &MenuItemCreate) -> Result<MenuItem, BoxError> {
    let row: MenuItem = sqlx::query_as(&format!(
        r#"
        INSERT INTO menu_items (
            name, description, price_cents, category, position, is_available,
            name_en, description_en, category_en, allergens, image_url
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price_cents)
    .bind(&data.category)
    .bind(data.position)
    .bind(data.is_available)
    .bind(&data.name_en)
    .bind(&data.description_en)
    .bind(&data.category_en)
    .bind(data.allergens.to_tags())
    .bind(&data.image_url)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Absent fields keep their column; `image_url` overwrites whenever present
pub async fn update(
    pool: &PgPool,
    id: i64,
    patch: &MenuItemUpdate,
) -> Result<Option<MenuItem>, BoxError> {
    let (has_image_url, image_url) = match &patch.image_url {
        Some(v) => (true, v.clone()),
        None => (false, None),
    };

    let row: Option<MenuItem> = sqlx::query_as(&format!(
        r#"
        UPDATE menu_items SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            price_cents = COALESCE($3, price_cents),
            category = COALESCE($4, category),
            position = COALESCE($5, position),
            image_url = CASE WHEN $6 THEN $7 ELSE image_url END,
            is_available = COALESCE($8, is_available),
            name_en = COALESCE($9, name_en),
            description_en = COALESCE($10, description_en),
            category_en = COALESCE($11, category_en),
            allergens = COALESCE($12, allergens)
        WHERE id = $13
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&patch.name)
    .bind(&patch.description)
    .bind(patch.price_cents)
    .bind(&patch.category)
    .bind(patch.position)
    .bind(has_image_url)
    .bind(image_url)
    .bind(patch.is_available)
    .bind(&patch.name_en)
    .bind(&patch.description_en)
    .bind(&patch.category_en)
    .bind(patch.allergens.as_ref().map(|a| a.to_tags()))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
