//! Menu API: category ordering, admin CRUD and the public listing

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::{CategoryOrder, MENU_CATEGORIES_SLUG, MenuItemCreate, MenuItemUpdate};

use super::body::JsonBody;
use super::parse_id;
use crate::db::ContentStore;
use crate::error::ServiceResult;
use crate::listing::sort_menu;
use crate::sanitize::{
    category_order, clean_str, coerce_bool, coerce_integer, normalize_allergens,
};
use crate::state::AppState;

/// Stored category order, `null` document when never saved
async fn stored_order(db: &dyn ContentStore, default_rank: i64) -> ServiceResult<CategoryOrder> {
    let page = db.get_page(MENU_CATEGORIES_SLUG).await?;
    let data = page.map(|p| p.data).unwrap_or(Value::Null);
    Ok(category_order(&data, default_rank))
}

/// GET /api/menu/categories
pub async fn get_categories(State(state): State<AppState>) -> ServiceResult<Json<Value>> {
    let order = stored_order(state.db()?, 0).await?;
    Ok(Json(json!({ "data": order })))
}

/// PUT /api/admin/menu/categories: full replace
pub async fn put_categories(
    State(state): State<AppState>,
    body: JsonBody,
) -> ServiceResult<Json<Value>> {
    let order = category_order(body.value(), 0);
    state
        .db()?
        .put_page(MENU_CATEGORIES_SLUG, &json!(order))
        .await?;

    tracing::info!(count = order.categories.len(), "Menu category order saved");
    Ok(Json(json!({ "ok": true, "data": order })))
}

/// GET /api/menu: available items, category order first
pub async fn list_menu(State(state): State<AppState>) -> ServiceResult<Json<Value>> {
    let db = state.db()?;
    let items = db.list_available_items().await?;
    let order = stored_order(db, CategoryOrder::UNRANKED).await?;
    Ok(Json(json!({ "items": sort_menu(items, &order) })))
}

/// Whole-number JSON value (numbers only, no string coercion)
fn json_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        _ => None,
    }
}

fn availability_of(v: &Value) -> Result<bool, AppError> {
    coerce_bool(v).ok_or_else(|| AppError::validation("is_available must be a boolean"))
}

fn position_of(v: &Value) -> Result<i64, AppError> {
    coerce_integer(v).ok_or_else(|| AppError::validation("position must be an integer"))
}

/// POST /api/admin/menu
pub async fn create_item(
    State(state): State<AppState>,
    body: JsonBody,
) -> ServiceResult<(StatusCode, Json<Value>)> {
    let name = clean_str(body.get("name"));
    let price = body.get("price_cents");
    if name.is_empty() || !price.is_number() {
        return Err(AppError::required("name and price_cents required").into());
    }
    let price_cents = json_integer(price).ok_or_else(|| AppError::new(ErrorCode::InvalidPrice))?;

    let data = MenuItemCreate {
        name,
        description: clean_str(body.get("description")),
        price_cents,
        category: clean_str(body.get("category")),
        position: body.present("position").map(position_of).transpose()?.unwrap_or(0),
        is_available: body
            .present("is_available")
            .map(availability_of)
            .transpose()?
            .unwrap_or(true),
        name_en: clean_str(body.get("name_en")),
        description_en: clean_str(body.get("description_en")),
        category_en: clean_str(body.get("category_en")),
        allergens: normalize_allergens(body.get("allergens")),
        image_url: clean_str(body.get("image_url")),
    };

    let item = state.db()?.create_item(&data).await?;
    tracing::info!(id = item.id, name = %item.name, "Menu item created");
    Ok((StatusCode::CREATED, Json(json!({ "item": item }))))
}

/// Coalescing patch from a request body
fn menu_patch(body: &JsonBody) -> Result<MenuItemUpdate, AppError> {
    let text = |key: &str| body.present(key).map(clean_str);

    let price_cents = body
        .present("price_cents")
        .map(|v| coerce_integer(v).ok_or_else(|| AppError::new(ErrorCode::InvalidPrice)))
        .transpose()?;

    Ok(MenuItemUpdate {
        name: text("name"),
        description: text("description"),
        price_cents,
        category: text("category"),
        position: body.present("position").map(position_of).transpose()?,
        is_available: body.present("is_available").map(availability_of).transpose()?,
        name_en: text("name_en"),
        description_en: text("description_en"),
        category_en: text("category_en"),
        allergens: body
            .has("allergens")
            .then(|| normalize_allergens(body.get("allergens"))),
        image_url: body
            .has("image_url")
            .then(|| body.present("image_url").map(clean_str)),
    })
}

/// PUT /api/admin/menu/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> ServiceResult<Json<Value>> {
    let db = state.db()?;
    let patch = menu_patch(&body)?;
    let id = parse_id(&id)?;

    let item = db
        .update_item(id, &patch)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;
    Ok(Json(json!({ "item": item })))
}

/// DELETE /api/admin/menu/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<Value>> {
    let db = state.db()?;
    let id = parse_id(&id)?;
    if !db.delete_item(id).await? {
        return Err(AppError::new(ErrorCode::MenuItemNotFound).into());
    }
    tracing::info!(id, "Menu item deleted");
    Ok(Json(json!({ "ok": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_patch_changes_nothing() {
        let patch = menu_patch(&JsonBody(Some(json!({})))).unwrap();
        assert_eq!(patch, MenuItemUpdate::default());

        let patch = menu_patch(&JsonBody(None)).unwrap();
        assert_eq!(patch, MenuItemUpdate::default());
    }

    #[test]
    fn test_null_fields_are_ignored_except_image_url() {
        let patch = menu_patch(&JsonBody(Some(json!({
            "name": null,
            "price_cents": null,
            "image_url": null
        }))))
        .unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.price_cents, None);
        assert_eq!(patch.image_url, Some(None));
    }

    #[test]
    fn test_patch_values_are_sanitised() {
        let patch = menu_patch(&JsonBody(Some(json!({
            "name": "  Diavola ",
            "price_cents": 850,
            "position": "3",
            "is_available": 0,
            "allergens": ["latte", "GLUTINE", "sabbia"]
        }))))
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("Diavola"));
        assert_eq!(patch.price_cents, Some(850));
        assert_eq!(patch.position, Some(3));
        assert_eq!(patch.is_available, Some(false));
        assert_eq!(
            patch.allergens.unwrap().to_tags(),
            vec!["glutine".to_string(), "latte".to_string()]
        );
    }

    #[test]
    fn test_availability_accepts_boolean_literals() {
        let patch = menu_patch(&JsonBody(Some(json!({"is_available": "false"})))).unwrap();
        assert_eq!(patch.is_available, Some(false));

        let patch = menu_patch(&JsonBody(Some(json!({"is_available": "on"})))).unwrap();
        assert_eq!(patch.is_available, Some(true));

        let err = menu_patch(&JsonBody(Some(json!({"is_available": "forse"})))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_bad_price_is_rejected() {
        let err = menu_patch(&JsonBody(Some(json!({"price_cents": "tanto"})))).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrice);
    }

    #[test]
    fn test_json_integer() {
        assert_eq!(json_integer(&json!(700)), Some(700));
        assert_eq!(json_integer(&json!(700.0)), Some(700));
        assert_eq!(json_integer(&json!(7.5)), None);
        assert_eq!(json_integer(&json!("700")), None);
    }
}
