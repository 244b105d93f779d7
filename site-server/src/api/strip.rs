//! Homepage strips: named blocks of image + name items (`strip_<key>` pages)

use std::sync::LazyLock;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use regex::Regex;
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::{Page, STRIP_PREFIX, StripCategory, StripItem};

use super::body::JsonBody;
use crate::BoxError;
use crate::error::ServiceResult;
use crate::pages::merge_into;
use crate::sanitize::clean_str;
use crate::state::AppState;
use crate::util::now_millis;

static STRIP_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]{2,30}$").expect("valid regex"));

/// Listing rank from `data.order`; `None` sorts last
fn strip_rank(data: &Value) -> Option<i64> {
    match data.get("order")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Keys of stored strips, by `order` then slug
fn ordered_keys(mut pages: Vec<Page>) -> Vec<String> {
    pages.sort_by(|a, b| {
        let (ra, rb) = (strip_rank(&a.data), strip_rank(&b.data));
        (ra.is_none(), ra, &a.slug).cmp(&(rb.is_none(), rb, &b.slug))
    });
    pages
        .into_iter()
        .filter_map(|p| p.slug.strip_prefix(STRIP_PREFIX).map(str::to_string))
        .filter(|k| !k.is_empty())
        .collect()
}

/// GET /api/strip
pub async fn list_keys(State(state): State<AppState>) -> ServiceResult<Json<Value>> {
    let pages = state.db()?.list_pages(STRIP_PREFIX).await?;
    Ok(Json(json!({ "keys": ordered_keys(pages) })))
}

/// GET /api/strip/{key}
pub async fn get_strip(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServiceResult<Json<Value>> {
    let page = state.db()?.get_page(&StripCategory::slug_for(&key)).await?;
    Ok(Json(json!({ "data": page.map(|p| p.data) })))
}

/// PUT /api/admin/strip/{key}: shallow merge of a JSON object
pub async fn merge(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: JsonBody,
) -> ServiceResult<Json<Value>> {
    merge_key(&state, &key, body).await
}

/// PUT on `/api/admin/strip/create` and `/api/admin/strip/items`
///
/// Those paths name strips too (`strip_create`, `strip_items`).
pub async fn merge_static(
    State(state): State<AppState>,
    uri: Uri,
    body: JsonBody,
) -> ServiceResult<Json<Value>> {
    merge_key(&state, last_segment(&uri), body).await
}

async fn merge_key(state: &AppState, key: &str, body: JsonBody) -> ServiceResult<Json<Value>> {
    let patch = body
        .into_object()
        .ok_or_else(|| AppError::new(ErrorCode::BodyNotObject))?;
    let slug = StripCategory::slug_for(key);
    merge_into(state.db()?, &slug, patch).await?;

    tracing::info!(slug = %slug, "Strip updated");
    Ok(Json(json!({ "ok": true })))
}

/// DELETE /api/admin/strip/{key}
pub async fn delete(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServiceResult<Json<Value>> {
    delete_key(&state, &key).await
}

/// DELETE on the static strip paths
pub async fn delete_static(State(state): State<AppState>, uri: Uri) -> ServiceResult<Json<Value>> {
    delete_key(&state, last_segment(&uri)).await
}

async fn delete_key(state: &AppState, key: &str) -> ServiceResult<Json<Value>> {
    let slug = StripCategory::slug_for(key);
    if !state.db()?.delete_page(&slug).await? {
        return Err(AppError::new(ErrorCode::StripNotFound).into());
    }
    tracing::info!(slug = %slug, "Strip deleted");
    Ok(Json(json!({ "ok": true, "slug": slug })))
}

fn last_segment(uri: &Uri) -> &str {
    uri.path().rsplit('/').next().unwrap_or_default()
}

/// POST /api/admin/strip/create: empty strip, never overwrites
pub async fn create(
    State(state): State<AppState>,
    body: JsonBody,
) -> ServiceResult<(StatusCode, Json<Value>)> {
    let key = clean_str(body.get("key")).to_lowercase();
    let title = clean_str(body.get("title"));

    if key.is_empty() {
        return Err(AppError::required("key required").into());
    }
    if !STRIP_KEY.is_match(&key) {
        return Err(AppError::new(ErrorCode::InvalidStripKey).into());
    }

    let slug = StripCategory::slug_for(&key);
    let strip = StripCategory::new(if title.is_empty() { key.clone() } else { title });
    let data = serde_json::to_value(&strip).map_err(BoxError::from)?;

    let Some(page) = state.db()?.create_page(&slug, &data).await? else {
        return Err(AppError::new(ErrorCode::StripAlreadyExists).into());
    };

    tracing::info!(slug = %slug, "Strip created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "slug": page.slug, "data": page.data })),
    ))
}

/// POST /api/admin/strip/items: append one item, creating the strip if needed
pub async fn add_item(
    State(state): State<AppState>,
    body: JsonBody,
) -> ServiceResult<Json<Value>> {
    let key = clean_str(body.get("key")).to_lowercase();
    let name = clean_str(body.get("name"));
    let image_url = clean_str(body.get("image_url"));

    for (field, value) in [("key", &key), ("name", &name), ("image_url", &image_url)] {
        if value.is_empty() {
            return Err(AppError::required(format!("{field} required")).into());
        }
    }

    let db = state.db()?;
    let slug = StripCategory::slug_for(&key);
    let mut current = db
        .get_page(&slug)
        .await?
        .and_then(|p| match p.data {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .unwrap_or_default();

    let item = StripItem {
        id: now_millis(),
        name,
        image_url,
    };

    let mut items = match current.remove("items") {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    items.push(serde_json::to_value(&item).map_err(BoxError::from)?);
    current.insert("items".to_string(), Value::Array(items));

    db.put_page(&slug, &Value::Object(current)).await?;

    tracing::info!(slug = %slug, id = item.id, "Strip item added");
    Ok(Json(json!({ "ok": true, "item": item })))
}
