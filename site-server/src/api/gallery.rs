//! Photo gallery (single `gallery` page, full replace)

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use shared::error::AppError;
use shared::models::{GALLERY_SLUG, GalleryImages};

use super::body::JsonBody;
use crate::BoxError;
use crate::error::ServiceResult;
use crate::sanitize::clean_str;
use crate::state::AppState;

/// GET /api/gallery
pub async fn list(State(state): State<AppState>) -> ServiceResult<Json<Value>> {
    let page = state.db()?.get_page(GALLERY_SLUG).await?;
    let images = page
        .and_then(|p| p.data.get("images").filter(|v| v.is_array()).cloned())
        .unwrap_or_else(|| json!([]));
    Ok(Json(json!({ "images": images })))
}

/// POST /api/admin/gallery
pub async fn replace(
    State(state): State<AppState>,
    body: JsonBody,
) -> ServiceResult<Json<Value>> {
    let images: Vec<String> = body
        .get("images")
        .as_array()
        .map(|urls| {
            urls.iter()
                .map(clean_str)
                .filter(|u| !u.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if images.is_empty() {
        return Err(AppError::validation("images array required").into());
    }

    let gallery = GalleryImages { images };
    let data = serde_json::to_value(&gallery).map_err(BoxError::from)?;
    state.db()?.put_page(GALLERY_SLUG, &data).await?;

    tracing::info!(count = gallery.images.len(), "Gallery replaced");
    Ok(Json(json!({ "ok": true, "count": gallery.images.len() })))
}
