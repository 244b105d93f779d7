//! Generic page content with automatic English enrichment on admin writes

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Map, Value};
use shared::error::{AppError, ErrorCode};
use shared::models::Page;

use super::body::JsonBody;
use crate::error::ServiceResult;
use crate::pages::merge_into;
use crate::state::AppState;
use crate::translate::{AutoTranslate, UNTRANSLATED_SLUGS};

/// GET /api/page/{slug}
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ServiceResult<Json<Page>> {
    let page = state.db()?.get_page(&slug).await?;
    Ok(Json(page.unwrap_or_else(|| Page::empty(slug))))
}

/// Document with `_en` siblings filled in, or the submitted one when
/// translation is bypassed, unavailable or fails
async fn translated(state: &AppState, slug: &str, doc: Map<String, Value>) -> Map<String, Value> {
    if UNTRANSLATED_SLUGS.contains(&slug) {
        return doc;
    }
    let Some(translator) = state.translator.as_deref() else {
        tracing::debug!(slug = %slug, "No translator configured, storing as submitted");
        return doc;
    };

    let walker = AutoTranslate::new(&state.walk_rules, translator);
    match walker.enrich_object(&doc).await {
        Ok(enriched) => enriched,
        Err(e) => {
            tracing::warn!(slug = %slug, error = %e, "Auto-translation failed, storing untranslated");
            doc
        }
    }
}

/// PUT /api/admin/page/{slug}
pub async fn put_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: JsonBody,
) -> ServiceResult<Json<Page>> {
    let doc = body
        .into_object()
        .ok_or_else(|| AppError::new(ErrorCode::BodyNotObject))?;
    let db = state.db()?;

    let doc = translated(&state, &slug, doc).await;
    let page = merge_into(db, &slug, doc).await?;

    tracing::info!(slug = %slug, "Page content saved");
    Ok(Json(page))
}
