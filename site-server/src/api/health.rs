//! Health check endpoint

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /api/health: liveness plus a database round-trip
pub async fn health(State(state): State<AppState>) -> ServiceResult<Json<Value>> {
    let db = state.db()?.ping().await?;
    Ok(Json(json!({ "ok": true, "db": db })))
}
