//! Static bearer-token check for back-office routes
//!
//! Plain string equality against `ADMIN_TOKEN`. A blank configured secret
//! fails closed.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{HeaderMap, header};
use shared::error::AppError;

use crate::state::AppState;

/// Token carried by an `Authorization` header, `Bearer ` prefix removed
fn bearer_token(headers: &HeaderMap) -> &str {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let token = match raw.get(..6) {
        Some(scheme)
            if scheme.eq_ignore_ascii_case("bearer")
                && raw[6..].starts_with(char::is_whitespace) =>
        {
            &raw[6..]
        }
        _ => raw,
    };
    token.trim()
}

/// Whether the request carries the admin secret
pub fn is_admin(headers: &HeaderMap, secret: &str) -> bool {
    let secret = secret.trim();
    !secret.is_empty() && bearer_token(headers) == secret
}

/// Middleware guarding `/api/admin/*`
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    if !is_admin(request.headers(), &state.admin_token) {
        tracing::debug!(path = %request.uri().path(), "Admin check failed");
        return Err(AppError::unauthorized().into_response());
    }
    Ok(next.run(request).await)
}
