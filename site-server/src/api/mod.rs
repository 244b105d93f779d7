//! API routes for site-server
//!
//! Route table, evaluated by the dispatch middleware in this order:
//! CORS preflight, image serving and upload (storage only), then the
//! database gate in front of every other route. CORS headers are set on
//! every response.

pub mod body;
pub mod booking;
pub mod gallery;
pub mod health;
pub mod image;
pub mod menu;
pub mod page;
pub mod reservations;
pub mod strip;

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post, put};
use axum::Router;
use http::{HeaderValue, Method, StatusCode, header};
use shared::error::AppError;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::admin_auth_middleware;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Back office (bearer token). Auth wraps the handlers only, so an
    // unrouted method still falls through to the uniform 404.
    let auth = middleware::from_fn_with_state(state.clone(), admin_auth_middleware);
    let admin = Router::new()
        .route(
            "/api/admin/menu/categories",
            put(menu::put_categories).route_layer(auth.clone()),
        )
        .route(
            "/api/admin/menu",
            post(menu::create_item).route_layer(auth.clone()),
        )
        .route(
            "/api/admin/menu/{id}",
            put(menu::update_item)
                .delete(menu::delete_item)
                .route_layer(auth.clone()),
        )
        .route(
            "/api/admin/settings/booking",
            put(booking::put_settings).route_layer(auth.clone()),
        )
        .route(
            "/api/admin/reservations",
            get(reservations::list).route_layer(auth.clone()),
        )
        .route(
            "/api/admin/reservations/{id}",
            put(reservations::set_status).route_layer(auth.clone()),
        )
        .route(
            "/api/admin/strip/create",
            post(strip::create)
                .put(strip::merge_static)
                .delete(strip::delete_static)
                .route_layer(auth.clone()),
        )
        .route(
            "/api/admin/strip/items",
            post(strip::add_item)
                .put(strip::merge_static)
                .delete(strip::delete_static)
                .route_layer(auth.clone()),
        )
        .route(
            "/api/admin/strip/{key}",
            put(strip::merge)
                .delete(strip::delete)
                .route_layer(auth.clone()),
        )
        .route(
            "/api/admin/page/{slug}",
            put(page::put_page).route_layer(auth.clone()),
        )
        .route(
            "/api/admin/gallery",
            post(gallery::replace).route_layer(auth.clone()),
        )
        .route(
            "/api/admin/gallery/upload",
            post(image::upload)
                .layer(DefaultBodyLimit::max(image::MAX_FILE_SIZE))
                .route_layer(auth),
        );

    // Public site
    let public = Router::new()
        .route("/img/{*key}", get(image::serve))
        .route("/api/health", any(health::health))
        .route("/api/menu", get(menu::list_menu))
        .route("/api/menu/categories", get(menu::get_categories))
        .route("/api/settings/booking", get(booking::get_settings))
        .route("/api/reservations", post(reservations::create))
        .route("/api/strip", get(strip::list_keys))
        .route("/api/strip/{key}", get(strip::get_strip))
        .route("/api/page/{slug}", get(page::get_page))
        .route("/api/gallery", get(gallery::list));

    Router::new()
        .merge(public)
        .merge(admin)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), dispatch))
        // CORS on every response, preflight and errors included
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,POST,PUT,DELETE,OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type,authorization"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::not_found()
}

/// Routes that only need the object store
fn is_storage_route(method: &Method, path: &str) -> bool {
    path.starts_with("/img/") || (method == Method::POST && path == "/api/admin/gallery/upload")
}

/// Preflight, database gate and uniform 404
async fn dispatch(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }

    if !is_storage_route(request.method(), request.uri().path()) && state.db.is_none() {
        return AppError::config_missing("DATABASE_URL missing").into_response();
    }

    let response = next.run(request).await;
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return AppError::not_found().into_response();
    }
    response
}

/// Numeric row id from a path segment; anything else matches no row
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse().map_err(|_| AppError::not_found())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_routes() {
        assert!(is_storage_route(&Method::GET, "/img/a.jpg"));
        assert!(is_storage_route(&Method::DELETE, "/img/a.jpg"));
        assert!(is_storage_route(&Method::POST, "/api/admin/gallery/upload"));
        assert!(!is_storage_route(&Method::GET, "/api/admin/gallery/upload"));
        assert!(!is_storage_route(&Method::GET, "/api/gallery"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("5").unwrap(), 5);
        assert_eq!(parse_id("abc").unwrap_err(), AppError::not_found());
    }
}
