//! Image upload and public serving through the object store
//!
//! - `POST /api/admin/gallery/upload`: multipart `file` stored as `gal_<millis>_<hex>.<ext>`
//! - `GET /img/{key}`: stored blob, cached for a day

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, HeaderValue, StatusCode, header};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};

use crate::error::ServiceResult;
use crate::state::AppState;
use crate::storage::{self, SUPPORTED_FORMATS};

/// Maximum upload size (20MB)
pub const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

const CACHE_CONTROL: &str = "public, max-age=86400";

/// Upload response
#[derive(Serialize)]
pub struct ImageUploadResponse {
    pub ok: bool,
    pub key: String,
    pub url: String,
}

/// Origin for public URLs: configured base, else the request's host
fn request_origin(headers: &HeaderMap, public_base_url: Option<&str>) -> String {
    if let Some(base) = public_base_url {
        return base.to_string();
    }
    let header_str = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let proto = header_str("x-forwarded-proto").unwrap_or("http");
    let host = header_str("host").unwrap_or("localhost");
    format!("{proto}://{host}")
}

/// POST /api/admin/gallery/upload
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServiceResult<Response> {
    let objects = state.objects()?;

    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("multipart/form-data"));
    let mut multipart = match multipart {
        Ok(m) if is_multipart => m,
        _ => return Err(AppError::invalid_request("Use multipart/form-data").into()),
    };

    let mut file: Option<(String, axum::body::Bytes)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
    })? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let data = field.bytes().await.map_err(|e| {
                AppError::with_message(ErrorCode::InvalidRequest, format!("Read error: {e}"))
            })?;
            file = Some((file_name, data));
            break;
        }
    }

    let (file_name, data) = file.ok_or_else(|| AppError::required("file missing"))?;

    let ext = storage::upload_extension(&file_name);
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::new(ErrorCode::ImageFormatUnsupported).into());
    }

    let key = storage::upload_key(&ext);
    objects
        .put(&key, data, storage::content_type_for(&ext))
        .await?;

    let origin = request_origin(&headers, state.public_base_url.as_deref());
    let url = format!("{origin}/img/{key}");

    tracing::info!(key = %key, "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(ImageUploadResponse { ok: true, key, url }),
    )
        .into_response())
}

fn plain(status: StatusCode, text: &'static str) -> Response {
    (status, text).into_response()
}

/// GET /img/{key}
pub async fn serve(State(state): State<AppState>, Path(key): Path<String>) -> ServiceResult<Response> {
    let Some(objects) = state.objects.as_deref() else {
        return Ok(plain(StatusCode::INTERNAL_SERVER_ERROR, "Bucket binding missing"));
    };
    let Some(object) = objects.get(&key).await? else {
        return Ok(plain(StatusCode::NOT_FOUND, "Not found"));
    };

    let mut response = Response::new(Body::from(object.body));
    let headers = response.headers_mut();
    if let Some(ct) = object
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
    {
        headers.insert(header::CONTENT_TYPE, ct);
    }
    if let Ok(etag) = HeaderValue::from_str(&object.etag) {
        headers.insert(header::ETAG, etag);
    }
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    Ok(response)
}
