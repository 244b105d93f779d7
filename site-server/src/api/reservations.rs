//! Reservations: public booking form and back-office status handling

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::{PARTY_SIZE_RANGE, ReservationCreate, ReservationStatus, minute_format};

use super::body::JsonBody;
use super::parse_id;
use crate::error::ServiceResult;
use crate::sanitize::{clean_str, coerce_integer, coerce_number, is_truthy};
use crate::state::AppState;

const DEFAULT_PARTY_SIZE: i32 = 2;
const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 200;

/// Party size; a falsy value means the default of two
fn party_size(v: &Value) -> Result<i32, AppError> {
    if !is_truthy(v) {
        return Ok(DEFAULT_PARTY_SIZE);
    }
    coerce_integer(v)
        .and_then(|n| i32::try_from(n).ok())
        .filter(|n| PARTY_SIZE_RANGE.contains(n))
        .ok_or_else(|| AppError::new(ErrorCode::InvalidPartySize))
}

/// `date` + `time` as one timestamp (`HH:MM` or `HH:MM:SS`)
fn reserved_at(date: &str, time: &str) -> Result<NaiveDateTime, AppError> {
    let raw = format!("{date} {time}");
    NaiveDateTime::parse_from_str(&raw, minute_format::FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| AppError::new(ErrorCode::InvalidReservationTime))
}

/// POST /api/reservations
pub async fn create(
    State(state): State<AppState>,
    body: JsonBody,
) -> ServiceResult<(StatusCode, Json<Value>)> {
    let full_name = clean_str(body.get("name"));
    let phone = clean_str(body.get("phone"));
    let date = clean_str(body.get("date"));
    let time = clean_str(body.get("time"));
    let notes = Some(clean_str(body.get("notes"))).filter(|n| !n.is_empty());

    if full_name.is_empty() || phone.is_empty() || date.is_empty() || time.is_empty() {
        return Err(AppError::required("name, phone, date, time required").into());
    }
    let people = party_size(body.get("people"))?;
    let reserved_at = reserved_at(&date, &time)?;

    let reservation = state
        .db()?
        .create_reservation(&ReservationCreate {
            full_name,
            phone,
            people,
            reserved_at,
            notes,
        })
        .await?;

    tracing::info!(id = reservation.id, people, "Reservation received");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "reservation": reservation })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
}

/// Requested page size: default 50, at most 200, at least 1
fn list_limit(raw: Option<&str>) -> i64 {
    let requested = raw
        .map(|s| coerce_number(&Value::String(s.to_string())).unwrap_or(0.0))
        .filter(|n| *n != 0.0)
        .map(|n| n.trunc() as i64)
        .unwrap_or(DEFAULT_LIST_LIMIT);
    requested.clamp(1, MAX_LIST_LIMIT)
}

/// GET /api/admin/reservations?limit=N: newest first
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ServiceResult<Json<Value>> {
    let limit = list_limit(params.limit.as_deref());
    let reservations = state.db()?.list_reservations(limit).await?;
    Ok(Json(json!({ "reservations": reservations })))
}

/// PUT /api/admin/reservations/{id}
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> ServiceResult<Json<Value>> {
    let status = ReservationStatus::parse(&clean_str(body.get("status")))
        .ok_or_else(|| AppError::new(ErrorCode::InvalidReservationStatus))?;
    let id = parse_id(&id)?;

    let change = state
        .db()?
        .set_reservation_status(id, status)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound))?;

    tracing::info!(id, status = %status, "Reservation status changed");
    Ok(Json(json!({ "ok": true, "reservation": change })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_size() {
        assert_eq!(party_size(&Value::Null).unwrap(), 2);
        assert_eq!(party_size(&json!(0)).unwrap(), 2);
        assert_eq!(party_size(&json!("")).unwrap(), 2);
        assert_eq!(party_size(&json!(4)).unwrap(), 4);
        assert_eq!(party_size(&json!("30")).unwrap(), 30);
        assert_eq!(party_size(&json!(31)).unwrap_err().code, ErrorCode::InvalidPartySize);
        assert_eq!(party_size(&json!(-1)).unwrap_err().code, ErrorCode::InvalidPartySize);
        assert_eq!(party_size(&json!(2.5)).unwrap_err().code, ErrorCode::InvalidPartySize);
        assert_eq!(party_size(&json!("tanti")).unwrap_err().code, ErrorCode::InvalidPartySize);
    }

    #[test]
    fn test_reserved_at() {
        let at = reserved_at("2024-01-01", "20:00").unwrap();
        assert_eq!(at.format(minute_format::FORMAT).to_string(), "2024-01-01 20:00");
        assert!(reserved_at("2024-01-01", "20:00:30").is_ok());
        assert!(reserved_at("2024-13-01", "20:00").is_err());
        assert!(reserved_at("domani", "sera").is_err());
    }

    #[test]
    fn test_list_limit() {
        assert_eq!(list_limit(None), 50);
        assert_eq!(list_limit(Some("")), 50);
        assert_eq!(list_limit(Some("0")), 50);
        assert_eq!(list_limit(Some("abc")), 50);
        assert_eq!(list_limit(Some("10")), 10);
        assert_eq!(list_limit(Some("1000")), 200);
        assert_eq!(list_limit(Some("-5")), 1);
    }
}
