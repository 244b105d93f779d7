//! `reservations` queries

use shared::models::{Reservation, ReservationCreate, ReservationStatus, ReservationStatusChange};
use sqlx::PgPool;

use super::BoxError;

pub async fn create(pool: &PgPool, data: &ReservationCreate) -> Result<Reservation, BoxError> {
    let row: Reservation = sqlx::query_as(
        r#"
        INSERT INTO reservations (full_name, phone, people, reserved_at, notes, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, created_at, full_name, phone, people, reserved_at, notes, status
        "#,
    )
    .bind(&data.full_name)
    .bind(&data.phone)
    .bind(data.people)
    .bind(data.reserved_at)
    .bind(&data.notes)
    .bind(ReservationStatus::New.as_str())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Reservation>, BoxError> {
    let rows: Vec<Reservation> = sqlx::query_as(
        r#"
        SELECT id, created_at, full_name, phone, people, reserved_at, notes, status
        FROM reservations
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn set_status(
    pool: &PgPool,
    id: i64,
    status: ReservationStatus,
) -> Result<Option<ReservationStatusChange>, BoxError> {
    let row: Option<(i64, String)> = sqlx::query_as(
        "UPDATE reservations SET status = $1 WHERE id = $2 RETURNING id, status",
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some((id, status)) => Ok(Some(ReservationStatusChange {
            id,
            status: ReservationStatus::try_from(status)?,
        })),
        None => Ok(None),
    }
}
