//! PostgreSQL implementation of the content store

mod menu_items;
mod pages;
mod reservations;

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{
    MenuItem, MenuItemCreate, MenuItemUpdate, Page, Reservation, ReservationCreate,
    ReservationStatus, ReservationStatusChange,
};
use sqlx::PgPool;

use super::{BoxError, ContentStore, MenuStore, PageStore, ReservationStore};

/// Content store backed by a Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageStore for PgStore {
    async fn get_page(&self, slug: &str) -> Result<Option<Page>, BoxError> {
        pages::get(&self.pool, slug).await
    }

    async fn put_page(&self, slug: &str, data: &Value) -> Result<Page, BoxError> {
        pages::upsert(&self.pool, slug, data).await
    }

    async fn create_page(&self, slug: &str, data: &Value) -> Result<Option<Page>, BoxError> {
        pages::insert_new(&self.pool, slug, data).await
    }

    async fn delete_page(&self, slug: &str) -> Result<bool, BoxError> {
        pages::delete(&self.pool, slug).await
    }

    async fn list_pages(&self, prefix: &str) -> Result<Vec<Page>, BoxError> {
        pages::list_by_prefix(&self.pool, prefix).await
    }
}

#[async_trait]
impl MenuStore for PgStore {
    async fn list_available_items(&self) -> Result<Vec<MenuItem>, BoxError> {
        menu_items::list_available(&self.pool).await
    }

    async fn create_item(&self, data: &MenuItemCreate) -> Result<MenuItem, BoxError> {
        menu_items::create(&self.pool, data).await
    }

    async fn update_item(
        &self,
        id: i64,
        patch: &MenuItemUpdate,
    ) -> Result<Option<MenuItem>, BoxError> {
        menu_items::update(&self.pool, id, patch).await
    }

    async fn delete_item(&self, id: i64) -> Result<bool, BoxError> {
        menu_items::delete(&self.pool, id).await
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn create_reservation(&self, data: &ReservationCreate) -> Result<Reservation, BoxError> {
        reservations::create(&self.pool, data).await
    }

    async fn list_reservations(&self, limit: i64) -> Result<Vec<Reservation>, BoxError> {
        reservations::list_recent(&self.pool, limit).await
    }

    async fn set_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<Option<ReservationStatusChange>, BoxError> {
        reservations::set_status(&self.pool, id, status).await
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn ping(&self) -> Result<bool, BoxError> {
        let (ok,): (i32,) = sqlx::query_as("SELECT 1::int4")
            .fetch_one(&self.pool)
            .await?;
        Ok(ok == 1)
    }
}
