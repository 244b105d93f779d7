//! Content store gateway
//!
//! Keyed JSON page documents plus the menu-item and reservation relations.
//! Each operation is a single statement; there are no multi-statement
//! transactions, so concurrent writers are last-write-wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{
    MenuItem, MenuItemCreate, MenuItemUpdate, Page, Reservation, ReservationCreate,
    ReservationStatus, ReservationStatusChange,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub use crate::BoxError;

/// Keyed page documents (`site_pages`)
#[async_trait]
pub trait PageStore: Send + Sync {
    async fn get_page(&self, slug: &str) -> Result<Option<Page>, BoxError>;

    /// Insert or fully replace a document
    async fn put_page(&self, slug: &str, data: &Value) -> Result<Page, BoxError>;

    /// Insert a document only if the slug is free; `None` when it already exists
    async fn create_page(&self, slug: &str, data: &Value) -> Result<Option<Page>, BoxError>;

    async fn delete_page(&self, slug: &str) -> Result<bool, BoxError>;

    /// Documents whose slug starts with `prefix`, unordered
    async fn list_pages(&self, prefix: &str) -> Result<Vec<Page>, BoxError>;
}

/// Menu items (`menu_items`)
#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn list_available_items(&self) -> Result<Vec<MenuItem>, BoxError>;

    async fn create_item(&self, data: &MenuItemCreate) -> Result<MenuItem, BoxError>;

    /// Coalescing patch; `None` when the id is unknown
    async fn update_item(
        &self,
        id: i64,
        patch: &MenuItemUpdate,
    ) -> Result<Option<MenuItem>, BoxError>;

    async fn delete_item(&self, id: i64) -> Result<bool, BoxError>;
}

/// Reservations (`reservations`)
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn create_reservation(&self, data: &ReservationCreate) -> Result<Reservation, BoxError>;

    /// Newest first
    async fn list_reservations(&self, limit: i64) -> Result<Vec<Reservation>, BoxError>;

    async fn set_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<Option<ReservationStatusChange>, BoxError>;
}

/// Everything a request handler needs from the relational store
#[async_trait]
pub trait ContentStore: PageStore + MenuStore + ReservationStore {
    /// Liveness probe
    async fn ping(&self) -> Result<bool, BoxError>;
}
