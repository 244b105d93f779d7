//! In-memory content store
//!
//! Same observable behaviour as [`PgStore`](super::PgStore) without a
//! database. Used by the HTTP test-suite and for local runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use shared::models::{
    MenuItem, MenuItemCreate, MenuItemUpdate, Page, Reservation, ReservationCreate,
    ReservationStatus, ReservationStatusChange,
};

use super::{BoxError, ContentStore, MenuStore, PageStore, ReservationStore};

#[derive(Default)]
struct Tables {
    pages: BTreeMap<String, Page>,
    menu_items: BTreeMap<i64, MenuItem>,
    reservations: BTreeMap<i64, Reservation>,
    next_item_id: i64,
    next_reservation_id: i64,
}

/// Content store held in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn get_page(&self, slug: &str) -> Result<Option<Page>, BoxError> {
        Ok(self.tables.lock().pages.get(slug).cloned())
    }

    async fn put_page(&self, slug: &str, data: &Value) -> Result<Page, BoxError> {
        let page = Page {
            slug: slug.to_string(),
            data: data.clone(),
            updated_at: Some(Utc::now()),
        };
        self.tables
            .lock()
            .pages
            .insert(slug.to_string(), page.clone());
        Ok(page)
    }

    async fn create_page(&self, slug: &str, data: &Value) -> Result<Option<Page>, BoxError> {
        let mut tables = self.tables.lock();
        if tables.pages.contains_key(slug) {
            return Ok(None);
        }
        let page = Page {
            slug: slug.to_string(),
            data: data.clone(),
            updated_at: Some(Utc::now()),
        };
        tables.pages.insert(slug.to_string(), page.clone());
        Ok(Some(page))
    }

    async fn delete_page(&self, slug: &str) -> Result<bool, BoxError> {
        Ok(self.tables.lock().pages.remove(slug).is_some())
    }

    async fn list_pages(&self, prefix: &str) -> Result<Vec<Page>, BoxError> {
        Ok(self
            .tables
            .lock()
            .pages
            .values()
            .filter(|p| p.slug.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn list_available_items(&self) -> Result<Vec<MenuItem>, BoxError> {
        Ok(self
            .tables
            .lock()
            .menu_items
            .values()
            .filter(|item| item.is_available)
            .cloned()
            .collect())
    }

    async fn create_item(&self, data: &MenuItemCreate) -> Result<MenuItem, BoxError> {
        let mut tables = self.tables.lock();
        tables.next_item_id += 1;
        let item = MenuItem {
            id: tables.next_item_id,
            name: data.name.clone(),
            description: data.description.clone(),
            price_cents: data.price_cents,
            category: data.category.clone(),
            position: data.position,
            is_available: data.is_available,
            name_en: data.name_en.clone(),
            description_en: data.description_en.clone(),
            category_en: data.category_en.clone(),
            allergens: data.allergens.clone(),
            image_url: Some(data.image_url.clone()),
        };
        tables.menu_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item(
        &self,
        id: i64,
        patch: &MenuItemUpdate,
    ) -> Result<Option<MenuItem>, BoxError> {
        let mut tables = self.tables.lock();
        Ok(tables.menu_items.get_mut(&id).map(|item| {
            patch.apply_to(item);
            item.clone()
        }))
    }

    async fn delete_item(&self, id: i64) -> Result<bool, BoxError> {
        Ok(self.tables.lock().menu_items.remove(&id).is_some())
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn create_reservation(&self, data: &ReservationCreate) -> Result<Reservation, BoxError> {
        let mut tables = self.tables.lock();
        tables.next_reservation_id += 1;
        let reservation = Reservation {
            id: tables.next_reservation_id,
            created_at: Utc::now(),
            full_name: data.full_name.clone(),
            phone: data.phone.clone(),
            people: data.people,
            reserved_at: data.reserved_at,
            notes: data.notes.clone(),
            status: ReservationStatus::New,
        };
        tables
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn list_reservations(&self, limit: i64) -> Result<Vec<Reservation>, BoxError> {
        let mut rows: Vec<Reservation> =
            self.tables.lock().reservations.values().cloned().collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn set_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<Option<ReservationStatusChange>, BoxError> {
        let mut tables = self.tables.lock();
        Ok(tables.reservations.get_mut(&id).map(|r| {
            r.status = status;
            ReservationStatusChange { id, status }
        }))
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn ping(&self) -> Result<bool, BoxError> {
        Ok(true)
    }
}
