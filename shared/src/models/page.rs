//! Page documents (keyed JSON content) and their well-known shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Slug of the menu category ordering document
pub const MENU_CATEGORIES_SLUG: &str = "menu_categories";
/// Slug of the booking settings document
pub const BOOKING_SLUG: &str = "booking";
/// Slug of the gallery document
pub const GALLERY_SLUG: &str = "gallery";
/// Slug prefix of homepage strip documents
pub const STRIP_PREFIX: &str = "strip_";

/// Stored page document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Page {
    pub slug: String,
    pub data: Value,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Placeholder returned for slugs that were never written
    pub fn empty(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            data: Value::Object(Map::new()),
            updated_at: None,
        }
    }
}

/// Homepage strip item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripItem {
    pub id: i64,
    pub name: String,
    pub image_url: String,
}

/// Homepage strip document (`strip_<key>`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripCategory {
    pub title: String,
    #[serde(default)]
    pub items: Vec<StripItem>,
}

impl StripCategory {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn slug_for(key: &str) -> String {
        format!("{STRIP_PREFIX}{key}")
    }
}

/// Gallery document (full-replace only)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImages {
    #[serde(default)]
    pub images: Vec<String>,
}

/// Public booking toggle and contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSettings {
    pub enabled: bool,
    pub whatsapp: String,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            whatsapp: String::new(),
        }
    }
}
