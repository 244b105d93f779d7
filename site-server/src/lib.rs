//! site-server: restaurant website and back-office API
//!
//! Serves menu data, reservations, homepage strips, the photo gallery and
//! editable page content out of Postgres and an S3-compatible bucket.
//! Admin-edited page text is enriched with English translations.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod listing;
pub mod pages;
pub mod sanitize;
pub mod state;
pub mod storage;
pub mod translate;
pub mod util;

pub use api::create_router;
pub use config::Config;
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
