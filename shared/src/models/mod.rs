//! Data models
//!
//! Shared between site-server and the website front-end (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.

pub mod allergen;
pub mod category_order;
pub mod menu_item;
pub mod page;
pub mod reservation;

// Re-exports
pub use allergen::*;
pub use category_order::*;
pub use menu_item::*;
pub use page::*;
pub use reservation::*;
