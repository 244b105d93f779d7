//! Shared types for the restaurant site
//!
//! Domain models (menu, reservations, page documents) and the error
//! vocabulary used by `site-server` and any client of its API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
