//! Shared types for the steel quoting backend
//!
//! Data models (brands, weight profiles, products, quotes), request
//! payloads and the unified error system used by the server and its
//! clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorResponse};
