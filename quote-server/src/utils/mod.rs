//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`ErrorResponse`] (from shared::error)
//! - logging setup, input validation, date helpers

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorResponse};
