//! Vendor bill import API

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/import/vendor", post(handler::import_vendor))
}
