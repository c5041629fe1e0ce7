//! Single line calculation API

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/calculate/item", post(handler::calculate_item))
}
