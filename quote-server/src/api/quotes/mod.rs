//! Quote API module
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /api/quotes | GET | list (customerName, dateFrom, dateTo) |
//! | /api/quotes | POST | create |
//! | /api/quotes/preview | POST | totals without saving |
//! | /api/quotes/bulk-delete | POST | delete several |
//! | /api/quotes/{id} | GET / PUT / DELETE | single quote |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/quotes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/preview", post(handler::preview))
        .route("/bulk-delete", post(handler::bulk_delete))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
