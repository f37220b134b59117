//! Business profile API module

mod handler;

use axum::{Router, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/business", business_routes())
}

fn business_routes() -> Router<ServerState> {
    Router::new()
        .route("/info", put(handler::update_info))
        .route("/logo", put(handler::update_logo))
}
