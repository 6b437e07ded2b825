//! Upload API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/admin/uploads", upload_routes())
}

fn upload_routes() -> Router<ServerState> {
    Router::new()
        .route("/signature", post(handler::signature))
        .route("/image", post(handler::upload_image))
}
