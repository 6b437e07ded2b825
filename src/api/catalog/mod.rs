//! Catalog API module (technologies + offerings)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/admin/service-techs", tech_routes())
        .nest("/admin/service-offerings", offering_routes())
}

fn tech_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_techs).post(handler::create_tech))
        .route("/{id}", axum::routing::delete(handler::delete_tech))
}

fn offering_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list_offerings).post(handler::create_offering),
        )
        .route("/{id}", axum::routing::delete(handler::delete_offering))
}
