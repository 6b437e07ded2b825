//! Member API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/admin/members", member_routes())
}

fn member_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/teams", get(handler::list_teams))
        .route("/interns", get(handler::list_interns))
        .route("/team/{id}", get(handler::get_team_member))
        .route("/intern/{id}", get(handler::get_intern_member))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
