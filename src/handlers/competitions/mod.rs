//! Competition management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Competition routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_competitions))
        .route("/", post(handler::create_competition))
        .route("/{id}", put(handler::update_competition))
}
