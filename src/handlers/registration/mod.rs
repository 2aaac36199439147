//! Registration handlers: enrollment submission and form catalogs

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Registration routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(handler::enroll))
        .route("/tutors", post(handler::register_tutor))
        .route("/departments", get(handler::list_departments))
        .route(
            "/departments/{id}/municipalities",
            get(handler::list_municipalities),
        )
        .route("/areas", get(handler::list_areas))
        .route("/areas/levels", get(handler::area_levels))
}
