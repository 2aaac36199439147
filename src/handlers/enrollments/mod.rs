//! Enrollment review handlers (admin/cashier actions)

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use axum::{
    Router,
    routing::{patch, post},
};

use crate::state::AppState;

/// Enrollment review routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/payments", post(handler::register_payment))
}
