//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod competitions;
pub mod enrollments;
pub mod health;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/registration", registration::routes())
        .nest("/competitions", competitions::routes())
        .nest("/enrollments", enrollments::routes())
}
