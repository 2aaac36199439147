//! Enrollment review handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppResult, services::EnrollmentService, state::AppState};

use super::{
    request::UpdateStatusRequest,
    response::{EnrollmentResponse, PaymentConfirmationResponse},
};

/// Apply a review status transition to an enrollment
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<EnrollmentResponse>> {
    payload.validate()?;

    let enrollment = EnrollmentService::update_status(
        state.db(),
        &id,
        payload.status,
        payload.rejection_reason,
    )
    .await?;

    Ok(Json(enrollment.into()))
}

/// Cashier payment confirmation for an enrollment
pub async fn register_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PaymentConfirmationResponse>> {
    let (enrollment, payments_updated) =
        EnrollmentService::register_payment(state.db(), &id).await?;

    Ok(Json(PaymentConfirmationResponse {
        enrollment: enrollment.into(),
        payments_updated,
        message: format!("{payments_updated} payment(s) marked as paid"),
    }))
}
