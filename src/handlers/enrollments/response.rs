//! Enrollment review response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Enrollment;

/// Enrollment representation
#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub competitor_id: Uuid,
    pub tutor_id: Uuid,
    pub competition_id: Uuid,
    pub modality_id: Uuid,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            id: enrollment.id,
            competitor_id: enrollment.competitor_id,
            tutor_id: enrollment.tutor_id,
            competition_id: enrollment.competition_id,
            modality_id: enrollment.modality_id,
            status: enrollment.status,
            rejection_reason: enrollment.rejection_reason,
            created_at: enrollment.created_at,
        }
    }
}

/// Cashier payment confirmation outcome
#[derive(Debug, Serialize)]
pub struct PaymentConfirmationResponse {
    pub enrollment: EnrollmentResponse,
    pub payments_updated: u64,
    pub message: String,
}
