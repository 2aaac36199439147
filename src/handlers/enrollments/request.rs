//! Enrollment review request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{constants::MAX_REJECTION_REASON_LENGTH, models::EnrollmentStatus};

/// Review status update applied to one enrollment
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: EnrollmentStatus,

    /// Required when the target status is rejected, ignored otherwise
    #[validate(length(min = 1, max = MAX_REJECTION_REASON_LENGTH))]
    pub rejection_reason: Option<String>,
}
