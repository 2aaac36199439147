//! Enrollment review service
//!
//! Review actions mutate the enrollment state machine; the cashier flow
//! additionally settles the attached payments and promotes a verified
//! enrollment to accepted in the same transaction.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::EnrollmentRepository,
    error::{AppError, AppResult},
    models::{Enrollment, EnrollmentStatus},
};

/// Enrollment review service
pub struct EnrollmentService;

impl EnrollmentService {
    /// Apply a review status transition. Rejections require a non-empty
    /// reason; every other target clears the stored reason.
    pub async fn update_status(
        pool: &PgPool,
        id: &Uuid,
        target: EnrollmentStatus,
        rejection_reason: Option<String>,
    ) -> AppResult<Enrollment> {
        let mut tx = pool.begin().await?;

        let enrollment = EnrollmentRepository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Enrollment {id} not found")))?;

        let current = enrollment.status().ok_or_else(|| {
            AppError::Database(format!(
                "Enrollment {id} carries unknown status '{}'",
                enrollment.status
            ))
        })?;

        if !current.can_transition_to(target) {
            return Err(AppError::InvalidStatus {
                from: current.to_string(),
                to: target.to_string(),
            });
        }

        let reason = normalize_reason(target, rejection_reason)?;

        let updated =
            EnrollmentRepository::update_status(&mut tx, id, target, reason.as_deref()).await?;

        tx.commit().await?;

        tracing::info!(enrollment_id = %id, from = %current, to = %target, "enrollment status updated");

        Ok(updated)
    }

    /// Cashier payment confirmation: settle the enrollment's pending
    /// payments and promote a verified enrollment to accepted.
    pub async fn register_payment(pool: &PgPool, id: &Uuid) -> AppResult<(Enrollment, u64)> {
        let mut tx = pool.begin().await?;

        let enrollment = EnrollmentRepository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Enrollment {id} not found")))?;

        let updated_count = EnrollmentRepository::mark_payments_paid(&mut tx, id).await?;
        if updated_count == 0 {
            return Err(AppError::NotFound(format!(
                "No pending payments for enrollment {id}"
            )));
        }

        let enrollment = if enrollment.status() == Some(EnrollmentStatus::Verified) {
            EnrollmentRepository::update_status(&mut tx, id, EnrollmentStatus::Accepted, None)
                .await?
        } else {
            enrollment
        };

        tx.commit().await?;

        tracing::info!(enrollment_id = %id, payments = updated_count, "payments settled");

        Ok((enrollment, updated_count))
    }
}

/// A rejection stores its (non-blank) reason; every other target clears
/// whatever reason was stored before.
fn normalize_reason(
    target: EnrollmentStatus,
    rejection_reason: Option<String>,
) -> AppResult<Option<String>> {
    match target {
        EnrollmentStatus::Rejected => {
            let reason = rejection_reason
                .map(|reason| reason.trim().to_string())
                .filter(|reason| !reason.is_empty())
                .ok_or_else(|| {
                    AppError::Validation(
                        "A rejection reason is required to reject an enrollment".to_string(),
                    )
                })?;
            Ok(Some(reason))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_requires_reason() {
        assert!(matches!(
            normalize_reason(EnrollmentStatus::Rejected, None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            normalize_reason(EnrollmentStatus::Rejected, Some("   ".to_string())),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejection_reason_is_trimmed_and_stored() {
        let reason = normalize_reason(
            EnrollmentStatus::Rejected,
            Some("  documento ilegible ".to_string()),
        )
        .unwrap();
        assert_eq!(reason.as_deref(), Some("documento ilegible"));
    }

    #[test]
    fn test_other_targets_clear_the_reason() {
        for target in [
            EnrollmentStatus::Pending,
            EnrollmentStatus::Verified,
            EnrollmentStatus::Accepted,
        ] {
            let reason =
                normalize_reason(target, Some("documento ilegible".to_string())).unwrap();
            assert_eq!(reason, None);
        }
    }
}
