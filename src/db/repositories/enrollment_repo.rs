//! Enrollment and payment repository

use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Enrollment, EnrollmentStatus, Payment, PaymentStatus},
};

/// Repository for enrollment and payment database operations
pub struct EnrollmentRepository;

impl EnrollmentRepository {
    /// Create an enrollment with status pending
    pub async fn insert(
        conn: &mut PgConnection,
        competitor_id: &Uuid,
        tutor_id: &Uuid,
        competition_id: &Uuid,
        modality_id: &Uuid,
    ) -> AppResult<Enrollment> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (competitor_id, tutor_id, competition_id, modality_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(competitor_id)
        .bind(tutor_id)
        .bind(competition_id)
        .bind(modality_id)
        .fetch_one(conn)
        .await?;

        Ok(enrollment)
    }

    /// Find enrollment by ID
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: &Uuid,
    ) -> AppResult<Option<Enrollment>> {
        let enrollment =
            sqlx::query_as::<_, Enrollment>(r#"SELECT * FROM enrollments WHERE id = $1"#)
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(enrollment)
    }

    /// Apply a review status; the rejection reason is stored only for
    /// rejections and cleared on every other target.
    pub async fn update_status(
        conn: &mut PgConnection,
        id: &Uuid,
        status: EnrollmentStatus,
        rejection_reason: Option<&str>,
    ) -> AppResult<Enrollment> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            UPDATE enrollments
            SET status = $2, rejection_reason = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(rejection_reason)
        .fetch_one(conn)
        .await?;

        Ok(enrollment)
    }

    /// Create the pending payment attached to an enrollment
    pub async fn insert_payment(
        conn: &mut PgConnection,
        enrollment_id: &Uuid,
        amount: Decimal,
    ) -> AppResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (enrollment_id, amount)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(enrollment_id)
        .bind(amount)
        .fetch_one(conn)
        .await?;

        Ok(payment)
    }

    /// Mark all of an enrollment's payments paid; returns affected rows
    pub async fn mark_payments_paid(
        conn: &mut PgConnection,
        enrollment_id: &Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"UPDATE payments SET status = $2 WHERE enrollment_id = $1 AND status = $3"#,
        )
        .bind(enrollment_id)
        .bind(PaymentStatus::Paid.as_str())
        .bind(PaymentStatus::Pending.as_str())
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }
}
