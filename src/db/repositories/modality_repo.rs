//! Modality repository
//!
//! Modalities are only ever find-or-created. Creation uses
//! `ON CONFLICT DO NOTHING RETURNING *`: a concurrent insert makes the
//! statement return no row, and the caller re-reads instead of failing.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{error::AppResult, models::Modality};

/// Repository for modality find-or-create operations
pub struct ModalityRepository;

impl ModalityRepository {
    /// Find modality keyed by (competition, area, grade)
    pub async fn find_by_grade(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        area_id: &Uuid,
        grade_id: &Uuid,
    ) -> AppResult<Option<Modality>> {
        let modality = sqlx::query_as::<_, Modality>(
            r#"
            SELECT * FROM modalities
            WHERE competition_id = $1 AND area_id = $2 AND grade_id = $3
            "#,
        )
        .bind(competition_id)
        .bind(area_id)
        .bind(grade_id)
        .fetch_optional(conn)
        .await?;

        Ok(modality)
    }

    /// Find modality keyed by (competition, area, special level)
    pub async fn find_by_special_level(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        area_id: &Uuid,
        special_level_id: &Uuid,
    ) -> AppResult<Option<Modality>> {
        let modality = sqlx::query_as::<_, Modality>(
            r#"
            SELECT * FROM modalities
            WHERE competition_id = $1 AND area_id = $2 AND special_level_id = $3
            "#,
        )
        .bind(competition_id)
        .bind(area_id)
        .bind(special_level_id)
        .fetch_optional(conn)
        .await?;

        Ok(modality)
    }

    /// Insert a grade modality; `None` means a concurrent transaction won
    /// the race and the row should be re-read.
    pub async fn insert_for_grade(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        area_id: &Uuid,
        grade_id: &Uuid,
    ) -> AppResult<Option<Modality>> {
        let modality = sqlx::query_as::<_, Modality>(
            r#"
            INSERT INTO modalities (competition_id, area_id, grade_id)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            RETURNING *
            "#,
        )
        .bind(competition_id)
        .bind(area_id)
        .bind(grade_id)
        .fetch_optional(conn)
        .await?;

        Ok(modality)
    }

    /// Insert a special-level modality; `None` on a lost race.
    pub async fn insert_for_special_level(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        area_id: &Uuid,
        special_level_id: &Uuid,
    ) -> AppResult<Option<Modality>> {
        let modality = sqlx::query_as::<_, Modality>(
            r#"
            INSERT INTO modalities (competition_id, area_id, special_level_id)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            RETURNING *
            "#,
        )
        .bind(competition_id)
        .bind(area_id)
        .bind(special_level_id)
        .fetch_optional(conn)
        .await?;

        Ok(modality)
    }
}
