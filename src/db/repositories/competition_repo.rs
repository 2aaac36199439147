//! Competition and stage repository

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    constants::STAGE_STATUS_ACTIVE,
    error::AppResult,
    models::{Competition, Stage},
};

/// Repository for competition and stage database operations
pub struct CompetitionRepository;

impl CompetitionRepository {
    /// Create a new competition
    pub async fn create(
        conn: &mut PgConnection,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        registration_opens: NaiveTime,
        registration_closes: NaiveTime,
        cost: Decimal,
        management_year: i32,
    ) -> AppResult<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            INSERT INTO competitions (
                name, start_date, end_date, registration_opens,
                registration_closes, cost, management_year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .bind(registration_opens)
        .bind(registration_closes)
        .bind(cost)
        .bind(management_year)
        .fetch_one(conn)
        .await?;

        Ok(competition)
    }

    /// Find competition by ID
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: &Uuid,
    ) -> AppResult<Option<Competition>> {
        let competition =
            sqlx::query_as::<_, Competition>(r#"SELECT * FROM competitions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(competition)
    }

    /// Find the active competition for a management year (latest wins)
    pub async fn find_active_by_year(
        conn: &mut PgConnection,
        management_year: i32,
    ) -> AppResult<Option<Competition>> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            SELECT * FROM competitions
            WHERE management_year = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(management_year)
        .fetch_optional(conn)
        .await?;

        Ok(competition)
    }

    /// List competitions, newest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            r#"SELECT * FROM competitions ORDER BY start_date DESC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(competitions)
    }

    /// Names starting with a prefix, for unique-name suffix generation
    pub async fn list_names_with_prefix(
        conn: &mut PgConnection,
        prefix: &str,
    ) -> AppResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"SELECT name FROM competitions WHERE name LIKE $1 || '%'"#,
        )
        .bind(prefix)
        .fetch_all(conn)
        .await?;

        Ok(names)
    }

    /// Whether any competition's date range collides with [start, end]
    pub async fn any_overlapping(
        conn: &mut PgConnection,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<&Uuid>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM competitions
                WHERE start_date <= $2 AND end_date >= $1
                  AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .bind(exclude_id)
        .fetch_one(conn)
        .await?;

        Ok(exists)
    }

    /// Update name and cost
    pub async fn update_name_cost(
        conn: &mut PgConnection,
        id: &Uuid,
        name: Option<&str>,
        cost: Option<Decimal>,
    ) -> AppResult<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            UPDATE competitions
            SET
                name = COALESCE($2, name),
                cost = COALESCE($3, cost),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(cost)
        .fetch_one(conn)
        .await?;

        Ok(competition)
    }

    /// Update the overall date range
    pub async fn update_dates(
        conn: &mut PgConnection,
        id: &Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            UPDATE competitions
            SET start_date = $2, end_date = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(conn)
        .await?;

        Ok(competition)
    }

    /// Link an area to a competition's eligibility scope
    pub async fn link_area(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        area_id: &Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO competition_areas (competition_id, area_id)
            VALUES ($1, $2)
            ON CONFLICT (competition_id, area_id) DO NOTHING
            "#,
        )
        .bind(competition_id)
        .bind(area_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Idempotent stage upsert keyed by (competition, name)
    pub async fn upsert_stage(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        name: &str,
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
        position: i32,
    ) -> AppResult<Stage> {
        let stage = sqlx::query_as::<_, Stage>(
            r#"
            INSERT INTO stages (
                competition_id, name, start_date, start_time,
                end_date, end_time, position, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (competition_id, name) DO UPDATE
            SET
                start_date = EXCLUDED.start_date,
                start_time = EXCLUDED.start_time,
                end_date = EXCLUDED.end_date,
                end_time = EXCLUDED.end_time,
                position = EXCLUDED.position
            RETURNING *
            "#,
        )
        .bind(competition_id)
        .bind(name)
        .bind(start_date)
        .bind(start_time)
        .bind(end_date)
        .bind(end_time)
        .bind(position)
        .bind(STAGE_STATUS_ACTIVE)
        .fetch_one(conn)
        .await?;

        Ok(stage)
    }

    /// List a competition's stages in sequence order
    pub async fn list_stages(
        conn: &mut PgConnection,
        competition_id: &Uuid,
    ) -> AppResult<Vec<Stage>> {
        let stages = sqlx::query_as::<_, Stage>(
            r#"SELECT * FROM stages WHERE competition_id = $1 ORDER BY position"#,
        )
        .bind(competition_id)
        .fetch_all(conn)
        .await?;

        Ok(stages)
    }

    /// Drop stages no longer present in a replacement stage list
    pub async fn delete_stages_not_in(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        keep_names: &[String],
    ) -> AppResult<()> {
        sqlx::query(
            r#"DELETE FROM stages WHERE competition_id = $1 AND name <> ALL($2)"#,
        )
        .bind(competition_id)
        .bind(keep_names)
        .execute(conn)
        .await?;

        Ok(())
    }
}
