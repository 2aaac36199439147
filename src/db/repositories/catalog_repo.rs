//! Academic catalog repository
//!
//! Read-only during registration; rows are created by seed tooling.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Area, Cycle, Department, Grade, Municipality, SpecialLevel},
};

/// Repository for catalog lookups
pub struct CatalogRepository;

impl CatalogRepository {
    /// Find area by name (case-insensitive)
    pub async fn find_area_by_name(
        conn: &mut PgConnection,
        name: &str,
    ) -> AppResult<Option<Area>> {
        let area = sqlx::query_as::<_, Area>(r#"SELECT * FROM areas WHERE LOWER(name) = LOWER($1)"#)
            .bind(name)
            .fetch_optional(conn)
            .await?;

        Ok(area)
    }

    /// List all areas
    pub async fn list_areas(pool: &PgPool) -> AppResult<Vec<Area>> {
        let areas = sqlx::query_as::<_, Area>(r#"SELECT * FROM areas ORDER BY name"#)
            .fetch_all(pool)
            .await?;

        Ok(areas)
    }

    /// Find grade by (number, cycle)
    pub async fn find_grade_by_number_cycle(
        conn: &mut PgConnection,
        number: i32,
        cycle: Cycle,
    ) -> AppResult<Option<Grade>> {
        let grade =
            sqlx::query_as::<_, Grade>(r#"SELECT * FROM grades WHERE number = $1 AND cycle = $2"#)
                .bind(number)
                .bind(cycle.as_str())
                .fetch_optional(conn)
                .await?;

        Ok(grade)
    }

    /// List the special levels owned by an area
    pub async fn list_special_levels_by_area(
        conn: &mut PgConnection,
        area_id: &Uuid,
    ) -> AppResult<Vec<SpecialLevel>> {
        let levels = sqlx::query_as::<_, SpecialLevel>(
            r#"SELECT * FROM special_levels WHERE area_id = $1 ORDER BY name"#,
        )
        .bind(area_id)
        .fetch_all(conn)
        .await?;

        Ok(levels)
    }

    /// Find a special level by exact name within an area (case-insensitive)
    pub async fn find_special_level_by_name(
        conn: &mut PgConnection,
        area_id: &Uuid,
        name: &str,
    ) -> AppResult<Option<SpecialLevel>> {
        let level = sqlx::query_as::<_, SpecialLevel>(
            r#"SELECT * FROM special_levels WHERE area_id = $1 AND LOWER(name) = LOWER($2)"#,
        )
        .bind(area_id)
        .bind(name)
        .fetch_optional(conn)
        .await?;

        Ok(level)
    }

    /// List all departments
    pub async fn list_departments(pool: &PgPool) -> AppResult<Vec<Department>> {
        let departments =
            sqlx::query_as::<_, Department>(r#"SELECT * FROM departments ORDER BY name"#)
                .fetch_all(pool)
                .await?;

        Ok(departments)
    }

    /// List the municipalities of a department
    pub async fn list_municipalities_by_department(
        pool: &PgPool,
        department_id: &Uuid,
    ) -> AppResult<Vec<Municipality>> {
        let municipalities = sqlx::query_as::<_, Municipality>(
            r#"SELECT * FROM municipalities WHERE department_id = $1 ORDER BY name"#,
        )
        .bind(department_id)
        .fetch_all(pool)
        .await?;

        Ok(municipalities)
    }

    /// Find municipality by id
    pub async fn find_municipality_by_id(
        conn: &mut PgConnection,
        id: &Uuid,
    ) -> AppResult<Option<Municipality>> {
        let municipality =
            sqlx::query_as::<_, Municipality>(r#"SELECT * FROM municipalities WHERE id = $1"#)
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(municipality)
    }
}
