//! Person, user, role, tutor, and competitor repository
//!
//! Upserts are keyed by the canonical natural keys: lowercased email for
//! persons, person id for the one-per-person specializations.

use chrono::NaiveDate;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Competitor, Person, Role, Tutor, User},
};

/// Repository for person and role-specialization operations
pub struct PersonRepository;

impl PersonRepository {
    /// Find person by carnet (legacy secondary key, lookup only)
    pub async fn find_by_carnet(
        conn: &mut PgConnection,
        carnet: &str,
    ) -> AppResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(r#"SELECT * FROM persons WHERE carnet = $1"#)
            .bind(carnet)
            .fetch_optional(conn)
            .await?;

        Ok(person)
    }

    /// Upsert a person keyed by email. A carnet collision with a different
    /// person surfaces as a unique violation.
    pub async fn upsert_by_email(
        conn: &mut PgConnection,
        first_name: &str,
        last_name: &str,
        second_last_name: Option<&str>,
        carnet: &str,
        email: &str,
        phone: Option<&str>,
    ) -> AppResult<Person> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO persons (first_name, last_name, second_last_name, carnet, email, phone)
            VALUES ($1, $2, $3, $4, LOWER($5), $6)
            ON CONFLICT (email) DO UPDATE
            SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                second_last_name = EXCLUDED.second_last_name,
                carnet = EXCLUDED.carnet,
                phone = EXCLUDED.phone
            RETURNING *
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(second_last_name)
        .bind(carnet)
        .bind(email)
        .bind(phone)
        .fetch_one(conn)
        .await?;

        Ok(person)
    }

    /// Resolve a role by name
    pub async fn find_role_by_name(conn: &mut PgConnection, name: &str) -> AppResult<Option<Role>> {
        let role = sqlx::query_as::<_, Role>(r#"SELECT * FROM roles WHERE name = $1"#)
            .bind(name)
            .fetch_optional(conn)
            .await?;

        Ok(role)
    }

    /// Ensure the one-per-person user account exists
    pub async fn ensure_user(conn: &mut PgConnection, person_id: &Uuid) -> AppResult<User> {
        sqlx::query(
            r#"
            INSERT INTO users (person_id)
            VALUES ($1)
            ON CONFLICT (person_id) DO NOTHING
            "#,
        )
        .bind(person_id)
        .execute(&mut *conn)
        .await?;

        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE person_id = $1"#)
            .bind(person_id)
            .fetch_one(conn)
            .await?;

        Ok(user)
    }

    /// Attach a role to a user; never duplicates the (user, role) pair
    pub async fn ensure_user_role(
        conn: &mut PgConnection,
        user_id: &Uuid,
        role_id: &Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, role_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Upsert the one-per-person tutor row
    pub async fn upsert_tutor(
        conn: &mut PgConnection,
        person_id: &Uuid,
        institution: &str,
        municipality_id: &Uuid,
        area_id: Option<&Uuid>,
    ) -> AppResult<Tutor> {
        let tutor = sqlx::query_as::<_, Tutor>(
            r#"
            INSERT INTO tutors (person_id, institution, municipality_id, area_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (person_id) DO UPDATE
            SET
                institution = EXCLUDED.institution,
                municipality_id = EXCLUDED.municipality_id,
                area_id = EXCLUDED.area_id
            RETURNING *
            "#,
        )
        .bind(person_id)
        .bind(institution)
        .bind(municipality_id)
        .bind(area_id)
        .fetch_one(conn)
        .await?;

        Ok(tutor)
    }

    /// Find tutor by id
    pub async fn find_tutor_by_id(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<Tutor>> {
        let tutor = sqlx::query_as::<_, Tutor>(r#"SELECT * FROM tutors WHERE id = $1"#)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(tutor)
    }

    /// Upsert the one-per-person competitor row. Competitor-level fields
    /// are last-write-wins across the selections of a submission.
    pub async fn upsert_competitor(
        conn: &mut PgConnection,
        person_id: &Uuid,
        birth_date: NaiveDate,
        municipality_id: &Uuid,
        school: &str,
        declared_grade: &str,
        level_code: &str,
    ) -> AppResult<Competitor> {
        let competitor = sqlx::query_as::<_, Competitor>(
            r#"
            INSERT INTO competitors (person_id, birth_date, municipality_id, school, declared_grade, level_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (person_id) DO UPDATE
            SET
                birth_date = EXCLUDED.birth_date,
                municipality_id = EXCLUDED.municipality_id,
                school = EXCLUDED.school,
                declared_grade = EXCLUDED.declared_grade,
                level_code = EXCLUDED.level_code
            RETURNING *
            "#,
        )
        .bind(person_id)
        .bind(birth_date)
        .bind(municipality_id)
        .bind(school)
        .bind(declared_grade)
        .bind(level_code)
        .fetch_one(conn)
        .await?;

        Ok(competitor)
    }
}
