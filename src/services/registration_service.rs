//! Registration service
//!
//! Orchestrates an enrollment submission: person upsert, modality
//! resolution, competitor upsert, and enrollment + payment creation for
//! every (area, level) selection, inside one database transaction. Any
//! failure rolls the whole submission back.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::{
    constants::roles,
    db::repositories::{
        CatalogRepository, CompetitionRepository, EnrollmentRepository, PersonRepository,
    },
    error::{AppError, AppResult},
    handlers::registration::{
        request::{EnrollRequest, PersonInput, RegisterTutorRequest},
        response::{
            AreaLevelOptions, EnrollResponse, EnrollmentReceipt, GradeOption, GradeOptionRow,
            PersonSummary, SpecialLevelOptionRow, SpecialOption, TutorResponse,
        },
    },
    models::{Cycle, LevelDescriptor, Person, User},
    services::ModalityService,
    utils::validation,
};

/// Registration workflow service
pub struct RegistrationService;

impl RegistrationService {
    /// Process an enrollment submission atomically. Preconditions
    /// (non-empty selections, parseable level descriptors) are checked
    /// before the transaction opens, so a rejected submission has no
    /// side effects at all.
    pub async fn enroll(
        pool: &PgPool,
        management_year: i32,
        mut payload: EnrollRequest,
    ) -> AppResult<EnrollResponse> {
        if payload.selections.is_empty() {
            return Err(AppError::Validation(
                "At least one area selection is required".to_string(),
            ));
        }

        validation::validate_carnet(&payload.person.carnet)
            .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;
        if let Some(phone) = payload.person.phone.as_deref() {
            validation::validate_phone(phone)
                .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;
        }
        payload.person.email = validation::normalize_email(&payload.person.email);
        payload.school = validation::sanitize_string(&payload.school);
        payload.declared_grade = validation::sanitize_string(&payload.declared_grade);

        let descriptors: Vec<LevelDescriptor> = payload
            .selections
            .iter()
            .map(|selection| {
                LevelDescriptor::parse(&selection.level).ok_or_else(|| {
                    AppError::Validation(format!(
                        "Level descriptor must not be empty for area '{}'",
                        selection.area
                    ))
                })
            })
            .collect::<AppResult<_>>()?;

        let mut tx = pool.begin().await?;

        let competition = CompetitionRepository::find_active_by_year(&mut tx, management_year)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No active competition for management year {management_year}"
                ))
            })?;

        CatalogRepository::find_municipality_by_id(&mut tx, &payload.municipality_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Municipality {} not found",
                    payload.municipality_id
                ))
            })?;

        // Resolve every selection's area and tutor before writing anything.
        let mut areas = Vec::with_capacity(payload.selections.len());
        for selection in &payload.selections {
            let area = CatalogRepository::find_area_by_name(&mut tx, &selection.area)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Area '{}' not found", selection.area)))?;

            PersonRepository::find_tutor_by_id(&mut tx, &selection.tutor_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Tutor {} not found", selection.tutor_id))
                })?;

            areas.push(area);
        }

        let person = Self::upsert_competitor_identity(&mut tx, &payload).await?;

        let mut receipts = Vec::with_capacity(payload.selections.len());
        for ((selection, area), descriptor) in payload
            .selections
            .iter()
            .zip(areas.iter())
            .zip(descriptors.iter())
        {
            let modality =
                ModalityService::resolve(&mut tx, &competition.id, area, &selection.level).await?;

            // The competitor row is shared across selections; its level
            // code ends up holding the last-resolved value.
            let competitor = PersonRepository::upsert_competitor(
                &mut tx,
                &person.id,
                payload.birth_date,
                &payload.municipality_id,
                &payload.school,
                &payload.declared_grade,
                &descriptor.to_string(),
            )
            .await?;

            let enrollment = EnrollmentRepository::insert(
                &mut tx,
                &competitor.id,
                &selection.tutor_id,
                &competition.id,
                &modality.id,
            )
            .await?;

            EnrollmentRepository::insert_payment(&mut tx, &enrollment.id, competition.cost)
                .await?;

            receipts.push(EnrollmentReceipt {
                enrollment_id: enrollment.id,
                modality_id: modality.id,
                competitor_id: competitor.id,
                tutor_id: selection.tutor_id,
            });
        }

        tx.commit().await?;

        tracing::info!(
            person_id = %person.id,
            enrollments = receipts.len(),
            competition = %competition.name,
            "enrollment submission committed"
        );

        Ok(EnrollResponse {
            person: PersonSummary {
                id: person.id,
                email: person.email,
            },
            enrollments: receipts,
            message: "Enrollment registered".to_string(),
        })
    }

    /// Person upsert plus the idempotent user + competitor-role pair
    async fn upsert_competitor_identity(
        conn: &mut PgConnection,
        payload: &EnrollRequest,
    ) -> AppResult<Person> {
        let person = Self::upsert_person_checked(conn, &payload.person).await?;
        Self::ensure_user_with_role(conn, &person, roles::COMPETITOR).await?;

        Ok(person)
    }

    /// Person upsert keyed by email. The carnet is a secondary unique
    /// attribute: when it already belongs to a person with a different
    /// email, the submission conflicts instead of matching.
    async fn upsert_person_checked(
        conn: &mut PgConnection,
        input: &PersonInput,
    ) -> AppResult<Person> {
        if let Some(holder) = PersonRepository::find_by_carnet(conn, &input.carnet).await? {
            if holder.email != input.email {
                return Err(AppError::Conflict(format!(
                    "Carnet '{}' is already registered to a different person",
                    input.carnet
                )));
            }
        }

        PersonRepository::upsert_by_email(
            conn,
            &input.first_name,
            &input.last_name,
            input.second_last_name.as_deref(),
            &input.carnet,
            &input.email,
            input.phone.as_deref(),
        )
        .await
        .map_err(|err| match err {
            AppError::AlreadyExists(_) => AppError::Conflict(format!(
                "Carnet '{}' is already registered to a different person",
                input.carnet
            )),
            other => other,
        })
    }

    /// Idempotent user + role attachment, with the role id resolved by
    /// name against the role catalog.
    async fn ensure_user_with_role(
        conn: &mut PgConnection,
        person: &Person,
        role_name: &str,
    ) -> AppResult<User> {
        let role = PersonRepository::find_role_by_name(conn, role_name)
            .await?
            .ok_or_else(|| {
                AppError::Configuration(format!("Role catalog is missing '{role_name}'"))
            })?;

        let user = PersonRepository::ensure_user(conn, &person.id).await?;
        PersonRepository::ensure_user_role(conn, &user.id, &role.id).await?;

        Ok(user)
    }

    /// Register (or refresh) a tutor: person upsert, user + tutor role,
    /// and the one-per-person tutor row, in one transaction.
    pub async fn register_tutor(
        pool: &PgPool,
        mut payload: RegisterTutorRequest,
    ) -> AppResult<TutorResponse> {
        validation::validate_carnet(&payload.person.carnet)
            .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;
        if let Some(phone) = payload.person.phone.as_deref() {
            validation::validate_phone(phone)
                .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;
        }
        payload.person.email = validation::normalize_email(&payload.person.email);
        payload.institution = validation::sanitize_string(&payload.institution);

        let mut tx = pool.begin().await?;

        CatalogRepository::find_municipality_by_id(&mut tx, &payload.municipality_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Municipality {} not found",
                    payload.municipality_id
                ))
            })?;

        let area_id = match payload.area.as_deref() {
            Some(area_name) => {
                let area = CatalogRepository::find_area_by_name(&mut tx, area_name)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Area '{area_name}' not found")))?;
                Some(area.id)
            }
            None => None,
        };

        let person = Self::upsert_person_checked(&mut tx, &payload.person).await?;
        Self::ensure_user_with_role(&mut tx, &person, roles::TUTOR).await?;

        let tutor = PersonRepository::upsert_tutor(
            &mut tx,
            &person.id,
            &payload.institution,
            &payload.municipality_id,
            area_id.as_ref(),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(tutor_id = %tutor.id, person_id = %person.id, "tutor registered");

        Ok(TutorResponse {
            tutor_id: tutor.id,
            person_id: person.id,
            institution: tutor.institution,
            municipality_id: tutor.municipality_id,
            area_id: tutor.area_id,
        })
    }

    /// Registration-form feed: per area, the eligible levels bucketed into
    /// primary/secondary grades and special levels, with the active
    /// competition's cost attached as the price.
    pub async fn area_level_catalog(
        pool: &PgPool,
        management_year: i32,
    ) -> AppResult<Vec<AreaLevelOptions>> {
        let mut conn = pool.acquire().await?;

        let price = CompetitionRepository::find_active_by_year(&mut conn, management_year)
            .await?
            .map(|competition| competition.cost)
            .unwrap_or(Decimal::ZERO);

        let grade_rows = sqlx::query_as::<_, GradeOptionRow>(
            r#"
            SELECT
                a.id AS area_id,
                a.name AS area_name,
                g.id AS grade_id,
                g.number,
                g.cycle
            FROM area_grades ag
            JOIN areas a ON ag.area_id = a.id
            JOIN grades g ON ag.grade_id = g.id
            ORDER BY a.name, g.cycle, g.number
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let special_rows = sqlx::query_as::<_, SpecialLevelOptionRow>(
            r#"
            SELECT
                a.id AS area_id,
                a.name AS area_name,
                sl.id AS special_level_id,
                sl.name,
                sl.grade_range
            FROM special_levels sl
            JOIN areas a ON sl.area_id = a.id
            ORDER BY a.name, sl.name
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut catalog: Vec<AreaLevelOptions> = Vec::new();

        for row in grade_rows {
            let entry = Self::area_entry(&mut catalog, row.area_id, &row.area_name);
            let option = GradeOption {
                grade_id: row.grade_id,
                number: row.number,
                price,
            };
            match Cycle::parse(&row.cycle) {
                Some(Cycle::Primary) => entry.primary.push(option),
                Some(Cycle::Secondary) | None => entry.secondary.push(option),
            }
        }

        for row in special_rows {
            let entry = Self::area_entry(&mut catalog, row.area_id, &row.area_name);
            entry.special.push(SpecialOption {
                special_level_id: row.special_level_id,
                name: row.name,
                grade_range: row.grade_range,
                price,
            });
        }

        Ok(catalog)
    }

    fn area_entry<'a>(
        catalog: &'a mut Vec<AreaLevelOptions>,
        area_id: uuid::Uuid,
        area_name: &str,
    ) -> &'a mut AreaLevelOptions {
        // Catalogs are tens of rows; a linear scan keeps area order stable.
        let index = match catalog.iter().position(|entry| entry.area_id == area_id) {
            Some(index) => index,
            None => {
                catalog.push(AreaLevelOptions {
                    area_id,
                    area: area_name.to_string(),
                    primary: Vec::new(),
                    secondary: Vec::new(),
                    special: Vec::new(),
                });
                catalog.len() - 1
            }
        };
        &mut catalog[index]
    }
}
