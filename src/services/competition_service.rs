//! Competition scheduling service
//!
//! Creates competitions with an ordered, non-overlapping stage sequence,
//! guards against date-range collisions with existing competitions, and
//! gates post-creation editing on whether a stage has already started.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::DEFAULT_COMPETITION_PREFIX,
    db::repositories::{CatalogRepository, CompetitionRepository},
    error::{AppError, AppResult},
    handlers::competitions::{
        request::{CreateCompetitionRequest, StageInput, UpdateCompetitionRequest},
        response::{CompetitionResponse, CompetitionSummary, UpdateCompetitionResponse},
    },
};

/// Competition service for scheduling logic
pub struct CompetitionService;

impl CompetitionService {
    /// Create a competition with its stage sequence. The overall date
    /// range must not collide with any existing competition.
    pub async fn create_competition(
        pool: &PgPool,
        management_year: i32,
        payload: CreateCompetitionRequest,
    ) -> AppResult<CompetitionResponse> {
        if payload.cost.is_sign_negative() {
            return Err(AppError::Validation("Cost must not be negative".to_string()));
        }
        validate_stage_sequence(&payload.stages)?;

        let (start_date, end_date) = overall_range(&payload.stages);

        let mut tx = pool.begin().await?;

        if CompetitionRepository::any_overlapping(&mut tx, start_date, end_date, None).await? {
            return Err(AppError::Conflict(format!(
                "Competition dates [{start_date}, {end_date}] overlap an existing competition"
            )));
        }

        let base_name = payload
            .name
            .unwrap_or_else(|| format!("{DEFAULT_COMPETITION_PREFIX} {management_year}"));
        let existing = CompetitionRepository::list_names_with_prefix(&mut tx, &base_name).await?;
        let name = next_unique_name(&base_name, &existing);

        // Registration window mirrors the first and last stage times.
        let registration_opens = payload.stages[0].start_time;
        let registration_closes = payload.stages[payload.stages.len() - 1].end_time;

        let competition = CompetitionRepository::create(
            &mut tx,
            &name,
            start_date,
            end_date,
            registration_opens,
            registration_closes,
            payload.cost,
            management_year,
        )
        .await?;

        for area_name in payload.areas.as_deref().unwrap_or_default() {
            let area = CatalogRepository::find_area_by_name(&mut tx, area_name)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Area '{area_name}' not found")))?;
            CompetitionRepository::link_area(&mut tx, &competition.id, &area.id).await?;
        }

        let mut stages = Vec::with_capacity(payload.stages.len());
        for (index, stage) in payload.stages.iter().enumerate() {
            let created = CompetitionRepository::upsert_stage(
                &mut tx,
                &competition.id,
                &stage.name,
                stage.start_date,
                stage.start_time,
                stage.end_date,
                stage.end_time,
                (index + 1) as i32,
            )
            .await?;
            stages.push(created);
        }

        tx.commit().await?;

        tracing::info!(competition = %name, stages = stages.len(), "competition created");

        Ok(CompetitionResponse::from_parts(competition, stages))
    }

    /// Update a competition. Once any stage has started, date fields are
    /// immutable and only name/cost are applied.
    pub async fn update_competition(
        pool: &PgPool,
        id: &Uuid,
        payload: UpdateCompetitionRequest,
    ) -> AppResult<UpdateCompetitionResponse> {
        if let Some(cost) = payload.cost {
            if cost.is_sign_negative() {
                return Err(AppError::Validation("Cost must not be negative".to_string()));
            }
        }

        let mut tx = pool.begin().await?;

        CompetitionRepository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Competition {id} not found")))?;

        let current_stages = CompetitionRepository::list_stages(&mut tx, id).await?;
        let today = Utc::now().date_naive();
        let can_edit_dates = !current_stages.iter().any(|stage| stage.has_started(today));

        let mut competition = CompetitionRepository::update_name_cost(
            &mut tx,
            id,
            payload.name.as_deref(),
            payload.cost,
        )
        .await?;

        let stages = match payload.stages {
            Some(new_stages) if can_edit_dates => {
                validate_stage_sequence(&new_stages)?;

                let (start_date, end_date) = overall_range(&new_stages);
                if CompetitionRepository::any_overlapping(&mut tx, start_date, end_date, Some(id))
                    .await?
                {
                    return Err(AppError::Conflict(format!(
                        "Competition dates [{start_date}, {end_date}] overlap an existing competition"
                    )));
                }

                let keep: Vec<String> =
                    new_stages.iter().map(|stage| stage.name.clone()).collect();
                CompetitionRepository::delete_stages_not_in(&mut tx, id, &keep).await?;

                let mut replaced = Vec::with_capacity(new_stages.len());
                for (index, stage) in new_stages.iter().enumerate() {
                    let upserted = CompetitionRepository::upsert_stage(
                        &mut tx,
                        id,
                        &stage.name,
                        stage.start_date,
                        stage.start_time,
                        stage.end_date,
                        stage.end_time,
                        (index + 1) as i32,
                    )
                    .await?;
                    replaced.push(upserted);
                }

                competition =
                    CompetitionRepository::update_dates(&mut tx, id, start_date, end_date).await?;
                replaced
            }
            _ => current_stages,
        };

        tx.commit().await?;

        Ok(UpdateCompetitionResponse {
            competition: CompetitionResponse::from_parts(competition, stages),
            can_edit_dates,
        })
    }

    /// List competitions for the admin dashboard
    pub async fn list_competitions(pool: &PgPool) -> AppResult<Vec<CompetitionSummary>> {
        let competitions = CompetitionRepository::list(pool).await?;
        Ok(competitions.into_iter().map(CompetitionSummary::from).collect())
    }
}

fn stage_window(stage: &StageInput) -> (NaiveDateTime, NaiveDateTime) {
    (
        stage.start_date.and_time(stage.start_time),
        stage.end_date.and_time(stage.end_time),
    )
}

/// Each stage must end after it starts, names must be unique within the
/// competition, and no two stages may overlap in time. Abutting stages
/// (one ends exactly when the next begins) are allowed.
fn validate_stage_sequence(stages: &[StageInput]) -> AppResult<()> {
    if stages.is_empty() {
        return Err(AppError::Validation(
            "At least one stage is required".to_string(),
        ));
    }

    for stage in stages {
        let (start, end) = stage_window(stage);
        if end <= start {
            return Err(AppError::Validation(format!(
                "Stage '{}' ends before it starts",
                stage.name
            )));
        }
    }

    for (i, a) in stages.iter().enumerate() {
        for b in &stages[i + 1..] {
            if a.name.eq_ignore_ascii_case(&b.name) {
                return Err(AppError::Validation(format!(
                    "Duplicate stage name '{}'",
                    a.name
                )));
            }
            let (a_start, a_end) = stage_window(a);
            let (b_start, b_end) = stage_window(b);
            if a_start < b_end && a_end > b_start {
                return Err(AppError::Conflict(format!(
                    "Stages '{}' and '{}' overlap",
                    a.name, b.name
                )));
            }
        }
    }

    Ok(())
}

/// Overall competition date range spanned by a stage list
fn overall_range(stages: &[StageInput]) -> (NaiveDate, NaiveDate) {
    let mut start = stages[0].start_date;
    let mut end = stages[0].end_date;
    for stage in &stages[1..] {
        start = start.min(stage.start_date);
        end = end.max(stage.end_date);
    }
    (start, end)
}

/// Uniquify a competition name against the names already taken: the base
/// name is used as-is when free, otherwise the next `-N` suffix after the
/// highest one seen (names sharing the prefix without a parseable suffix
/// count as suffix 1).
fn next_unique_name(base: &str, existing: &[String]) -> String {
    if existing.is_empty() {
        return base.to_string();
    }

    let suffix_pattern = format!("^{}-(\\d+)$", regex::escape(base));
    let suffix_re = regex::Regex::new(&suffix_pattern).expect("suffix pattern");

    let max_suffix = existing
        .iter()
        .map(|name| {
            suffix_re
                .captures(name)
                .and_then(|caps| caps[1].parse::<u32>().ok())
                .unwrap_or(1)
        })
        .max()
        .unwrap_or(1);

    format!("{}-{}", base, max_suffix + 1)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn stage(name: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> StageInput {
        StageInput {
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_valid_sequence() {
        let stages = vec![
            stage("Inscripción", (2025, 4, 1), (2025, 4, 10)),
            stage("Clasificatoria", (2025, 4, 11), (2025, 4, 20)),
            stage("Final", (2025, 4, 21), (2025, 4, 25)),
        ];
        assert!(validate_stage_sequence(&stages).is_ok());
    }

    #[test]
    fn test_overlapping_stages_rejected() {
        let stages = vec![
            stage("Inscripción", (2025, 4, 1), (2025, 4, 12)),
            stage("Clasificatoria", (2025, 4, 11), (2025, 4, 20)),
        ];
        assert!(matches!(
            validate_stage_sequence(&stages),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_duplicate_stage_names_rejected() {
        let stages = vec![
            stage("Final", (2025, 4, 1), (2025, 4, 10)),
            stage("final", (2025, 4, 11), (2025, 4, 20)),
        ];
        assert!(matches!(
            validate_stage_sequence(&stages),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_inverted_stage_rejected() {
        let stages = vec![stage("Inscripción", (2025, 4, 10), (2025, 4, 1))];
        assert!(matches!(
            validate_stage_sequence(&stages),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(matches!(
            validate_stage_sequence(&[]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_overall_range_spans_all_stages() {
        let stages = vec![
            stage("Clasificatoria", (2025, 4, 11), (2025, 4, 20)),
            stage("Inscripción", (2025, 4, 1), (2025, 4, 10)),
        ];
        assert_eq!(
            overall_range(&stages),
            (
                NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
            )
        );
    }

    #[test]
    fn test_unique_name_free_base() {
        assert_eq!(next_unique_name("Competencia 2025", &[]), "Competencia 2025");
    }

    #[test]
    fn test_unique_name_suffix_increments() {
        let existing = vec![
            "Competencia 2025".to_string(),
            "Competencia 2025-2".to_string(),
            "Competencia 2025-3".to_string(),
        ];
        assert_eq!(
            next_unique_name("Competencia 2025", &existing),
            "Competencia 2025-4"
        );
    }

    #[test]
    fn test_unique_name_unsuffixed_counts_as_one() {
        let existing = vec!["Competencia 2025".to_string()];
        assert_eq!(
            next_unique_name("Competencia 2025", &existing),
            "Competencia 2025-2"
        );
    }
}
