//! Modality resolution
//!
//! The central algorithm of the registration workflow: given a competition,
//! an area, and a free-text level descriptor, resolve the unique modality
//! row, creating it on demand. Regular numeric grades resolve through the
//! grade catalog; anything else falls back to the area's special levels.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    db::repositories::{CatalogRepository, ModalityRepository},
    error::{AppError, AppResult},
    models::{Area, LevelDescriptor, Modality, SpecialLevel},
};

/// Modality resolution service
pub struct ModalityService;

impl ModalityService {
    /// Resolve the modality for a level descriptor within an area,
    /// creating the row if it does not exist yet. Idempotent: identical
    /// inputs always yield the same modality id.
    pub async fn resolve(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        area: &Area,
        descriptor: &str,
    ) -> AppResult<Modality> {
        let parsed = LevelDescriptor::parse(descriptor).ok_or_else(|| {
            AppError::Validation("Level descriptor must not be empty".to_string())
        })?;

        if let LevelDescriptor::Regular { number, cycle } = parsed {
            if let Some(grade) =
                CatalogRepository::find_grade_by_number_cycle(conn, number, cycle).await?
            {
                return Self::find_or_create_for_grade(conn, competition_id, &area.id, &grade.id)
                    .await;
            }
            // No such grade in the catalog: historical data occasionally
            // spells special brackets like regular grades, so fall through
            // to the special-level scan before giving up.
        }

        let special = Self::resolve_special_level(conn, area, descriptor).await?;
        Self::find_or_create_for_special_level(conn, competition_id, &area.id, &special.id).await
    }

    /// Exact name match strictly preferred; otherwise a grade-range
    /// containment candidate is accepted only when it is unique.
    async fn resolve_special_level(
        conn: &mut PgConnection,
        area: &Area,
        descriptor: &str,
    ) -> AppResult<SpecialLevel> {
        if let Some(level) =
            CatalogRepository::find_special_level_by_name(conn, &area.id, descriptor).await?
        {
            return Ok(level);
        }

        let levels = CatalogRepository::list_special_levels_by_area(conn, &area.id).await?;
        match select_special_level(&levels, descriptor) {
            SpecialLevelMatch::Unique(level) => Ok(level.clone()),
            SpecialLevelMatch::Ambiguous => Err(AppError::AmbiguousLevel {
                descriptor: descriptor.to_string(),
                area: area.name.clone(),
            }),
            SpecialLevelMatch::None => Err(AppError::ModalityNotResolvable {
                descriptor: descriptor.to_string(),
                area: area.name.clone(),
            }),
        }
    }

    async fn find_or_create_for_grade(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        area_id: &Uuid,
        grade_id: &Uuid,
    ) -> AppResult<Modality> {
        if let Some(modality) =
            ModalityRepository::find_by_grade(conn, competition_id, area_id, grade_id).await?
        {
            return Ok(modality);
        }

        if let Some(modality) =
            ModalityRepository::insert_for_grade(conn, competition_id, area_id, grade_id).await?
        {
            tracing::info!(%competition_id, %area_id, %grade_id, "created grade modality");
            return Ok(modality);
        }

        // Lost the creation race: a concurrent transaction inserted the
        // same key. One re-read, then the conflict surfaces.
        ModalityRepository::find_by_grade(conn, competition_id, area_id, grade_id)
            .await?
            .ok_or_else(|| AppError::Conflict("Concurrent modality creation".to_string()))
    }

    async fn find_or_create_for_special_level(
        conn: &mut PgConnection,
        competition_id: &Uuid,
        area_id: &Uuid,
        special_level_id: &Uuid,
    ) -> AppResult<Modality> {
        if let Some(modality) =
            ModalityRepository::find_by_special_level(conn, competition_id, area_id, special_level_id)
                .await?
        {
            return Ok(modality);
        }

        if let Some(modality) =
            ModalityRepository::insert_for_special_level(conn, competition_id, area_id, special_level_id)
                .await?
        {
            tracing::info!(%competition_id, %area_id, %special_level_id, "created special-level modality");
            return Ok(modality);
        }

        ModalityRepository::find_by_special_level(conn, competition_id, area_id, special_level_id)
            .await?
            .ok_or_else(|| AppError::Conflict("Concurrent modality creation".to_string()))
    }
}

/// Outcome of the permissive special-level scan
enum SpecialLevelMatch<'a> {
    Unique(&'a SpecialLevel),
    Ambiguous,
    None,
}

/// Scan an area's special levels for a descriptor that did not match any
/// level name exactly. A level is a candidate when its name matches
/// case-insensitively or its grade-range text contains the descriptor as a
/// case-insensitive substring. The match is accepted only when exactly one
/// candidate remains; several candidates are an ambiguity, not a pick.
fn select_special_level<'a>(levels: &'a [SpecialLevel], descriptor: &str) -> SpecialLevelMatch<'a> {
    let needle = descriptor.to_lowercase();

    let mut candidates = levels.iter().filter(|level| {
        level.name.to_lowercase() == needle || level.grade_range.to_lowercase().contains(&needle)
    });

    match (candidates.next(), candidates.next()) {
        (Some(level), None) => SpecialLevelMatch::Unique(level),
        (Some(_), Some(_)) => SpecialLevelMatch::Ambiguous,
        (None, _) => SpecialLevelMatch::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(name: &str, grade_range: &str) -> SpecialLevel {
        SpecialLevel {
            id: Uuid::new_v4(),
            name: name.to_string(),
            grade_range: grade_range.to_string(),
            area_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let levels = vec![
            level("Robótica Nivel 1", "3ro a 6to Primaria"),
            level("Robótica Nivel 2", "1ro a 6to Secundaria"),
        ];
        match select_special_level(&levels, "robótica nivel 1") {
            SpecialLevelMatch::Unique(found) => assert_eq!(found.name, "Robótica Nivel 1"),
            _ => panic!("expected unique match"),
        }
    }

    #[test]
    fn test_range_containment_matches_single_candidate() {
        let levels = vec![
            level("Robótica Nivel 1", "3ro a 6to Primaria"),
            level("Robótica Nivel 2", "1ro a 6to Secundaria"),
        ];
        match select_special_level(&levels, "6to Secundaria") {
            SpecialLevelMatch::Unique(found) => assert_eq!(found.name, "Robótica Nivel 2"),
            _ => panic!("expected unique match"),
        }
    }

    #[test]
    fn test_multiple_range_candidates_are_ambiguous() {
        let levels = vec![
            level("Robótica Nivel 1", "3ro a 6to Primaria"),
            level("Robótica Builders", "1ro a 6to Primaria"),
        ];
        assert!(matches!(
            select_special_level(&levels, "Primaria"),
            SpecialLevelMatch::Ambiguous
        ));
    }

    #[test]
    fn test_no_candidate() {
        let levels = vec![level("Robótica Nivel 1", "3ro a 6to Primaria")];
        assert!(matches!(
            select_special_level(&levels, "Astronomía Avanzada"),
            SpecialLevelMatch::None
        ));
    }

    #[test]
    fn test_empty_catalog() {
        assert!(matches!(
            select_special_level(&[], "cualquier nivel"),
            SpecialLevelMatch::None
        ));
    }
}
