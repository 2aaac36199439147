//! Registration request DTOs

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_INSTITUTION_LENGTH, MAX_LEVEL_DESCRIPTOR_LENGTH, MAX_NAME_LENGTH};

/// Enrollment submission: one competitor, one or more (area, level)
/// selections with their tutors, processed atomically
#[derive(Debug, Deserialize, Validate)]
pub struct EnrollRequest {
    #[validate(nested)]
    pub person: PersonInput,

    /// Competitor birth date
    pub birth_date: NaiveDate,

    /// Competitor's municipality
    pub municipality_id: Uuid,

    #[validate(length(min = 1, max = MAX_INSTITUTION_LENGTH))]
    pub school: String,

    /// Grade label as declared on the form (e.g. "3ro Primaria")
    #[validate(length(min = 1, max = MAX_LEVEL_DESCRIPTOR_LENGTH))]
    pub declared_grade: String,

    #[validate(
        length(min = 1, message = "at least one area selection is required"),
        nested
    )]
    pub selections: Vec<SelectionInput>,
}

/// Identity fields for the person upsert
#[derive(Debug, Deserialize, Validate)]
pub struct PersonInput {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub first_name: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub last_name: String,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub second_last_name: Option<String>,

    /// National id; unique secondary attribute, not the upsert key
    #[validate(length(min = 1, max = 20))]
    pub carnet: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

/// One (area, level) pair with the tutor responsible for it
#[derive(Debug, Deserialize, Validate)]
pub struct SelectionInput {
    #[validate(length(min = 1))]
    pub area: String,

    #[validate(length(min = 1, max = MAX_LEVEL_DESCRIPTOR_LENGTH))]
    pub level: String,

    pub tutor_id: Uuid,
}

/// Tutor registration: identity plus institution and municipality
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterTutorRequest {
    #[validate(nested)]
    pub person: PersonInput,

    #[validate(length(min = 1, max = MAX_INSTITUTION_LENGTH))]
    pub institution: String,

    pub municipality_id: Uuid,

    /// Subject area for fixed subject-matter tutors
    #[validate(length(min = 1))]
    pub area: Option<String>,
}

/// Query parameters for the area/level catalog feed
#[derive(Debug, Deserialize)]
pub struct AreaLevelsQuery {
    /// Management year; defaults to the active one
    pub gestion: Option<i32>,
}
