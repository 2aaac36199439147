//! Registration response DTOs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Enrollment submission response
#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub person: PersonSummary,
    pub enrollments: Vec<EnrollmentReceipt>,
    pub message: String,
}

/// Minimal person echo for the submission response
#[derive(Debug, Serialize)]
pub struct PersonSummary {
    pub id: Uuid,
    pub email: String,
}

/// One created enrollment per selection
#[derive(Debug, Serialize)]
pub struct EnrollmentReceipt {
    pub enrollment_id: Uuid,
    pub modality_id: Uuid,
    pub competitor_id: Uuid,
    pub tutor_id: Uuid,
}

/// Tutor registration response
#[derive(Debug, Serialize)]
pub struct TutorResponse {
    pub tutor_id: Uuid,
    pub person_id: Uuid,
    pub institution: String,
    pub municipality_id: Uuid,
    pub area_id: Option<Uuid>,
}

/// Joined row backing the area/level catalog feed
#[derive(Debug, FromRow)]
pub struct GradeOptionRow {
    pub area_id: Uuid,
    pub area_name: String,
    pub grade_id: Uuid,
    pub number: i32,
    pub cycle: String,
}

/// Joined row for an area's special levels
#[derive(Debug, FromRow)]
pub struct SpecialLevelOptionRow {
    pub area_id: Uuid,
    pub area_name: String,
    pub special_level_id: Uuid,
    pub name: String,
    pub grade_range: String,
}

/// Eligible levels of one area, bucketed for the registration form
#[derive(Debug, Serialize)]
pub struct AreaLevelOptions {
    pub area_id: Uuid,
    pub area: String,
    pub primary: Vec<GradeOption>,
    pub secondary: Vec<GradeOption>,
    pub special: Vec<SpecialOption>,
}

/// Regular grade option with the enrollment price attached
#[derive(Debug, Serialize)]
pub struct GradeOption {
    pub grade_id: Uuid,
    pub number: i32,
    pub price: Decimal,
}

/// Special level option with the enrollment price attached
#[derive(Debug, Serialize)]
pub struct SpecialOption {
    pub special_level_id: Uuid,
    pub name: String,
    pub grade_range: String,
    pub price: Decimal,
}
