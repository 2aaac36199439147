//! Competition request DTOs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_COMPETITION_NAME_LENGTH;

/// Create competition request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompetitionRequest {
    /// Base name; defaults to "Competencia <year>". A numeric suffix is
    /// appended when the name is already taken.
    #[validate(length(min = 1, max = MAX_COMPETITION_NAME_LENGTH))]
    pub name: Option<String>,

    /// Enrollment cost confirmed by the administrator
    pub cost: Decimal,

    /// Ordered stage sequence; positions are assigned from this order
    #[validate(
        length(min = 1, message = "at least one stage is required"),
        nested
    )]
    pub stages: Vec<StageInput>,

    /// Area names in the competition's eligibility scope
    pub areas: Option<Vec<String>>,
}

/// One stage of the competition timeline
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StageInput {
    #[validate(length(min = 1, max = MAX_COMPETITION_NAME_LENGTH))]
    pub name: String,

    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
}

/// Update competition request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 1, max = MAX_COMPETITION_NAME_LENGTH))]
    pub name: Option<String>,

    pub cost: Option<Decimal>,

    /// Replacement stage list; applied only while no stage has started
    #[validate(nested)]
    pub stages: Option<Vec<StageInput>>,
}
