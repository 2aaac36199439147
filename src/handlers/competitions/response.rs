//! Competition response DTOs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Competition, Stage};

/// Full competition representation with its stage sequence
#[derive(Debug, Serialize)]
pub struct CompetitionResponse {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost: Decimal,
    pub management_year: i32,
    pub stages: Vec<StageResponse>,
}

impl CompetitionResponse {
    pub fn from_parts(competition: Competition, stages: Vec<Stage>) -> Self {
        Self {
            id: competition.id,
            name: competition.name,
            start_date: competition.start_date,
            end_date: competition.end_date,
            cost: competition.cost,
            management_year: competition.management_year,
            stages: stages.into_iter().map(StageResponse::from).collect(),
        }
    }
}

/// Stage representation
#[derive(Debug, Serialize)]
pub struct StageResponse {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
    pub position: i32,
    pub status: String,
}

impl From<Stage> for StageResponse {
    fn from(stage: Stage) -> Self {
        Self {
            id: stage.id,
            name: stage.name,
            start_date: stage.start_date,
            start_time: stage.start_time,
            end_date: stage.end_date,
            end_time: stage.end_time,
            position: stage.position,
            status: stage.status,
        }
    }
}

/// Competition listing entry
#[derive(Debug, Serialize)]
pub struct CompetitionSummary {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost: Decimal,
    pub management_year: i32,
}

impl From<Competition> for CompetitionSummary {
    fn from(competition: Competition) -> Self {
        Self {
            id: competition.id,
            name: competition.name,
            start_date: competition.start_date,
            end_date: competition.end_date,
            cost: competition.cost,
            management_year: competition.management_year,
        }
    }
}

/// Update outcome: the competition plus whether date fields were still
/// editable at the time of the update
#[derive(Debug, Serialize)]
pub struct UpdateCompetitionResponse {
    #[serde(flatten)]
    pub competition: CompetitionResponse,
    pub can_edit_dates: bool,
}
