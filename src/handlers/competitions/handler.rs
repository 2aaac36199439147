//! Competition handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppResult, services::CompetitionService, state::AppState};

use super::{
    request::{CreateCompetitionRequest, UpdateCompetitionRequest},
    response::{CompetitionResponse, CompetitionSummary, UpdateCompetitionResponse},
};

/// Create a competition with its stage sequence
pub async fn create_competition(
    State(state): State<AppState>,
    Json(payload): Json<CreateCompetitionRequest>,
) -> AppResult<(StatusCode, Json<CompetitionResponse>)> {
    payload.validate()?;

    let competition =
        CompetitionService::create_competition(state.db(), state.management_year(), payload)
            .await?;

    Ok((StatusCode::CREATED, Json(competition)))
}

/// Update a competition; date edits are gated on stage start
pub async fn update_competition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompetitionRequest>,
) -> AppResult<Json<UpdateCompetitionResponse>> {
    payload.validate()?;

    let outcome = CompetitionService::update_competition(state.db(), &id, payload).await?;

    Ok(Json(outcome))
}

/// List competitions
pub async fn list_competitions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CompetitionSummary>>> {
    let competitions = CompetitionService::list_competitions(state.db()).await?;
    Ok(Json(competitions))
}
