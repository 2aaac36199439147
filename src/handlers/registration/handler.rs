//! Registration handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::repositories::CatalogRepository,
    error::{AppError, AppResult},
    models::{Area, Department, Municipality},
    services::RegistrationService,
    state::AppState,
};

use super::{
    request::{AreaLevelsQuery, EnrollRequest, RegisterTutorRequest},
    response::{AreaLevelOptions, EnrollResponse, TutorResponse},
};

/// Submit an enrollment: one competitor, one or more area selections
pub async fn enroll(
    State(state): State<AppState>,
    Json(payload): Json<EnrollRequest>,
) -> AppResult<(StatusCode, Json<EnrollResponse>)> {
    payload.validate()?;

    let response =
        RegistrationService::enroll(state.db(), state.management_year(), payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Register a tutor
pub async fn register_tutor(
    State(state): State<AppState>,
    Json(payload): Json<RegisterTutorRequest>,
) -> AppResult<(StatusCode, Json<TutorResponse>)> {
    payload.validate()?;

    let tutor = RegistrationService::register_tutor(state.db(), payload).await?;

    Ok((StatusCode::CREATED, Json(tutor)))
}

/// List geographic departments
pub async fn list_departments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Department>>> {
    let departments = CatalogRepository::list_departments(state.db()).await?;
    Ok(Json(departments))
}

/// List the municipalities of a department
pub async fn list_municipalities(
    State(state): State<AppState>,
    Path(department_id): Path<Uuid>,
) -> AppResult<Json<Vec<Municipality>>> {
    let municipalities =
        CatalogRepository::list_municipalities_by_department(state.db(), &department_id).await?;

    if municipalities.is_empty() {
        return Err(AppError::NotFound(format!(
            "No municipalities found for department {department_id}"
        )));
    }

    Ok(Json(municipalities))
}

/// List competition areas
pub async fn list_areas(State(state): State<AppState>) -> AppResult<Json<Vec<Area>>> {
    let areas = CatalogRepository::list_areas(state.db()).await?;
    Ok(Json(areas))
}

/// Registration-form feed: eligible levels per area with prices
pub async fn area_levels(
    State(state): State<AppState>,
    Query(query): Query<AreaLevelsQuery>,
) -> AppResult<Json<Vec<AreaLevelOptions>>> {
    let management_year = query.gestion.unwrap_or_else(|| state.management_year());
    let catalog = RegistrationService::area_level_catalog(state.db(), management_year).await?;
    Ok(Json(catalog))
}
