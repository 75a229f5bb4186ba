//! Public, read-only routes for browsing the catalog.
//!
//! No authentication is required. Abilities and symptoms that are not flagged public are
//! invisible here, both in lists and by id.

use crate::app_factory::AppState;
use crate::models::request::{AbilityPagination, PageParams, SymptomPagination};
use crate::models::response::{
    AbilityDetailResponse, CompetenceLevelResponse, ListAbilitiesResponse, ListSkillsResponse,
    ListSymptomsResponse, SymptomDetailResponse,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use validator::Validate;

pub fn get_catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/abilities", get(list_abilities))
        .route("/abilities/{ability_id}", get(get_one_ability))
        .route("/symptoms", get(list_symptoms))
        .route("/symptoms/{symptom_id}", get(get_one_symptom))
        .route("/competence-levels", get(list_competence_levels))
        .route("/activities/{activity_id}/skills", get(list_activity_skills))
}

#[utoipa::path(
    get,
    path = "/api/v1/abilities",
    tag = "Catalog",
    params(
        AbilityPagination
    ),
    responses(
        (status = 200, description = "OK", body = ListAbilitiesResponse),
        (status = 400, description = "Bad request")
    )
)]
async fn list_abilities(
    State(state): State<AppState>,
    pagination: Query<AbilityPagination>,
) -> Response {
    if let Err(err) = pagination.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state.catalog_service.list_abilities(pagination.0).await
}

#[utoipa::path(
    get,
    path = "/api/v1/abilities/{ability_id}",
    tag = "Catalog",
    params(
        ("ability_id" = i32, Path, description = "Ability ID")
    ),
    responses(
        (status = 200, description = "OK", body = AbilityDetailResponse),
        (status = 404, description = "Not found")
    )
)]
async fn get_one_ability(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    state.catalog_service.get_ability(id).await
}

#[utoipa::path(
    get,
    path = "/api/v1/symptoms",
    tag = "Catalog",
    params(
        SymptomPagination
    ),
    responses(
        (status = 200, description = "OK", body = ListSymptomsResponse),
        (status = 400, description = "Bad request")
    )
)]
async fn list_symptoms(
    State(state): State<AppState>,
    pagination: Query<SymptomPagination>,
) -> Response {
    if let Err(err) = pagination.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state.catalog_service.list_symptoms(pagination.0).await
}

#[utoipa::path(
    get,
    path = "/api/v1/symptoms/{symptom_id}",
    tag = "Catalog",
    params(
        ("symptom_id" = i32, Path, description = "Symptom ID")
    ),
    responses(
        (status = 200, description = "OK", body = SymptomDetailResponse),
        (status = 404, description = "Not found")
    )
)]
async fn get_one_symptom(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    state.catalog_service.get_symptom(id).await
}

#[utoipa::path(
    get,
    path = "/api/v1/competence-levels",
    tag = "Catalog",
    responses(
        (status = 200, description = "OK", body = Vec<CompetenceLevelResponse>)
    )
)]
async fn list_competence_levels(State(state): State<AppState>) -> Response {
    state.catalog_service.list_competence_levels().await
}

#[utoipa::path(
    get,
    path = "/api/v1/activities/{activity_id}/skills",
    tag = "Catalog",
    params(
        ("activity_id" = i32, Path, description = "Activity ID"),
        PageParams
    ),
    responses(
        (status = 200, description = "OK", body = ListSkillsResponse),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Not found")
    )
)]
async fn list_activity_skills(
    State(state): State<AppState>,
    Path(activity_id): Path<i32>,
    pagination: Query<PageParams>,
) -> Response {
    if let Err(err) = pagination.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state
        .catalog_service
        .list_skills(activity_id, pagination.0)
        .await
}
