use crate::models::request::{AbilityPagination, PageParams, SymptomPagination};
use crate::models::response::{
    AbilityResponse, ListAbilitiesResponse, ListSkillsResponse, ListSymptomsResponse,
    SkillResponse, SymptomResponse,
};
use crate::repos::catalog_repo::CatalogRepo;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct CatalogService {
    pub catalog_repo: Arc<dyn CatalogRepo>,
}

impl CatalogService {
    pub async fn list_abilities(self, params: AbilityPagination) -> Response {
        let (page, per_page) = (params.page, params.per_page);
        info!("Getting page {page} of abilities with per page {per_page}...");
        match self.catalog_repo.list_abilities(params).await {
            Ok((rows, num_pages)) => Json(ListAbilitiesResponse {
                items: rows.into_iter().map(AbilityResponse::from).collect(),
                num_pages,
                page,
                per_page,
            })
            .into_response(),
            Err(err) => {
                error!(%err, "Error occurred paginating abilities");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response()
            }
        }
    }

    pub async fn get_ability(self, id: i32) -> Response {
        info!("Getting ability {id}...");
        match self.catalog_repo.get_ability(id).await {
            Ok(Some(ability)) => Json(ability).into_response(),
            Ok(None) => (StatusCode::NOT_FOUND, "No such ability").into_response(),
            Err(err) => {
                error!(%err, "Error occurred retrieving ability");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response()
            }
        }
    }

    pub async fn list_symptoms(self, params: SymptomPagination) -> Response {
        let (page, per_page) = (params.page, params.per_page);
        info!("Getting page {page} of symptoms with per page {per_page}...");
        match self.catalog_repo.list_symptoms(params).await {
            Ok((rows, num_pages)) => Json(ListSymptomsResponse {
                items: rows.into_iter().map(SymptomResponse::from).collect(),
                num_pages,
                page,
                per_page,
            })
            .into_response(),
            Err(err) => {
                error!(%err, "Error occurred paginating symptoms");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response()
            }
        }
    }

    pub async fn get_symptom(self, id: i32) -> Response {
        info!("Getting symptom {id}...");
        match self.catalog_repo.get_symptom(id).await {
            Ok(Some(symptom)) => Json(symptom).into_response(),
            Ok(None) => (StatusCode::NOT_FOUND, "No such symptom").into_response(),
            Err(err) => {
                error!(%err, "Error occurred retrieving symptom");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response()
            }
        }
    }

    pub async fn list_competence_levels(self) -> Response {
        info!("Getting competence levels...");
        match self.catalog_repo.list_competence_levels().await {
            Ok(levels) => Json(levels).into_response(),
            Err(err) => {
                error!(%err, "Error occurred listing competence levels");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response()
            }
        }
    }

    pub async fn list_skills(self, activity_id: i32, params: PageParams) -> Response {
        let (page, per_page) = (params.page, params.per_page);
        info!("Getting page {page} of skills for activity {activity_id}...");
        match self
            .catalog_repo
            .list_skills(activity_id, page, per_page)
            .await
        {
            Ok(Some((rows, num_pages))) => Json(ListSkillsResponse {
                items: rows.into_iter().map(SkillResponse::from).collect(),
                num_pages,
                page,
                per_page,
            })
            .into_response(),
            Ok(None) => (StatusCode::NOT_FOUND, "No such activity").into_response(),
            Err(err) => {
                error!(%err, "Error occurred paginating skills");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response()
            }
        }
    }
}
