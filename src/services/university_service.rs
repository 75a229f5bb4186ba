use crate::models::request::CreateUniversityRequest;
use crate::models::response::ListUniversitiesResponse;
use crate::repos::university_repo::UniversityRepo;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct UniversityService {
    pub university_repo: Arc<dyn UniversityRepo>,
}

impl UniversityService {
    pub async fn create_one(self, payload: CreateUniversityRequest) -> Response {
        info!(
            "Creating university {} with {} contacts...",
            payload.name,
            payload.contacts.len()
        );
        match self.university_repo.write_one(payload).await {
            Ok(university) => (StatusCode::CREATED, Json(university)).into_response(),
            Err(write_error) => {
                error!(%write_error, "Error occurred writing university");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response()
            }
        }
    }

    pub async fn list(self) -> Response {
        info!("Getting universities...");
        match self.university_repo.list().await {
            Ok(items) => Json(ListUniversitiesResponse { items }).into_response(),
            Err(err) => {
                error!(%err, "Error occurred listing universities");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response()
            }
        }
    }
}
