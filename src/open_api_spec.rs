use crate::import::ImportSummary;
use crate::models::request::{
    AbilityPagination, CreateContactRequest, CreateFeedbackRequest, CreateUniversityRequest,
    FeedbackPagination, FeedbackTokenParams, ImportWorkbookUpload, PageParams,
    SymptomPagination, UpdateCommentStatusRequest, UpdateFeedbackNotesRequest,
    UpsertCommentRequest,
};
use crate::models::response::{
    AbilityDetailResponse, AbilityResponse, ActivityResponse, CommentResponse,
    CommentableResponse, CompetenceLevelResponse, ContactResponse, FeedbackDetailResponse,
    FeedbackResponse, ListAbilitiesResponse, ListCommentablesResponse, ListFeedbackResponse,
    ListSkillsResponse, ListSymptomsResponse, ListUniversitiesResponse, ReferenceResponse,
    SkillResponse, SymptomDetailResponse, SymptomResponse, UfidResponse, UniversityResponse,
};
use ::entity::sea_orm_active_enums::{CommentStatus, CommentTarget};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "jwt_cookie_auth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("jwt"))),
        )
    }
}

/// OpenAPI specification for the Lernzielkatalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::import::import_workbook,
        crate::routes::catalog::list_abilities,
        crate::routes::catalog::get_one_ability,
        crate::routes::catalog::list_symptoms,
        crate::routes::catalog::get_one_symptom,
        crate::routes::catalog::list_competence_levels,
        crate::routes::catalog::list_activity_skills,
        crate::routes::universities::create_university,
        crate::routes::universities::list_universities,
        crate::routes::feedback::create_feedback,
        crate::routes::feedback::list_feedback,
        crate::routes::feedback::get_one_feedback,
        crate::routes::feedback::review_comment,
        crate::routes::feedback_requests::get_current,
        crate::routes::feedback_requests::update_notes,
        crate::routes::feedback_requests::list_subject_abilities,
        crate::routes::feedback_requests::list_subject_symptoms,
        crate::routes::feedback_requests::list_activity_skills,
        crate::routes::feedback_requests::upsert_comment
    ),
    components(
        schemas(
            ImportWorkbookUpload,
            ImportSummary,
            AbilityPagination,
            SymptomPagination,
            PageParams,
            ReferenceResponse,
            UfidResponse,
            AbilityResponse,
            ListAbilitiesResponse,
            AbilityDetailResponse,
            SymptomResponse,
            ListSymptomsResponse,
            SymptomDetailResponse,
            ActivityResponse,
            CompetenceLevelResponse,
            SkillResponse,
            ListSkillsResponse,
            CreateContactRequest,
            CreateUniversityRequest,
            ContactResponse,
            UniversityResponse,
            ListUniversitiesResponse,
            CreateFeedbackRequest,
            FeedbackPagination,
            UpdateCommentStatusRequest,
            FeedbackResponse,
            ListFeedbackResponse,
            FeedbackDetailResponse,
            CommentStatus,
            CommentTarget,
            CommentResponse,
            FeedbackTokenParams,
            UpdateFeedbackNotesRequest,
            UpsertCommentRequest,
            CommentableResponse,
            ListCommentablesResponse
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Import", description = "Catalog workbook import"),
        (name = "Catalog", description = "Public browsing of the learning objectives catalog"),
        (name = "Universities", description = "Universities and their contacts"),
        (name = "Feedback", description = "Feedback requests and comment review for staff"),
        (name = "Feedback requests", description = "Endpoints behind the emailed feedback link")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_group() {
        let doc = ApiDoc::openapi();

        for path in [
            "/health",
            "/api/v1/import",
            "/api/v1/abilities/{ability_id}",
            "/api/v1/competence-levels",
            "/api/v1/universities",
            "/api/v1/feedback/comments/{comment_id}/status",
            "/api/v1/feedback-requests/comments/{target}/{target_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
