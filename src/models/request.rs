//! Request models for the API endpoints.
//!
//! This module contains all the request structures used by the API endpoints,
//! including validation rules for incoming data.

use ::entity::sea_orm_active_enums::CommentStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Pagination and filtering parameters for listing public abilities.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(default)]
pub struct AbilityPagination {
    pub page: u64,
    #[validate(range(min = 1, max = 200))]
    pub per_page: u64,
    #[validate(length(min = 1, max = 500))]
    pub query_term: Option<String>,
    #[validate(range(min = 1, max = 2))]
    pub depth: Option<i16>,
    #[validate(length(min = 1, max = 128))]
    pub subject_id: Option<String>,
}

impl Default for AbilityPagination {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: 20,
            query_term: None,
            depth: None,
            subject_id: None,
        }
    }
}

/// Pagination and filtering parameters for listing public symptoms.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(default)]
pub struct SymptomPagination {
    pub page: u64,
    #[validate(range(min = 1, max = 200))]
    pub per_page: u64,
    #[validate(length(min = 1, max = 500))]
    pub query_term: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub subject_id: Option<String>,
}

impl Default for SymptomPagination {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: 20,
            query_term: None,
            subject_id: None,
        }
    }
}

/// Plain page parameters.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(default)]
pub struct PageParams {
    pub page: u64,
    #[validate(range(min = 1, max = 200))]
    pub per_page: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: 20,
        }
    }
}

#[derive(Debug, Clone, Validate, Deserialize, Serialize, ToSchema)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 200))]
    pub salutation: String,
    #[validate(email)]
    pub email: String,
}

/// Request for registering a university together with its contacts.
#[derive(Debug, Clone, Validate, Deserialize, Serialize, ToSchema)]
pub struct CreateUniversityRequest {
    #[validate(length(min = 1, max = 512))]
    pub name: String,
    #[validate(url)]
    pub url: String,
    #[validate(length(max = 50), nested)]
    pub contacts: Vec<CreateContactRequest>,
}

/// Request for sending a feedback request to a university.
#[derive(Debug, Clone, Validate, Deserialize, Serialize, ToSchema)]
#[validate(schema(function = "validate_feedback_scope"))]
pub struct CreateFeedbackRequest {
    pub university_id: i32,
    #[validate(length(max = 200))]
    pub subject_ids: Vec<String>,
    #[validate(length(max = 200))]
    pub activity_ids: Vec<i32>,
}

fn validate_feedback_scope(request: &CreateFeedbackRequest) -> Result<(), ValidationError> {
    if request.subject_ids.is_empty() && request.activity_ids.is_empty() {
        return Err(ValidationError::new("empty_scope")
            .with_message("At least one subject or activity is required".into()));
    }
    Ok(())
}

/// Pagination and filtering parameters for listing feedback requests.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(default)]
pub struct FeedbackPagination {
    pub page: u64,
    #[validate(range(min = 1, max = 200))]
    pub per_page: u64,
    pub university_id: Option<i32>,
    #[validate(length(min = 1, max = 128))]
    pub subject_id: Option<String>,
}

impl Default for FeedbackPagination {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: 20,
            university_id: None,
            subject_id: None,
        }
    }
}

/// Staff decision on an open comment.
#[derive(Debug, Clone, Validate, Deserialize, Serialize, ToSchema)]
pub struct UpdateCommentStatusRequest {
    #[validate(custom(function = "validate_review_status"))]
    pub status: CommentStatus,
}

fn validate_review_status(status: &CommentStatus) -> Result<(), ValidationError> {
    match status {
        CommentStatus::Open => Err(ValidationError::new("status")
            .with_message("Status must be accepted or discarded".into())),
        CommentStatus::Accepted | CommentStatus::Discarded => Ok(()),
    }
}

/// Secret from a feedback link.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
pub struct FeedbackTokenParams {
    #[validate(length(min = 1, max = 128))]
    pub token: String,
}

#[derive(Debug, Clone, Validate, Deserialize, Serialize, ToSchema)]
pub struct UpdateFeedbackNotesRequest {
    #[validate(length(max = 10000))]
    pub notes: String,
}

#[derive(Debug, Clone, Validate, Deserialize, Serialize, ToSchema)]
pub struct UpsertCommentRequest {
    #[validate(length(min = 1, max = 10000))]
    pub comment: String,
}

/// Multipart form of a workbook upload, for the OpenAPI document.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ImportWorkbookUpload {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
