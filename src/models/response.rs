//! Response models for the API endpoints.
//!
//! This module contains all the response structures used by the API endpoints,
//! covering catalog browsing, universities and the feedback workflow.

use ::entity::sea_orm_active_enums::CommentStatus;
use chrono::NaiveDateTime;
use entity::ability::Model as AbilityModel;
use entity::activity::Model as ActivityModel;
use entity::catalog_comment::Model as CatalogCommentModel;
use entity::contact::Model as ContactModel;
use entity::feedback::Model as FeedbackModel;
use entity::skill::Model as SkillModel;
use entity::symptom::Model as SymptomModel;
use entity::university::Model as UniversityModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An acronym keyed lookup entry: level, subject, system or study field.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ReferenceResponse {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UfidResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct AbilityResponse {
    pub id: i32,
    pub name: String,
    pub depth: Option<i16>,
    pub subject_related: bool,
    pub study_field_id: Option<String>,
}

impl From<AbilityModel> for AbilityResponse {
    fn from(model: AbilityModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            depth: model.depth,
            subject_related: model.subject_related,
            study_field_id: model.study_field_id,
        }
    }
}

/// Response for listing public abilities with pagination.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
pub struct ListAbilitiesResponse {
    pub items: Vec<AbilityResponse>,
    pub num_pages: u64,
    pub page: u64,
    pub per_page: u64,
}

/// A public ability with everything it is filed under.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
pub struct AbilityDetailResponse {
    pub ability: AbilityResponse,
    pub study_field: Option<ReferenceResponse>,
    pub levels: Vec<ReferenceResponse>,
    pub subjects: Vec<ReferenceResponse>,
    pub systems: Vec<ReferenceResponse>,
    pub ufids: Vec<UfidResponse>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SymptomResponse {
    pub id: i32,
    pub name: String,
}

impl From<SymptomModel> for SymptomResponse {
    fn from(model: SymptomModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
pub struct ListSymptomsResponse {
    pub items: Vec<SymptomResponse>,
    pub num_pages: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
pub struct SymptomDetailResponse {
    pub symptom: SymptomResponse,
    pub subjects: Vec<ReferenceResponse>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub id: i32,
    pub name: String,
}

impl From<ActivityModel> for ActivityResponse {
    fn from(model: ActivityModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// A competence level and the activities filed under it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CompetenceLevelResponse {
    pub id: String,
    pub name: String,
    pub short: String,
    pub description: String,
    pub position: i32,
    pub activities: Vec<ActivityResponse>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SkillResponse {
    pub id: i32,
    pub name: String,
    pub activity_id: i32,
}

impl From<SkillModel> for SkillResponse {
    fn from(model: SkillModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            activity_id: model.activity_id,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
pub struct ListSkillsResponse {
    pub items: Vec<SkillResponse>,
    pub num_pages: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ContactResponse {
    pub id: i32,
    pub salutation: String,
    pub email: String,
}

impl From<ContactModel> for ContactResponse {
    fn from(model: ContactModel) -> Self {
        Self {
            id: model.id,
            salutation: model.salutation,
            email: model.email,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UniversityResponse {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub contacts: Vec<ContactResponse>,
}

impl UniversityResponse {
    pub fn new(university: UniversityModel, contacts: Vec<ContactModel>) -> Self {
        Self {
            id: university.id,
            name: university.name,
            url: university.url,
            contacts: contacts.into_iter().map(ContactResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
pub struct ListUniversitiesResponse {
    pub items: Vec<UniversityResponse>,
}

/// A feedback request without its secret.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub id: i32,
    pub university_id: i32,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

impl From<FeedbackModel> for FeedbackResponse {
    fn from(model: FeedbackModel) -> Self {
        Self {
            id: model.id,
            university_id: model.university_id,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
pub struct ListFeedbackResponse {
    pub items: Vec<FeedbackResponse>,
    pub num_pages: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub target: ::entity::sea_orm_active_enums::CommentTarget,
    pub target_id: i32,
    pub comment: String,
    pub status: CommentStatus,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
}

impl From<CatalogCommentModel> for CommentResponse {
    fn from(model: CatalogCommentModel) -> Self {
        Self {
            id: model.id,
            target: model.target,
            target_id: model.target_id,
            comment: model.comment,
            status: model.status,
            created_at: model.created_at,
            modified_at: model.modified_at,
        }
    }
}

/// A feedback request with its scope, as seen by staff or by the contact holding the link.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct FeedbackDetailResponse {
    pub feedback: FeedbackResponse,
    pub subjects: Vec<ReferenceResponse>,
    pub activities: Vec<ActivityResponse>,
    pub comments: Vec<CommentResponse>,
}

/// A catalog entry open for comments, with the comment already left on it, if any.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CommentableResponse {
    pub id: i32,
    pub name: String,
    pub comment: Option<CommentResponse>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
pub struct ListCommentablesResponse {
    pub items: Vec<CommentableResponse>,
}
