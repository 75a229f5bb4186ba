use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Review state of a catalog comment. Comments start `Open` and staff move them to
/// `Accepted` or `Discarded`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "comment_status")]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "discarded")]
    Discarded,
}

/// Which catalog table a comment refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "comment_target")]
#[serde(rename_all = "lowercase")]
pub enum CommentTarget {
    #[sea_orm(string_value = "ability")]
    Ability,
    #[sea_orm(string_value = "symptom")]
    Symptom,
    #[sea_orm(string_value = "skill")]
    Skill,
}
