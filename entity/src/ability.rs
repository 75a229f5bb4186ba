use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A general learning objective. Ids come from the objectives sheet, not a sequence.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "ability")]
#[schema(as = AbilityModel)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub depth: Option<i16>,
    pub subject_related: bool,
    pub public: bool,
    pub study_field_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::study_field::Entity",
        from = "Column::StudyFieldId",
        to = "super::study_field::Column::Id"
    )]
    StudyField,
}

impl Related<super::study_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudyField.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
