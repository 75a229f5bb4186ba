use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A request for feedback sent to a university. `secret` is the token embedded in the
/// link mailed to the university's contacts; it is never serialized.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub university_id: i32,
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub secret: String,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::university::Entity",
        from = "Column::UniversityId",
        to = "super::university::Column::Id"
    )]
    University,
    #[sea_orm(has_many = "super::catalog_comment::Entity")]
    CatalogComment,
}

impl Related<super::university::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::University.def()
    }
}

impl Related<super::catalog_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogComment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
