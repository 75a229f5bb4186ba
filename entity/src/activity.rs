use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "activity")]
#[schema(as = ActivityModel)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub competence_level_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::competence_level::Entity",
        from = "Column::CompetenceLevelId",
        to = "super::competence_level::Column::Id"
    )]
    CompetenceLevel,
    #[sea_orm(has_many = "super::skill::Entity")]
    Skill,
}

impl Related<super::competence_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompetenceLevel.def()
    }
}

impl Related<super::skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Skill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
