use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ability_subject")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ability_id: i32,
    pub subject_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ability::Entity",
        from = "Column::AbilityId",
        to = "super::ability::Column::Id"
    )]
    Ability,
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
}

impl ActiveModelBehavior for ActiveModel {}
