//! Repository module for browsing the public catalog.
//!
//! Lists only ever return entries flagged `public` and are ordered by name. Association
//! tables may hold duplicate rows after repeated imports, so related entries are always
//! looked up through an `IN (subquery)` which collapses them.

use crate::models::request::{AbilityPagination, SymptomPagination};
use crate::models::response::{
    AbilityDetailResponse, AbilityResponse, ActivityResponse, CompetenceLevelResponse,
    ReferenceResponse, SymptomDetailResponse, SymptomResponse, UfidResponse,
};
use ::entity::ability::Model as AbilityModel;
use ::entity::skill::Model as SkillModel;
use ::entity::symptom::Model as SymptomModel;
use ::entity::{
    ability, ability_level, ability_subject, ability_system, ability_ufid, activity,
    competence_level, level, skill, study_field, subject, symptom, symptom_subject, system, ufid,
};
use async_trait::async_trait;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{ExprTrait, Func, Query, SelectStatement};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Value,
};

#[derive(Debug, Clone, Default)]
pub struct DBCatalogRepo {
    pub db_session: DatabaseConnection,
}

/// Read access to the imported catalog.
#[async_trait]
pub trait CatalogRepo: Send + Sync {
    async fn list_abilities(
        &self,
        params: AbilityPagination,
    ) -> Result<(Vec<AbilityModel>, u64), DbErr>;

    /// Returns `None` when the ability does not exist or is not public.
    async fn get_ability(&self, id: i32) -> Result<Option<AbilityDetailResponse>, DbErr>;

    async fn list_symptoms(
        &self,
        params: SymptomPagination,
    ) -> Result<(Vec<SymptomModel>, u64), DbErr>;

    async fn get_symptom(&self, id: i32) -> Result<Option<SymptomDetailResponse>, DbErr>;

    /// Competence levels that have at least one activity, ordered by position.
    async fn list_competence_levels(&self) -> Result<Vec<CompetenceLevelResponse>, DbErr>;

    /// Returns `None` when the activity does not exist.
    async fn list_skills(
        &self,
        activity_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Option<(Vec<SkillModel>, u64)>, DbErr>;
}

/// `SELECT <column> FROM <table> WHERE <owner> = <id>` for use with `in_subquery`.
pub fn linked_ids<E, C, V>(table: E, column: C, owner: C, id: V) -> SelectStatement
where
    E: EntityTrait,
    C: ColumnTrait,
    V: Into<Value>,
{
    let id: Value = id.into();
    Query::select()
        .column(column)
        .from(table)
        .and_where(Expr::col(owner).eq(id))
        .to_owned()
}

fn name_filter(column: impl ColumnTrait, term: &str) -> sea_orm::sea_query::SimpleExpr {
    let query_string = format!("%{}%", term.to_lowercase());
    Func::lower(Expr::col(column)).like(query_string)
}

#[async_trait]
impl CatalogRepo for DBCatalogRepo {
    async fn list_abilities(
        &self,
        params: AbilityPagination,
    ) -> Result<(Vec<AbilityModel>, u64), DbErr> {
        let mut query = ability::Entity::find().filter(ability::Column::Public.eq(true));
        if let Some(term) = params.query_term {
            query = query.filter(name_filter(ability::Column::Name, &term));
        }
        if let Some(depth) = params.depth {
            query = query.filter(ability::Column::Depth.eq(depth));
        }
        if let Some(subject_id) = params.subject_id {
            query = query.filter(ability::Column::Id.in_subquery(linked_ids(
                ability_subject::Entity,
                ability_subject::Column::AbilityId,
                ability_subject::Column::SubjectId,
                subject_id,
            )));
        }
        let ability_pages = query
            .order_by_asc(ability::Column::Name)
            .order_by_asc(ability::Column::Id)
            .paginate(&self.db_session, params.per_page);
        let num_pages = ability_pages.num_pages().await?;
        Ok((ability_pages.fetch_page(params.page).await?, num_pages))
    }

    async fn get_ability(&self, id: i32) -> Result<Option<AbilityDetailResponse>, DbErr> {
        let db = &self.db_session;
        let Some(found) = ability::Entity::find_by_id(id)
            .filter(ability::Column::Public.eq(true))
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let study_field = match &found.study_field_id {
            Some(study_field_id) => study_field::Entity::find_by_id(study_field_id.clone())
                .one(db)
                .await?
                .map(|model| ReferenceResponse {
                    id: model.id,
                    name: model.name,
                }),
            None => None,
        };
        let levels = level::Entity::find()
            .filter(level::Column::Id.in_subquery(linked_ids(
                ability_level::Entity,
                ability_level::Column::LevelId,
                ability_level::Column::AbilityId,
                id,
            )))
            .order_by_asc(level::Column::Name)
            .all(db)
            .await?;
        let subjects = subject::Entity::find()
            .filter(subject::Column::Id.in_subquery(linked_ids(
                ability_subject::Entity,
                ability_subject::Column::SubjectId,
                ability_subject::Column::AbilityId,
                id,
            )))
            .order_by_asc(subject::Column::Name)
            .all(db)
            .await?;
        let systems = system::Entity::find()
            .filter(system::Column::Id.in_subquery(linked_ids(
                ability_system::Entity,
                ability_system::Column::SystemId,
                ability_system::Column::AbilityId,
                id,
            )))
            .order_by_asc(system::Column::Name)
            .all(db)
            .await?;
        let ufids = ufid::Entity::find()
            .filter(ufid::Column::Id.in_subquery(linked_ids(
                ability_ufid::Entity,
                ability_ufid::Column::UfidId,
                ability_ufid::Column::AbilityId,
                id,
            )))
            .order_by_asc(ufid::Column::Id)
            .all(db)
            .await?;

        Ok(Some(AbilityDetailResponse {
            ability: AbilityResponse::from(found),
            study_field,
            levels: levels
                .into_iter()
                .map(|model| ReferenceResponse {
                    id: model.id,
                    name: model.name,
                })
                .collect(),
            subjects: subjects
                .into_iter()
                .map(|model| ReferenceResponse {
                    id: model.id,
                    name: model.name,
                })
                .collect(),
            systems: systems
                .into_iter()
                .map(|model| ReferenceResponse {
                    id: model.id,
                    name: model.name,
                })
                .collect(),
            ufids: ufids
                .into_iter()
                .map(|model| UfidResponse {
                    id: model.id,
                    name: model.name,
                })
                .collect(),
        }))
    }

    async fn list_symptoms(
        &self,
        params: SymptomPagination,
    ) -> Result<(Vec<SymptomModel>, u64), DbErr> {
        let mut query = symptom::Entity::find().filter(symptom::Column::Public.eq(true));
        if let Some(term) = params.query_term {
            query = query.filter(name_filter(symptom::Column::Name, &term));
        }
        if let Some(subject_id) = params.subject_id {
            query = query.filter(symptom::Column::Id.in_subquery(linked_ids(
                symptom_subject::Entity,
                symptom_subject::Column::SymptomId,
                symptom_subject::Column::SubjectId,
                subject_id,
            )));
        }
        let symptom_pages = query
            .order_by_asc(symptom::Column::Name)
            .order_by_asc(symptom::Column::Id)
            .paginate(&self.db_session, params.per_page);
        let num_pages = symptom_pages.num_pages().await?;
        Ok((symptom_pages.fetch_page(params.page).await?, num_pages))
    }

    async fn get_symptom(&self, id: i32) -> Result<Option<SymptomDetailResponse>, DbErr> {
        let db = &self.db_session;
        let Some(found) = symptom::Entity::find_by_id(id)
            .filter(symptom::Column::Public.eq(true))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let subjects = subject::Entity::find()
            .filter(subject::Column::Id.in_subquery(linked_ids(
                symptom_subject::Entity,
                symptom_subject::Column::SubjectId,
                symptom_subject::Column::SymptomId,
                id,
            )))
            .order_by_asc(subject::Column::Name)
            .all(db)
            .await?;
        Ok(Some(SymptomDetailResponse {
            symptom: SymptomResponse::from(found),
            subjects: subjects
                .into_iter()
                .map(|model| ReferenceResponse {
                    id: model.id,
                    name: model.name,
                })
                .collect(),
        }))
    }

    async fn list_competence_levels(&self) -> Result<Vec<CompetenceLevelResponse>, DbErr> {
        let rows = competence_level::Entity::find()
            .find_with_related(activity::Entity)
            .order_by_asc(competence_level::Column::Position)
            .order_by_asc(competence_level::Column::Id)
            .all(&self.db_session)
            .await?;
        Ok(rows
            .into_iter()
            .filter(|(_, activities)| !activities.is_empty())
            .map(|(level, mut activities)| {
                activities.sort_by(|a, b| a.name.cmp(&b.name));
                CompetenceLevelResponse {
                    id: level.id,
                    name: level.name,
                    short: level.short,
                    description: level.description,
                    position: level.position,
                    activities: activities.into_iter().map(ActivityResponse::from).collect(),
                }
            })
            .collect())
    }

    async fn list_skills(
        &self,
        activity_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Option<(Vec<SkillModel>, u64)>, DbErr> {
        let activity = activity::Entity::find_by_id(activity_id)
            .one(&self.db_session)
            .await?;
        if activity.is_none() {
            return Ok(None);
        }
        let skill_pages = skill::Entity::find()
            .filter(skill::Column::ActivityId.eq(activity_id))
            .order_by_asc(skill::Column::Name)
            .order_by_asc(skill::Column::Id)
            .paginate(&self.db_session, per_page);
        let num_pages = skill_pages.num_pages().await?;
        Ok(Some((skill_pages.fetch_page(page).await?, num_pages)))
    }
}
