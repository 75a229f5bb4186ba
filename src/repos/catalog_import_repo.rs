//! Bulk writes used by the workbook import.
//!
//! Every method issues one or more conflict-tolerant multi-row statements. Statements are
//! chunked so a single one never exceeds PostgreSQL's bind parameter limit, and an empty
//! input issues no statement at all.

use crate::import::classify::{AbilityRecord, SymptomRecord};
use ::entity::{
    ability, ability_level, ability_subject, ability_system, ability_ufid, activity,
    competence_level, level, skill, study_field, subject, symptom, symptom_subject, system, ufid,
};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect,
};
use std::collections::HashMap;

const MAX_BIND_PARAMS: usize = 60_000;

/// Acronym keyed lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Level,
    Subject,
    System,
    StudyField,
}

/// Association tables whose target is an acronym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationKind {
    AbilityLevel,
    AbilitySubject,
    AbilitySystem,
    SymptomSubject,
}

/// A skill with its activity resolved to a database id.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRow {
    pub id: i32,
    pub name: String,
    pub activity_id: i32,
}

#[async_trait]
pub trait CatalogImportRepo: Send + Sync {
    async fn upsert_ufids(&self, rows: &[(i32, String)]) -> Result<u64, DbErr>;

    async fn upsert_reference(
        &self,
        kind: ReferenceKind,
        rows: &[(String, String)],
    ) -> Result<u64, DbErr>;

    /// Inserts the competence levels that do not exist yet, positioned after the current
    /// maximum in the given order. Existing rows are left untouched.
    async fn insert_missing_competence_levels(
        &self,
        rows: &[(String, String)],
    ) -> Result<u64, DbErr>;

    /// Upserts by activity name, updating the competence level on conflict.
    async fn upsert_activities(&self, rows: &[(String, String)]) -> Result<u64, DbErr>;

    async fn activity_ids_by_name(&self) -> Result<HashMap<String, i32>, DbErr>;

    async fn upsert_skills(&self, rows: &[SkillRow]) -> Result<u64, DbErr>;

    async fn upsert_abilities(&self, rows: &[AbilityRecord]) -> Result<u64, DbErr>;

    async fn upsert_symptoms(&self, rows: &[SymptomRecord]) -> Result<u64, DbErr>;

    /// Removes every association row owned by the given abilities and symptoms.
    async fn delete_associations(
        &self,
        ability_ids: &[i32],
        symptom_ids: &[i32],
    ) -> Result<u64, DbErr>;

    async fn insert_associations(
        &self,
        kind: AssociationKind,
        rows: &[(i32, String)],
    ) -> Result<u64, DbErr>;

    async fn insert_ability_ufids(&self, rows: &[(i32, i32)]) -> Result<u64, DbErr>;
}

#[derive(Debug, Clone, Default)]
pub struct DBCatalogImportRepo {
    pub db_session: DatabaseConnection,
}

/// Multi-row insert split into statements of at most `MAX_BIND_PARAMS` parameters.
async fn insert_chunked<A>(
    db: &DatabaseConnection,
    models: Vec<A>,
    columns: usize,
    on_conflict: Option<OnConflict>,
) -> Result<u64, DbErr>
where
    A: ActiveModelTrait + Send + Sync,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    let rows_per_statement = (MAX_BIND_PARAMS / columns).max(1);
    let mut written = 0;
    for chunk in models.chunks(rows_per_statement) {
        let mut insert = <A::Entity as EntityTrait>::insert_many(chunk.to_vec());
        if let Some(on_conflict) = &on_conflict {
            insert = insert.on_conflict(on_conflict.clone());
        }
        written += insert.exec_without_returning(db).await?;
    }
    Ok(written)
}

#[async_trait]
impl CatalogImportRepo for DBCatalogImportRepo {
    async fn upsert_ufids(&self, rows: &[(i32, String)]) -> Result<u64, DbErr> {
        let models = rows
            .iter()
            .map(|(id, name)| ufid::ActiveModel {
                id: ActiveValue::Set(*id),
                name: ActiveValue::Set(name.clone()),
            })
            .collect();
        let on_conflict = OnConflict::column(ufid::Column::Id)
            .update_column(ufid::Column::Name)
            .to_owned();
        insert_chunked(&self.db_session, models, 2, Some(on_conflict)).await
    }

    async fn upsert_reference(
        &self,
        kind: ReferenceKind,
        rows: &[(String, String)],
    ) -> Result<u64, DbErr> {
        let db = &self.db_session;
        match kind {
            ReferenceKind::Level => {
                let models = rows
                    .iter()
                    .map(|(id, name)| level::ActiveModel {
                        id: ActiveValue::Set(id.clone()),
                        name: ActiveValue::Set(name.clone()),
                    })
                    .collect();
                let on_conflict = OnConflict::column(level::Column::Id)
                    .update_column(level::Column::Name)
                    .to_owned();
                insert_chunked(db, models, 2, Some(on_conflict)).await
            }
            ReferenceKind::Subject => {
                let models = rows
                    .iter()
                    .map(|(id, name)| subject::ActiveModel {
                        id: ActiveValue::Set(id.clone()),
                        name: ActiveValue::Set(name.clone()),
                    })
                    .collect();
                let on_conflict = OnConflict::column(subject::Column::Id)
                    .update_column(subject::Column::Name)
                    .to_owned();
                insert_chunked(db, models, 2, Some(on_conflict)).await
            }
            ReferenceKind::System => {
                let models = rows
                    .iter()
                    .map(|(id, name)| system::ActiveModel {
                        id: ActiveValue::Set(id.clone()),
                        name: ActiveValue::Set(name.clone()),
                    })
                    .collect();
                let on_conflict = OnConflict::column(system::Column::Id)
                    .update_column(system::Column::Name)
                    .to_owned();
                insert_chunked(db, models, 2, Some(on_conflict)).await
            }
            ReferenceKind::StudyField => {
                let models = rows
                    .iter()
                    .map(|(id, name)| study_field::ActiveModel {
                        id: ActiveValue::Set(id.clone()),
                        name: ActiveValue::Set(name.clone()),
                    })
                    .collect();
                let on_conflict = OnConflict::column(study_field::Column::Id)
                    .update_column(study_field::Column::Name)
                    .to_owned();
                insert_chunked(db, models, 2, Some(on_conflict)).await
            }
        }
    }

    async fn insert_missing_competence_levels(
        &self,
        rows: &[(String, String)],
    ) -> Result<u64, DbErr> {
        if rows.is_empty() {
            return Ok(0);
        }
        let ids: Vec<String> = rows.iter().map(|(id, _)| id.clone()).collect();
        let existing: Vec<String> = competence_level::Entity::find()
            .select_only()
            .column(competence_level::Column::Id)
            .filter(competence_level::Column::Id.is_in(ids))
            .into_tuple()
            .all(&self.db_session)
            .await?;
        let max_position: Option<i32> = competence_level::Entity::find()
            .select_only()
            .column_as(competence_level::Column::Position.max(), "max_position")
            .into_tuple::<Option<i32>>()
            .one(&self.db_session)
            .await?
            .flatten();
        let mut next_position = max_position.map_or(0, |position| position + 1);
        let mut models = Vec::new();
        for (id, name) in rows.iter().filter(|(id, _)| !existing.contains(id)) {
            models.push(competence_level::ActiveModel {
                id: ActiveValue::Set(id.clone()),
                name: ActiveValue::Set(name.clone()),
                short: ActiveValue::Set(id.clone()),
                description: ActiveValue::Set(String::new()),
                position: ActiveValue::Set(next_position),
            });
            next_position += 1;
        }
        let on_conflict = OnConflict::column(competence_level::Column::Id)
            .do_nothing()
            .to_owned();
        insert_chunked(&self.db_session, models, 5, Some(on_conflict)).await
    }

    async fn upsert_activities(&self, rows: &[(String, String)]) -> Result<u64, DbErr> {
        let models = rows
            .iter()
            .map(|(name, competence_level_id)| activity::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name.clone()),
                competence_level_id: ActiveValue::Set(competence_level_id.clone()),
            })
            .collect();
        let on_conflict = OnConflict::column(activity::Column::Name)
            .update_column(activity::Column::CompetenceLevelId)
            .to_owned();
        insert_chunked(&self.db_session, models, 2, Some(on_conflict)).await
    }

    async fn activity_ids_by_name(&self) -> Result<HashMap<String, i32>, DbErr> {
        let rows: Vec<(i32, String)> = activity::Entity::find()
            .select_only()
            .column(activity::Column::Id)
            .column(activity::Column::Name)
            .into_tuple()
            .all(&self.db_session)
            .await?;
        Ok(rows.into_iter().map(|(id, name)| (name, id)).collect())
    }

    async fn upsert_skills(&self, rows: &[SkillRow]) -> Result<u64, DbErr> {
        let models = rows
            .iter()
            .map(|row| skill::ActiveModel {
                id: ActiveValue::Set(row.id),
                name: ActiveValue::Set(row.name.clone()),
                activity_id: ActiveValue::Set(row.activity_id),
            })
            .collect();
        let on_conflict = OnConflict::column(skill::Column::Id)
            .update_columns([skill::Column::Name, skill::Column::ActivityId])
            .to_owned();
        insert_chunked(&self.db_session, models, 3, Some(on_conflict)).await
    }

    async fn upsert_abilities(&self, rows: &[AbilityRecord]) -> Result<u64, DbErr> {
        let models = rows
            .iter()
            .map(|row| ability::ActiveModel {
                id: ActiveValue::Set(row.id),
                name: ActiveValue::Set(row.name.clone()),
                depth: ActiveValue::Set(row.depth),
                subject_related: ActiveValue::Set(row.subject_related),
                public: ActiveValue::Set(row.public),
                study_field_id: ActiveValue::Set(row.study_field.clone()),
            })
            .collect();
        let on_conflict = OnConflict::column(ability::Column::Id)
            .update_columns([
                ability::Column::Name,
                ability::Column::Depth,
                ability::Column::SubjectRelated,
                ability::Column::Public,
                ability::Column::StudyFieldId,
            ])
            .to_owned();
        insert_chunked(&self.db_session, models, 6, Some(on_conflict)).await
    }

    async fn upsert_symptoms(&self, rows: &[SymptomRecord]) -> Result<u64, DbErr> {
        let models = rows
            .iter()
            .map(|row| symptom::ActiveModel {
                id: ActiveValue::Set(row.id),
                name: ActiveValue::Set(row.name.clone()),
                public: ActiveValue::Set(row.public),
            })
            .collect();
        let on_conflict = OnConflict::column(symptom::Column::Id)
            .update_columns([symptom::Column::Name, symptom::Column::Public])
            .to_owned();
        insert_chunked(&self.db_session, models, 3, Some(on_conflict)).await
    }

    async fn delete_associations(
        &self,
        ability_ids: &[i32],
        symptom_ids: &[i32],
    ) -> Result<u64, DbErr> {
        let db = &self.db_session;
        let mut deleted = 0;
        for chunk in ability_ids.chunks(MAX_BIND_PARAMS) {
            deleted += ability_level::Entity::delete_many()
                .filter(ability_level::Column::AbilityId.is_in(chunk.to_vec()))
                .exec(db)
                .await?
                .rows_affected;
            deleted += ability_subject::Entity::delete_many()
                .filter(ability_subject::Column::AbilityId.is_in(chunk.to_vec()))
                .exec(db)
                .await?
                .rows_affected;
            deleted += ability_system::Entity::delete_many()
                .filter(ability_system::Column::AbilityId.is_in(chunk.to_vec()))
                .exec(db)
                .await?
                .rows_affected;
            deleted += ability_ufid::Entity::delete_many()
                .filter(ability_ufid::Column::AbilityId.is_in(chunk.to_vec()))
                .exec(db)
                .await?
                .rows_affected;
        }
        for chunk in symptom_ids.chunks(MAX_BIND_PARAMS) {
            deleted += symptom_subject::Entity::delete_many()
                .filter(symptom_subject::Column::SymptomId.is_in(chunk.to_vec()))
                .exec(db)
                .await?
                .rows_affected;
        }
        Ok(deleted)
    }

    async fn insert_associations(
        &self,
        kind: AssociationKind,
        rows: &[(i32, String)],
    ) -> Result<u64, DbErr> {
        let db = &self.db_session;
        match kind {
            AssociationKind::AbilityLevel => {
                let models = rows
                    .iter()
                    .map(|(ability_id, level_id)| ability_level::ActiveModel {
                        id: ActiveValue::NotSet,
                        ability_id: ActiveValue::Set(*ability_id),
                        level_id: ActiveValue::Set(level_id.clone()),
                    })
                    .collect();
                insert_chunked(db, models, 2, None).await
            }
            AssociationKind::AbilitySubject => {
                let models = rows
                    .iter()
                    .map(|(ability_id, subject_id)| ability_subject::ActiveModel {
                        id: ActiveValue::NotSet,
                        ability_id: ActiveValue::Set(*ability_id),
                        subject_id: ActiveValue::Set(subject_id.clone()),
                    })
                    .collect();
                insert_chunked(db, models, 2, None).await
            }
            AssociationKind::AbilitySystem => {
                let models = rows
                    .iter()
                    .map(|(ability_id, system_id)| ability_system::ActiveModel {
                        id: ActiveValue::NotSet,
                        ability_id: ActiveValue::Set(*ability_id),
                        system_id: ActiveValue::Set(system_id.clone()),
                    })
                    .collect();
                insert_chunked(db, models, 2, None).await
            }
            AssociationKind::SymptomSubject => {
                let models = rows
                    .iter()
                    .map(|(symptom_id, subject_id)| symptom_subject::ActiveModel {
                        id: ActiveValue::NotSet,
                        symptom_id: ActiveValue::Set(*symptom_id),
                        subject_id: ActiveValue::Set(subject_id.clone()),
                    })
                    .collect();
                insert_chunked(db, models, 2, None).await
            }
        }
    }

    async fn insert_ability_ufids(&self, rows: &[(i32, i32)]) -> Result<u64, DbErr> {
        let models = rows
            .iter()
            .map(|(ability_id, ufid_id)| ability_ufid::ActiveModel {
                id: ActiveValue::NotSet,
                ability_id: ActiveValue::Set(*ability_id),
                ufid_id: ActiveValue::Set(*ufid_id),
            })
            .collect();
        insert_chunked(&self.db_session, models, 2, None).await
    }
}
