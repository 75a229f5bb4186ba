//! Repository module for feedback requests and the comments left through them.
//!
//! A feedback request covers a set of subjects and activities. The abilities and symptoms
//! filed under those subjects, and the skills of those activities, are what the contact
//! holding the request's secret may comment on.

use crate::models::common::{CommentReview, FeedbackScope, NewFeedback};
use crate::models::request::FeedbackPagination;
use crate::models::response::{
    ActivityResponse, CommentResponse, CommentableResponse, FeedbackDetailResponse,
    FeedbackResponse, ReferenceResponse,
};
use crate::repos::catalog_repo::linked_ids;
use ::entity::catalog_comment::Model as CatalogCommentModel;
use ::entity::feedback::Model as FeedbackModel;
use ::entity::sea_orm_active_enums::{CommentStatus, CommentTarget};
use ::entity::{
    ability, ability_subject, activity, catalog_comment, feedback, feedback_activity,
    feedback_subject, skill, subject, symptom, symptom_subject,
};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, UpdateMany,
};
use std::collections::HashMap;

/// Moves an open comment to `status`. Comments that are no longer open match no row,
/// so the status check and the write happen in one statement.
fn review_open_comment(
    comment_id: i32,
    status: CommentStatus,
    modified_at: NaiveDateTime,
) -> UpdateMany<catalog_comment::Entity> {
    catalog_comment::Entity::update_many()
        .col_expr(catalog_comment::Column::Status, status.as_enum())
        .col_expr(catalog_comment::Column::ModifiedAt, Expr::value(modified_at))
        .filter(catalog_comment::Column::Id.eq(comment_id))
        .filter(catalog_comment::Column::Status.eq(CommentStatus::Open))
}

#[derive(Debug, Clone, Default)]
pub struct DBFeedbackRepo {
    pub db_session: DatabaseConnection,
}

#[async_trait]
pub trait FeedbackRepo: Send + Sync {
    /// True when every subject and activity id exists.
    async fn verify_scope_exists(
        &self,
        subject_ids: &[String],
        activity_ids: &[i32],
    ) -> Result<bool, DbErr>;

    /// Stores the request with its subjects and activities in one transaction.
    async fn write_one(&self, new_feedback: NewFeedback) -> Result<FeedbackModel, DbErr>;

    async fn list_paginated(
        &self,
        params: FeedbackPagination,
    ) -> Result<(Vec<FeedbackModel>, u64), DbErr>;

    async fn get_one(&self, id: i32) -> Result<Option<FeedbackDetailResponse>, DbErr>;

    async fn get_by_secret(&self, secret: &str) -> Result<Option<FeedbackScope>, DbErr>;

    async fn update_notes(&self, feedback_id: i32, notes: String) -> Result<FeedbackModel, DbErr>;

    /// Moves an open comment to `status`. Reviewed comments are left alone.
    async fn review_comment(
        &self,
        comment_id: i32,
        status: CommentStatus,
    ) -> Result<CommentReview<CatalogCommentModel>, DbErr>;

    async fn commentable_abilities(
        &self,
        feedback_id: i32,
        subject_id: &str,
    ) -> Result<Vec<CommentableResponse>, DbErr>;

    async fn commentable_symptoms(
        &self,
        feedback_id: i32,
        subject_id: &str,
    ) -> Result<Vec<CommentableResponse>, DbErr>;

    async fn commentable_skills(
        &self,
        feedback_id: i32,
        activity_id: i32,
    ) -> Result<Vec<CommentableResponse>, DbErr>;

    /// True when the entry is filed under a subject or activity of the feedback request.
    async fn target_in_scope(
        &self,
        feedback_id: i32,
        target: CommentTarget,
        target_id: i32,
    ) -> Result<bool, DbErr>;

    /// Creates the comment of this request on the entry, or replaces its text and reopens it.
    async fn upsert_comment(
        &self,
        feedback_id: i32,
        target: CommentTarget,
        target_id: i32,
        comment: String,
    ) -> Result<CatalogCommentModel, DbErr>;
}

async fn load_scope<C: ConnectionTrait>(
    db: &C,
    found: FeedbackModel,
) -> Result<FeedbackScope, DbErr> {
    let subjects = subject::Entity::find()
        .filter(subject::Column::Id.in_subquery(linked_ids(
            feedback_subject::Entity,
            feedback_subject::Column::SubjectId,
            feedback_subject::Column::FeedbackId,
            found.id,
        )))
        .order_by_asc(subject::Column::Name)
        .all(db)
        .await?;
    let activities = activity::Entity::find()
        .filter(activity::Column::Id.in_subquery(linked_ids(
            feedback_activity::Entity,
            feedback_activity::Column::ActivityId,
            feedback_activity::Column::FeedbackId,
            found.id,
        )))
        .order_by_asc(activity::Column::Name)
        .all(db)
        .await?;
    Ok(FeedbackScope {
        feedback: found,
        subjects: subjects
            .into_iter()
            .map(|model| ReferenceResponse {
                id: model.id,
                name: model.name,
            })
            .collect(),
        activities: activities.into_iter().map(ActivityResponse::from).collect(),
    })
}

async fn comments_by_target<C: ConnectionTrait>(
    db: &C,
    feedback_id: i32,
    target: CommentTarget,
    target_ids: Vec<i32>,
) -> Result<HashMap<i32, CatalogCommentModel>, DbErr> {
    if target_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let comments = catalog_comment::Entity::find()
        .filter(catalog_comment::Column::FeedbackId.eq(feedback_id))
        .filter(catalog_comment::Column::Target.eq(target))
        .filter(catalog_comment::Column::TargetId.is_in(target_ids))
        .all(db)
        .await?;
    Ok(comments
        .into_iter()
        .map(|comment| (comment.target_id, comment))
        .collect())
}

fn with_comments(
    entries: Vec<(i32, String)>,
    mut comments: HashMap<i32, CatalogCommentModel>,
) -> Vec<CommentableResponse> {
    entries
        .into_iter()
        .map(|(id, name)| CommentableResponse {
            id,
            name,
            comment: comments.remove(&id).map(CommentResponse::from),
        })
        .collect()
}

#[async_trait]
impl FeedbackRepo for DBFeedbackRepo {
    async fn verify_scope_exists(
        &self,
        subject_ids: &[String],
        activity_ids: &[i32],
    ) -> Result<bool, DbErr> {
        let subjects = subject::Entity::find()
            .filter(subject::Column::Id.is_in(subject_ids.to_vec()))
            .count(&self.db_session)
            .await?;
        let activities = activity::Entity::find()
            .filter(activity::Column::Id.is_in(activity_ids.to_vec()))
            .count(&self.db_session)
            .await?;
        Ok(subjects == subject_ids.len() as u64 && activities == activity_ids.len() as u64)
    }

    async fn write_one(&self, new_feedback: NewFeedback) -> Result<FeedbackModel, DbErr> {
        let txn = self.db_session.begin().await?;
        let created = feedback::ActiveModel {
            id: Default::default(),
            university_id: ActiveValue::Set(new_feedback.university_id),
            secret: ActiveValue::Set(new_feedback.secret),
            notes: ActiveValue::Set(String::new()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await?;
        if !new_feedback.subject_ids.is_empty() {
            let subject_links: Vec<feedback_subject::ActiveModel> = new_feedback
                .subject_ids
                .into_iter()
                .map(|subject_id| feedback_subject::ActiveModel {
                    feedback_id: ActiveValue::Set(created.id),
                    subject_id: ActiveValue::Set(subject_id),
                })
                .collect();
            feedback_subject::Entity::insert_many(subject_links)
                .exec_without_returning(&txn)
                .await?;
        }
        if !new_feedback.activity_ids.is_empty() {
            let activity_links: Vec<feedback_activity::ActiveModel> = new_feedback
                .activity_ids
                .into_iter()
                .map(|activity_id| feedback_activity::ActiveModel {
                    feedback_id: ActiveValue::Set(created.id),
                    activity_id: ActiveValue::Set(activity_id),
                })
                .collect();
            feedback_activity::Entity::insert_many(activity_links)
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(created)
    }

    async fn list_paginated(
        &self,
        params: FeedbackPagination,
    ) -> Result<(Vec<FeedbackModel>, u64), DbErr> {
        let mut query = feedback::Entity::find();
        if let Some(university_id) = params.university_id {
            query = query.filter(feedback::Column::UniversityId.eq(university_id));
        }
        if let Some(subject_id) = params.subject_id {
            query = query.filter(feedback::Column::Id.in_subquery(linked_ids(
                feedback_subject::Entity,
                feedback_subject::Column::FeedbackId,
                feedback_subject::Column::SubjectId,
                subject_id,
            )));
        }
        let feedback_pages = query
            .order_by_desc(feedback::Column::CreatedAt)
            .order_by_desc(feedback::Column::Id)
            .paginate(&self.db_session, params.per_page);
        let num_pages = feedback_pages.num_pages().await?;
        Ok((feedback_pages.fetch_page(params.page).await?, num_pages))
    }

    async fn get_one(&self, id: i32) -> Result<Option<FeedbackDetailResponse>, DbErr> {
        let Some(found) = feedback::Entity::find_by_id(id)
            .one(&self.db_session)
            .await?
        else {
            return Ok(None);
        };
        let scope = load_scope(&self.db_session, found).await?;
        let comments = catalog_comment::Entity::find()
            .filter(catalog_comment::Column::FeedbackId.eq(id))
            .order_by_asc(catalog_comment::Column::Id)
            .all(&self.db_session)
            .await?;
        Ok(Some(FeedbackDetailResponse {
            feedback: FeedbackResponse::from(scope.feedback),
            subjects: scope.subjects,
            activities: scope.activities,
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        }))
    }

    async fn get_by_secret(&self, secret: &str) -> Result<Option<FeedbackScope>, DbErr> {
        let found = feedback::Entity::find()
            .filter(feedback::Column::Secret.eq(secret))
            .one(&self.db_session)
            .await?;
        match found {
            Some(found) => Ok(Some(load_scope(&self.db_session, found).await?)),
            None => Ok(None),
        }
    }

    async fn update_notes(&self, feedback_id: i32, notes: String) -> Result<FeedbackModel, DbErr> {
        feedback::ActiveModel {
            id: ActiveValue::Unchanged(feedback_id),
            notes: ActiveValue::Set(notes),
            ..Default::default()
        }
        .update(&self.db_session)
        .await
    }

    async fn review_comment(
        &self,
        comment_id: i32,
        status: CommentStatus,
    ) -> Result<CommentReview<CatalogCommentModel>, DbErr> {
        let updated = review_open_comment(comment_id, status, Utc::now().naive_utc())
            .exec_with_returning(&self.db_session)
            .await?;
        if let Some(comment) = updated.into_iter().next() {
            return Ok(CommentReview::Updated(comment));
        }
        let exists = catalog_comment::Entity::find_by_id(comment_id)
            .one(&self.db_session)
            .await?
            .is_some();
        Ok(if exists {
            CommentReview::AlreadyReviewed
        } else {
            CommentReview::NotFound
        })
    }

    async fn commentable_abilities(
        &self,
        feedback_id: i32,
        subject_id: &str,
    ) -> Result<Vec<CommentableResponse>, DbErr> {
        let abilities = ability::Entity::find()
            .filter(ability::Column::Id.in_subquery(linked_ids(
                ability_subject::Entity,
                ability_subject::Column::AbilityId,
                ability_subject::Column::SubjectId,
                subject_id,
            )))
            .order_by_asc(ability::Column::Name)
            .order_by_asc(ability::Column::Id)
            .all(&self.db_session)
            .await?;
        let ids = abilities.iter().map(|model| model.id).collect();
        let comments =
            comments_by_target(&self.db_session, feedback_id, CommentTarget::Ability, ids).await?;
        let entries = abilities
            .into_iter()
            .map(|model| (model.id, model.name))
            .collect();
        Ok(with_comments(entries, comments))
    }

    async fn commentable_symptoms(
        &self,
        feedback_id: i32,
        subject_id: &str,
    ) -> Result<Vec<CommentableResponse>, DbErr> {
        let symptoms = symptom::Entity::find()
            .filter(symptom::Column::Id.in_subquery(linked_ids(
                symptom_subject::Entity,
                symptom_subject::Column::SymptomId,
                symptom_subject::Column::SubjectId,
                subject_id,
            )))
            .order_by_asc(symptom::Column::Name)
            .order_by_asc(symptom::Column::Id)
            .all(&self.db_session)
            .await?;
        let ids = symptoms.iter().map(|model| model.id).collect();
        let comments =
            comments_by_target(&self.db_session, feedback_id, CommentTarget::Symptom, ids).await?;
        let entries = symptoms
            .into_iter()
            .map(|model| (model.id, model.name))
            .collect();
        Ok(with_comments(entries, comments))
    }

    async fn commentable_skills(
        &self,
        feedback_id: i32,
        activity_id: i32,
    ) -> Result<Vec<CommentableResponse>, DbErr> {
        let skills = skill::Entity::find()
            .filter(skill::Column::ActivityId.eq(activity_id))
            .order_by_asc(skill::Column::Name)
            .order_by_asc(skill::Column::Id)
            .all(&self.db_session)
            .await?;
        let ids = skills.iter().map(|model| model.id).collect();
        let comments =
            comments_by_target(&self.db_session, feedback_id, CommentTarget::Skill, ids).await?;
        let entries = skills
            .into_iter()
            .map(|model| (model.id, model.name))
            .collect();
        Ok(with_comments(entries, comments))
    }

    async fn target_in_scope(
        &self,
        feedback_id: i32,
        target: CommentTarget,
        target_id: i32,
    ) -> Result<bool, DbErr> {
        let feedback_subjects = linked_ids(
            feedback_subject::Entity,
            feedback_subject::Column::SubjectId,
            feedback_subject::Column::FeedbackId,
            feedback_id,
        );
        let matches = match target {
            CommentTarget::Ability => {
                ability_subject::Entity::find()
                    .filter(ability_subject::Column::AbilityId.eq(target_id))
                    .filter(ability_subject::Column::SubjectId.in_subquery(feedback_subjects))
                    .count(&self.db_session)
                    .await?
            }
            CommentTarget::Symptom => {
                symptom_subject::Entity::find()
                    .filter(symptom_subject::Column::SymptomId.eq(target_id))
                    .filter(symptom_subject::Column::SubjectId.in_subquery(feedback_subjects))
                    .count(&self.db_session)
                    .await?
            }
            CommentTarget::Skill => {
                skill::Entity::find()
                    .filter(skill::Column::Id.eq(target_id))
                    .filter(skill::Column::ActivityId.in_subquery(linked_ids(
                        feedback_activity::Entity,
                        feedback_activity::Column::ActivityId,
                        feedback_activity::Column::FeedbackId,
                        feedback_id,
                    )))
                    .count(&self.db_session)
                    .await?
            }
        };
        Ok(matches > 0)
    }

    async fn upsert_comment(
        &self,
        feedback_id: i32,
        target: CommentTarget,
        target_id: i32,
        comment: String,
    ) -> Result<CatalogCommentModel, DbErr> {
        let now = Utc::now().naive_utc();
        let new_comment = catalog_comment::ActiveModel {
            id: ActiveValue::NotSet,
            feedback_id: ActiveValue::Set(feedback_id),
            target: ActiveValue::Set(target),
            target_id: ActiveValue::Set(target_id),
            comment: ActiveValue::Set(comment),
            status: ActiveValue::Set(CommentStatus::Open),
            created_at: ActiveValue::Set(now),
            modified_at: ActiveValue::Set(now),
        };
        let on_conflict = OnConflict::columns([
            catalog_comment::Column::FeedbackId,
            catalog_comment::Column::Target,
            catalog_comment::Column::TargetId,
        ])
        .update_columns([
            catalog_comment::Column::Comment,
            catalog_comment::Column::Status,
            catalog_comment::Column::ModifiedAt,
        ])
        .to_owned();
        catalog_comment::Entity::insert(new_comment)
            .on_conflict(on_conflict)
            .exec_with_returning(&self.db_session)
            .await
    }
}
