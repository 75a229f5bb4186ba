//! Service for the feedback workflow.
//!
//! Staff create feedback requests and review the comments that come back. Contacts at the
//! university reach their request through the secret mailed to them; every token endpoint
//! resolves that secret first and answers 403 when it matches nothing.

use crate::models::common::{CommentReview, FeedbackScope, NewFeedback};
use crate::models::request::{CreateFeedbackRequest, FeedbackPagination};
use crate::models::response::{
    CommentResponse, FeedbackResponse, ListCommentablesResponse, ListFeedbackResponse,
};
use crate::repos::emails_repo::EmailsRepo;
use crate::repos::feedback_repo::FeedbackRepo;
use crate::repos::university_repo::UniversityRepo;
use ::entity::sea_orm_active_enums::{CommentStatus, CommentTarget};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const FEEDBACK_EMAIL_SUBJECT: &str = "LZK: Request for feedback";

#[derive(Clone)]
pub struct FeedbackService {
    pub feedback_repo: Arc<dyn FeedbackRepo>,
    pub university_repo: Arc<dyn UniversityRepo>,
    pub emails_repo: Arc<dyn EmailsRepo>,
    pub public_base_url: String,
}

/// Entries of a subject that a contact can comment on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectEntries {
    Abilities,
    Symptoms,
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn feedback_email_body(salutation: &str, university: &str, link: &str) -> String {
    let salutation = escape_html(salutation);
    let university = escape_html(university);
    let link = escape_html(link);
    format!(
        "<p>{salutation},</p>\
         <p>we would like to ask {university} for feedback on the learning objectives \
         catalog. Please follow the link below to review the entries and leave your \
         comments.</p>\
         <p><a href=\"{link}\">{link}</a></p>"
    )
}

fn database_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error").into_response()
}

impl FeedbackService {
    fn feedback_link(&self, secret: &str) -> String {
        format!(
            "{}/feedback?token={}",
            self.public_base_url.trim_end_matches('/'),
            secret
        )
    }

    async fn resolve_token(&self, token: &str) -> Result<FeedbackScope, Response> {
        match self.feedback_repo.get_by_secret(token).await {
            Ok(Some(scope)) => Ok(scope),
            Ok(None) => {
                warn!("Rejected unknown feedback token");
                Err((StatusCode::FORBIDDEN, "Invalid feedback token").into_response())
            }
            Err(err) => {
                error!(%err, "Error occurred resolving feedback token");
                Err(database_error())
            }
        }
    }

    /// Stores the request and mails its link to every contact of the university.
    /// A failed email is logged and does not undo the request.
    pub async fn create_one(self, payload: CreateFeedbackRequest) -> Response {
        info!(
            "Creating feedback request for university {}...",
            payload.university_id
        );
        let university = match self.university_repo.get_one(payload.university_id).await {
            Ok(Some(university)) => university,
            Ok(None) => return (StatusCode::BAD_REQUEST, "Unknown university").into_response(),
            Err(err) => {
                error!(%err, "Error occurred retrieving university");
                return database_error();
            }
        };
        let new_feedback = NewFeedback::new(
            payload.university_id,
            payload.subject_ids,
            payload.activity_ids,
        );
        match self
            .feedback_repo
            .verify_scope_exists(&new_feedback.subject_ids, &new_feedback.activity_ids)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                return (StatusCode::BAD_REQUEST, "Unknown subject or activity").into_response()
            }
            Err(err) => {
                error!(%err, "Error occurred verifying feedback scope");
                return database_error();
            }
        }

        let link = self.feedback_link(&new_feedback.secret);
        let created = match self.feedback_repo.write_one(new_feedback).await {
            Ok(created) => created,
            Err(write_error) => {
                error!(%write_error, "Error occurred writing feedback request");
                return database_error();
            }
        };

        for contact in &university.contacts {
            info!("Sending feedback request {} to {}", created.id, contact.email);
            let body = feedback_email_body(&contact.salutation, &university.name, &link);
            if let Err(err) = self
                .emails_repo
                .send_email(
                    contact.email.clone(),
                    FEEDBACK_EMAIL_SUBJECT.to_string(),
                    body,
                )
                .await
            {
                error!(%err, "Failed to send feedback request to {}", contact.email);
            }
        }
        (StatusCode::CREATED, Json(FeedbackResponse::from(created))).into_response()
    }

    pub async fn list(self, params: FeedbackPagination) -> Response {
        let (page, per_page) = (params.page, params.per_page);
        info!("Getting page {page} of feedback requests with per page {per_page}...");
        match self.feedback_repo.list_paginated(params).await {
            Ok((rows, num_pages)) => Json(ListFeedbackResponse {
                items: rows.into_iter().map(FeedbackResponse::from).collect(),
                num_pages,
                page,
                per_page,
            })
            .into_response(),
            Err(err) => {
                error!(%err, "Error occurred paginating feedback requests");
                database_error()
            }
        }
    }

    pub async fn get_one(self, id: i32) -> Response {
        info!("Getting feedback request {id}...");
        match self.feedback_repo.get_one(id).await {
            Ok(Some(detail)) => Json(detail).into_response(),
            Ok(None) => (StatusCode::NOT_FOUND, "No such feedback request").into_response(),
            Err(err) => {
                error!(%err, "Error occurred retrieving feedback request");
                database_error()
            }
        }
    }

    pub async fn review_comment(self, comment_id: i32, status: CommentStatus) -> Response {
        info!("Setting comment {comment_id} to {status:?}...");
        match self.feedback_repo.review_comment(comment_id, status).await {
            Ok(CommentReview::Updated(comment)) => {
                Json(CommentResponse::from(comment)).into_response()
            }
            Ok(CommentReview::NotFound) => {
                (StatusCode::NOT_FOUND, "No such comment").into_response()
            }
            Ok(CommentReview::AlreadyReviewed) => {
                (StatusCode::CONFLICT, "Comment has already been reviewed").into_response()
            }
            Err(err) => {
                error!(%err, "Error occurred reviewing comment");
                database_error()
            }
        }
    }

    pub async fn get_current(self, token: String) -> Response {
        let scope = match self.resolve_token(&token).await {
            Ok(scope) => scope,
            Err(response) => return response,
        };
        self.get_one(scope.feedback.id).await
    }

    pub async fn update_notes(self, token: String, notes: String) -> Response {
        let scope = match self.resolve_token(&token).await {
            Ok(scope) => scope,
            Err(response) => return response,
        };
        info!("Updating notes of feedback request {}...", scope.feedback.id);
        match self
            .feedback_repo
            .update_notes(scope.feedback.id, notes)
            .await
        {
            Ok(updated) => Json(FeedbackResponse::from(updated)).into_response(),
            Err(err) => {
                error!(%err, "Error occurred updating feedback notes");
                database_error()
            }
        }
    }

    pub async fn list_subject_commentables(
        self,
        token: String,
        entries: SubjectEntries,
        subject_id: String,
    ) -> Response {
        let scope = match self.resolve_token(&token).await {
            Ok(scope) => scope,
            Err(response) => return response,
        };
        if !scope.covers_subject(&subject_id) {
            return (StatusCode::NOT_FOUND, "Subject is not part of this request").into_response();
        }
        let feedback_id = scope.feedback.id;
        let listed = match entries {
            SubjectEntries::Abilities => {
                self.feedback_repo
                    .commentable_abilities(feedback_id, &subject_id)
                    .await
            }
            SubjectEntries::Symptoms => {
                self.feedback_repo
                    .commentable_symptoms(feedback_id, &subject_id)
                    .await
            }
        };
        match listed {
            Ok(items) => Json(ListCommentablesResponse { items }).into_response(),
            Err(err) => {
                error!(%err, "Error occurred listing commentable entries");
                database_error()
            }
        }
    }

    pub async fn list_activity_commentables(self, token: String, activity_id: i32) -> Response {
        let scope = match self.resolve_token(&token).await {
            Ok(scope) => scope,
            Err(response) => return response,
        };
        if !scope.covers_activity(activity_id) {
            return (StatusCode::NOT_FOUND, "Activity is not part of this request")
                .into_response();
        }
        match self
            .feedback_repo
            .commentable_skills(scope.feedback.id, activity_id)
            .await
        {
            Ok(items) => Json(ListCommentablesResponse { items }).into_response(),
            Err(err) => {
                error!(%err, "Error occurred listing commentable skills");
                database_error()
            }
        }
    }

    pub async fn upsert_comment(
        self,
        token: String,
        target: CommentTarget,
        target_id: i32,
        comment: String,
    ) -> Response {
        let scope = match self.resolve_token(&token).await {
            Ok(scope) => scope,
            Err(response) => return response,
        };
        let feedback_id = scope.feedback.id;
        match self
            .feedback_repo
            .target_in_scope(feedback_id, target, target_id)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                return (StatusCode::NOT_FOUND, "Entry is not part of this request")
                    .into_response()
            }
            Err(err) => {
                error!(%err, "Error occurred checking comment scope");
                return database_error();
            }
        }
        info!("Saving comment of feedback request {feedback_id} on {target:?} {target_id}...");
        match self
            .feedback_repo
            .upsert_comment(feedback_id, target, target_id, comment)
            .await
        {
            Ok(saved) => Json(CommentResponse::from(saved)).into_response(),
            Err(err) => {
                error!(%err, "Error occurred saving comment");
                database_error()
            }
        }
    }
}
