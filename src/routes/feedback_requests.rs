//! Routes behind the link mailed to university contacts.
//!
//! Every route takes the link's `token` query parameter instead of a JWT. An unknown token
//! answers 403; entries outside the request's subjects and activities answer 404.

use crate::app_factory::AppState;
use crate::models::request::{
    FeedbackTokenParams, UpdateFeedbackNotesRequest, UpsertCommentRequest,
};
use crate::models::response::{
    CommentResponse, FeedbackDetailResponse, FeedbackResponse, ListCommentablesResponse,
};
use crate::services::feedback_service::SubjectEntries;
use ::entity::sea_orm_active_enums::CommentTarget;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use validator::Validate;

pub fn get_feedback_requests_routes() -> Router<AppState> {
    Router::new().nest(
        "/feedback-requests",
        Router::new()
            .route("/current", get(get_current).put(update_notes))
            .route(
                "/subjects/{subject_id}/abilities",
                get(list_subject_abilities),
            )
            .route("/subjects/{subject_id}/symptoms", get(list_subject_symptoms))
            .route(
                "/activities/{activity_id}/skills",
                get(list_activity_skills),
            )
            .route("/comments/{target}/{target_id}", put(upsert_comment)),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/feedback-requests/current",
    tag = "Feedback requests",
    params(
        FeedbackTokenParams
    ),
    responses(
        (status = 200, description = "OK", body = FeedbackDetailResponse),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Invalid feedback token")
    )
)]
async fn get_current(
    State(state): State<AppState>,
    params: Query<FeedbackTokenParams>,
) -> Response {
    if let Err(err) = params.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state.feedback_service.get_current(params.0.token).await
}

#[utoipa::path(
    put,
    path = "/api/v1/feedback-requests/current",
    tag = "Feedback requests",
    request_body = UpdateFeedbackNotesRequest,
    params(
        FeedbackTokenParams
    ),
    responses(
        (status = 200, description = "OK", body = FeedbackResponse),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Invalid feedback token")
    )
)]
async fn update_notes(
    State(state): State<AppState>,
    params: Query<FeedbackTokenParams>,
    Json(payload): Json<UpdateFeedbackNotesRequest>,
) -> Response {
    if let Err(err) = params.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    if let Err(err) = payload.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state
        .feedback_service
        .update_notes(params.0.token, payload.notes)
        .await
}

#[utoipa::path(
    get,
    path = "/api/v1/feedback-requests/subjects/{subject_id}/abilities",
    tag = "Feedback requests",
    params(
        ("subject_id" = String, Path, description = "Subject acronym"),
        FeedbackTokenParams
    ),
    responses(
        (status = 200, description = "Abilities of the subject with this request's comments", body = ListCommentablesResponse),
        (status = 403, description = "Invalid feedback token"),
        (status = 404, description = "Subject is not part of this request")
    )
)]
async fn list_subject_abilities(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    params: Query<FeedbackTokenParams>,
) -> Response {
    if let Err(err) = params.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state
        .feedback_service
        .list_subject_commentables(params.0.token, SubjectEntries::Abilities, subject_id)
        .await
}

#[utoipa::path(
    get,
    path = "/api/v1/feedback-requests/subjects/{subject_id}/symptoms",
    tag = "Feedback requests",
    params(
        ("subject_id" = String, Path, description = "Subject acronym"),
        FeedbackTokenParams
    ),
    responses(
        (status = 200, description = "Symptoms of the subject with this request's comments", body = ListCommentablesResponse),
        (status = 403, description = "Invalid feedback token"),
        (status = 404, description = "Subject is not part of this request")
    )
)]
async fn list_subject_symptoms(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    params: Query<FeedbackTokenParams>,
) -> Response {
    if let Err(err) = params.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state
        .feedback_service
        .list_subject_commentables(params.0.token, SubjectEntries::Symptoms, subject_id)
        .await
}

#[utoipa::path(
    get,
    path = "/api/v1/feedback-requests/activities/{activity_id}/skills",
    tag = "Feedback requests",
    params(
        ("activity_id" = i32, Path, description = "Activity ID"),
        FeedbackTokenParams
    ),
    responses(
        (status = 200, description = "Skills of the activity with this request's comments", body = ListCommentablesResponse),
        (status = 403, description = "Invalid feedback token"),
        (status = 404, description = "Activity is not part of this request")
    )
)]
async fn list_activity_skills(
    State(state): State<AppState>,
    Path(activity_id): Path<i32>,
    params: Query<FeedbackTokenParams>,
) -> Response {
    if let Err(err) = params.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state
        .feedback_service
        .list_activity_commentables(params.0.token, activity_id)
        .await
}

#[utoipa::path(
    put,
    path = "/api/v1/feedback-requests/comments/{target}/{target_id}",
    tag = "Feedback requests",
    request_body = UpsertCommentRequest,
    params(
        ("target" = CommentTarget, Path, description = "Kind of catalog entry"),
        ("target_id" = i32, Path, description = "ID of the catalog entry"),
        FeedbackTokenParams
    ),
    responses(
        (status = 200, description = "Comment saved and reopened for review", body = CommentResponse),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Invalid feedback token"),
        (status = 404, description = "Entry is not part of this request")
    )
)]
async fn upsert_comment(
    State(state): State<AppState>,
    Path((target, target_id)): Path<(CommentTarget, i32)>,
    params: Query<FeedbackTokenParams>,
    Json(payload): Json<UpsertCommentRequest>,
) -> Response {
    if let Err(err) = params.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    if let Err(err) = payload.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state
        .feedback_service
        .upsert_comment(params.0.token, target, target_id, payload.comment)
        .await
}
