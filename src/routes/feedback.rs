//! Staff routes for sending feedback requests to universities and reviewing the comments
//! that come back.

use crate::app_factory::AppState;
use crate::auth::validate_at_least_curator;
use crate::models::auth::AuthenticatedUser;
use crate::models::request::{
    CreateFeedbackRequest, FeedbackPagination, UpdateCommentStatusRequest,
};
use crate::models::response::{
    CommentResponse, FeedbackDetailResponse, FeedbackResponse, ListFeedbackResponse,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use validator::Validate;

pub fn get_feedback_routes() -> Router<AppState> {
    Router::new().nest(
        "/feedback",
        Router::new()
            .route("/", get(list_feedback).post(create_feedback))
            .route("/{feedback_id}", get(get_one_feedback))
            .route("/comments/{comment_id}/status", put(review_comment)),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    tag = "Feedback",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Created and mailed to the university contacts", body = FeedbackResponse),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("jwt_cookie_auth" = [])
    )
)]
async fn create_feedback(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Response {
    if !validate_at_least_curator(&authenticated_user.role) {
        return (StatusCode::FORBIDDEN, "Must have at least curator role").into_response();
    }
    if let Err(err) = payload.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state.feedback_service.create_one(payload).await
}

#[utoipa::path(
    get,
    path = "/api/v1/feedback",
    tag = "Feedback",
    params(
        FeedbackPagination
    ),
    responses(
        (status = 200, description = "OK", body = ListFeedbackResponse),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("jwt_cookie_auth" = [])
    )
)]
async fn list_feedback(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    pagination: Query<FeedbackPagination>,
) -> Response {
    if !validate_at_least_curator(&authenticated_user.role) {
        return (StatusCode::FORBIDDEN, "Must have at least curator role").into_response();
    }
    if let Err(err) = pagination.0.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state.feedback_service.list(pagination.0).await
}

#[utoipa::path(
    get,
    path = "/api/v1/feedback/{feedback_id}",
    tag = "Feedback",
    params(
        ("feedback_id" = i32, Path, description = "Feedback request ID")
    ),
    responses(
        (status = 200, description = "OK", body = FeedbackDetailResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    security(
        ("jwt_cookie_auth" = [])
    )
)]
async fn get_one_feedback(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Response {
    if !validate_at_least_curator(&authenticated_user.role) {
        return (StatusCode::FORBIDDEN, "Must have at least curator role").into_response();
    }
    state.feedback_service.get_one(id).await
}

#[utoipa::path(
    put,
    path = "/api/v1/feedback/comments/{comment_id}/status",
    tag = "Feedback",
    request_body = UpdateCommentStatusRequest,
    params(
        ("comment_id" = i32, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "OK", body = CommentResponse),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Comment was already reviewed")
    ),
    security(
        ("jwt_cookie_auth" = [])
    )
)]
async fn review_comment(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(comment_id): Path<i32>,
    Json(payload): Json<UpdateCommentStatusRequest>,
) -> Response {
    if !validate_at_least_curator(&authenticated_user.role) {
        return (StatusCode::FORBIDDEN, "Must have at least curator role").into_response();
    }
    if let Err(err) = payload.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state
        .feedback_service
        .review_comment(comment_id, payload.status)
        .await
}
