//! Routes for maintaining the universities feedback is requested from, and their contacts.

use crate::app_factory::AppState;
use crate::auth::validate_at_least_curator;
use crate::models::auth::AuthenticatedUser;
use crate::models::request::CreateUniversityRequest;
use crate::models::response::{ListUniversitiesResponse, UniversityResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use validator::Validate;

pub fn get_universities_routes() -> Router<AppState> {
    Router::new().nest(
        "/universities",
        Router::new().route("/", get(list_universities).post(create_university)),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/universities",
    tag = "Universities",
    request_body = CreateUniversityRequest,
    responses(
        (status = 201, description = "Created", body = UniversityResponse),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("jwt_cookie_auth" = [])
    )
)]
async fn create_university(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<CreateUniversityRequest>,
) -> Response {
    if !validate_at_least_curator(&authenticated_user.role) {
        return (StatusCode::FORBIDDEN, "Must have at least curator role").into_response();
    }
    if let Err(err) = payload.validate() {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }
    state.university_service.create_one(payload).await
}

#[utoipa::path(
    get,
    path = "/api/v1/universities",
    tag = "Universities",
    responses(
        (status = 200, description = "OK", body = ListUniversitiesResponse),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("jwt_cookie_auth" = [])
    )
)]
async fn list_universities(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Response {
    if !validate_at_least_curator(&authenticated_user.role) {
        return (StatusCode::FORBIDDEN, "Must have at least curator role").into_response();
    }
    state.university_service.list().await
}

#[cfg(test)]
mod tests {
    use crate::models::auth::Role;
    use crate::models::response::{ListUniversitiesResponse, UniversityResponse};
    use crate::test_tools::{build_test_app, get_mock_jwt, get_mock_jwt_with_role};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    fn create_request(jwt: Option<String>, payload: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(http::Method::POST)
            .uri("/api/v1/universities")
            .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
        if let Some(jwt) = jwt {
            builder = builder.header(http::header::COOKIE, format!("jwt={jwt}"));
        }
        builder
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_university_no_auth() {
        let app = build_test_app();
        let response = app
            .oneshot(create_request(
                None,
                json!({"name": "Uni Wien", "url": "https://www.univie.ac.at", "contacts": []}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_university_with_contacts() {
        let app = build_test_app();
        let response = app
            .oneshot(create_request(
                Some(get_mock_jwt_with_role(Role::Curator)),
                json!({
                    "name": "Uni Wien",
                    "url": "https://www.univie.ac.at",
                    "contacts": [
                        {"salutation": "Dear Dr. Huber", "email": "huber@example.com"}
                    ]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let actual: UniversityResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(actual.name, "Uni Wien");
        assert_eq!(actual.contacts.len(), 1);
        assert_eq!(actual.contacts[0].email, "huber@example.com");
    }

    #[tokio::test]
    async fn create_university_rejects_bad_contact_email() {
        let app = build_test_app();
        let response = app
            .oneshot(create_request(
                Some(get_mock_jwt()),
                json!({
                    "name": "Uni Wien",
                    "url": "https://www.univie.ac.at",
                    "contacts": [{"salutation": "Hello", "email": "not-an-email"}]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_universities() {
        let app = build_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/universities")
                    .header(http::header::COOKIE, format!("jwt={}", get_mock_jwt()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let actual: ListUniversitiesResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(actual.items.len(), 1);
    }
}
