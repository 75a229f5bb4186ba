//! Route for uploading the catalog workbook.
//!
//! The upload is a multipart form with a single `file` field holding an `.xlsx` or `.xlsm`
//! workbook. Only admins may import. The request stays open until the whole workbook has
//! been written.

use crate::app_factory::AppState;
use crate::import::ImportSummary;
use crate::models::auth::{AuthenticatedUser, Role};
use crate::models::request::ImportWorkbookUpload;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use std::path::Path;

const WORKBOOK_EXTENSIONS: [&str; 2] = ["xlsx", "xlsm"];
const WORKBOOK_CONTENT_TYPES: [&str; 2] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel.sheet.macroEnabled.12",
];

/// Creates the import route under `/import`, accepting bodies up to `max_upload_bytes`.
pub fn get_import_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().nest(
        "/import",
        Router::new()
            .route("/", post(import_workbook))
            .layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}

fn validate_workbook_upload(file_name: &str, content_type: &str) -> Result<(), String> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_lowercase())
        .unwrap_or_default();
    if !WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "File extension '{extension}' is not allowed, expected one of: {}",
            WORKBOOK_EXTENSIONS.join(", ")
        ));
    }
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    if !WORKBOOK_CONTENT_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(essence))
    {
        return Err(format!("Content type '{essence}' is not a workbook"));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/import",
    tag = "Import",
    request_body(content = ImportWorkbookUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Workbook imported", body = ImportSummary),
        (status = 400, description = "Bad request or unreadable workbook"),
        (status = 403, description = "Forbidden"),
        (status = 413, description = "Workbook too large"),
        (status = 500, description = "Import aborted while writing")
    ),
    security(
        ("jwt_cookie_auth" = [])
    )
)]
async fn import_workbook(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Response {
    if authenticated_user.role != Role::Admin {
        return (StatusCode::FORBIDDEN, "Must have admin role").into_response();
    }
    let mut upload = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return (err.status(), err.body_text()).into_response(),
        };
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        if let Err(message) = validate_workbook_upload(&file_name, &content_type) {
            return (StatusCode::BAD_REQUEST, message).into_response();
        }
        match field.bytes().await {
            Ok(bytes) => upload = Some((file_name, bytes)),
            Err(err) => return (err.status(), err.body_text()).into_response(),
        }
    }
    let Some((file_name, bytes)) = upload else {
        return (StatusCode::BAD_REQUEST, "Missing multipart field 'file'").into_response();
    };
    state.import_service.import_workbook(file_name, bytes).await
}
