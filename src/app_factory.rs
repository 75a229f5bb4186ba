//! Application factory module for configuring and building the API server.
//!
//! This module handles the setup of:
//! - Rate limiting (via tower-governor)
//! - CORS configuration
//! - Middleware stack (compression, timeout, tracing)
//! - Route registration
//!
//! Workbook imports can take a while on large catalogs, so the request timeout is generous.
//!
//! # Rate Limiting
//! The application uses tower-governor for rate limiting with default configuration:
//! - bursts of 8 requests per peer IP, replenished every 500ms
//! - Regular cleanup of rate limiting storage every 60 seconds
//!
//! Note: Rate limiting is disabled in test mode.

use crate::open_api_spec::ApiDoc;
use crate::routes::catalog::get_catalog_routes;
use crate::routes::feedback::get_feedback_routes;
use crate::routes::feedback_requests::get_feedback_requests_routes;
use crate::routes::health::healthcheck;
use crate::routes::import::get_import_routes;
use crate::routes::universities::get_universities_routes;
use crate::services::catalog_service::CatalogService;
use crate::services::feedback_service::FeedbackService;
use crate::services::import_service::ImportService;
use crate::services::university_service::UniversityService;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::routing::get;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfig, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::{
    compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer,
    validate_request::ValidateRequestHeaderLayer,
};
use tracing::info_span;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub import_service: ImportService,
    pub catalog_service: CatalogService,
    pub university_service: UniversityService,
    pub feedback_service: FeedbackService,
}

/// Creates and configures the main application router with middleware and routes.
///
/// # Arguments
/// * `app_state` - Shared application state containing service instances
/// * `cors_origins` - List of allowed CORS origins
/// * `test` - Boolean flag to disable rate limiting and modify logging for tests
///
/// # Returns
/// Configured Router instance with all routes, middleware, and rate limiting (if not in test mode)
pub fn create_app(app_state: AppState, cors_origins: Vec<HeaderValue>, test: bool) -> Router {
    let subscriber = tracing_subscriber::fmt().with_target(false).pretty();
    // turn on if you want more verbose logs
    // .with_max_level(tracing::Level::DEBUG)

    // tests run on separate threads, so each one gets its own default subscriber
    if test {
        subscriber.set_default();
    } else {
        subscriber.init();
    }
    let governor_conf = Arc::new(GovernorConfig::default());
    let governor_limiter = governor_conf.limiter().clone();
    std::thread::spawn(move || loop {
        std::thread::sleep(Duration::from_secs(60));
        tracing::info!("rate limiting storage size: {}", governor_limiter.len());
        governor_limiter.retain_recent();
    });
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::PUT])
        .allow_origin(cors_origins)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);
    let max_upload_bytes = app_state.import_service.max_upload_bytes;
    let all_routes: Router<AppState> = build_routes(ApiDoc::openapi(), max_upload_bytes);
    let base_routes = all_routes.layer(cors);
    // every oneshot request comes from the same unknown peer, so no rate limiting in tests
    if test {
        base_routes.with_state(app_state)
    } else {
        base_routes
            .layer(GovernorLayer {
                config: governor_conf,
            })
            .with_state(app_state)
    }
}

/// Builds the application routes with middleware stack.
///
/// Configures:
/// - Request tracing with method and path logging
/// - 300 second timeout
/// - Response compression
/// - JSON accept header validation
/// - Health check endpoint
/// - API routes, with the import route limited to `max_upload_bytes`
fn build_routes(api: utoipa::openapi::OpenApi, max_upload_bytes: usize) -> Router<AppState> {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                // add fields to different logs here
                info_span!(
                    "http_request",
                    method = ?request.method(),
                    request_path = matched_path,
                )
            }),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(CompressionLayer::new())
        .layer(ValidateRequestHeaderLayer::accept("application/json"));
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", api.clone()))
        .merge(Redoc::with_url_and_config(
            "/redoc",
            api,
            || json!({ "hideLogo": true }),
        ))
        .nest("/api/v1", get_import_routes(max_upload_bytes))
        .nest("/api/v1", get_catalog_routes())
        .nest("/api/v1", get_universities_routes())
        .nest("/api/v1", get_feedback_routes())
        .nest("/api/v1", get_feedback_requests_routes())
        .nest("/health", Router::new().route("/", get(healthcheck)))
        .layer(middleware)
}
