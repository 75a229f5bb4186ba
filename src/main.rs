mod app_factory;
mod auth;
mod config;
mod import;
mod models;
mod open_api_spec;
mod repos;
mod routes;
mod services;
#[cfg(test)]
mod test_tools;

use crate::app_factory::{create_app, AppState};
use crate::config::build_app_config;
use crate::repos::catalog_import_repo::DBCatalogImportRepo;
use crate::repos::catalog_repo::DBCatalogRepo;
use crate::repos::emails_repo::PostmarkEmailsRepo;
use crate::repos::feedback_repo::DBFeedbackRepo;
use crate::repos::university_repo::DBUniversityRepo;
use crate::services::catalog_service::CatalogService;
use crate::services::feedback_service::FeedbackService;
use crate::services::import_service::ImportService;
use crate::services::university_service::UniversityService;
use reqwest::Client;
use sea_orm::Database;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    let app_config = build_app_config();
    let db_session = Database::connect(app_config.postgres_url)
        .await
        .expect("Could not connect to db");
    let catalog_import_repo = DBCatalogImportRepo {
        db_session: db_session.clone(),
    };
    let catalog_repo = DBCatalogRepo {
        db_session: db_session.clone(),
    };
    let university_repo = Arc::new(DBUniversityRepo {
        db_session: db_session.clone(),
    });
    let feedback_repo = DBFeedbackRepo { db_session };
    let emails_repo = PostmarkEmailsRepo {
        client: Client::new(),
        api_key: app_config.postmark_api_key,
        postmark_api_base: app_config.postmark_api_base,
        sender_email: app_config.sender_email,
    };
    let import_service = ImportService {
        catalog_import_repo: Arc::new(catalog_import_repo),
        import_config: Arc::new(app_config.import),
        max_upload_bytes: app_config.max_import_upload_bytes,
    };
    let catalog_service = CatalogService {
        catalog_repo: Arc::new(catalog_repo),
    };
    let university_service = UniversityService {
        university_repo: university_repo.clone(),
    };
    let feedback_service = FeedbackService {
        feedback_repo: Arc::new(feedback_repo),
        university_repo,
        emails_repo: Arc::new(emails_repo),
        public_base_url: app_config.public_base_url,
    };
    let app_state = AppState {
        import_service,
        catalog_service,
        university_service,
        feedback_service,
    };
    let app = create_app(app_state, app_config.cors_urls, false);

    let addr: SocketAddr = app_config
        .listener_address
        .parse()
        .expect("Should be in address format like 0.0.0.0:5000");

    info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
