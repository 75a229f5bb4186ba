//! Service driving a catalog workbook import from upload to database.

use crate::import::error::ImportError;
use crate::import::writer::write_batch;
use crate::import::{parse_workbook, ImportConfig};
use crate::repos::catalog_import_repo::CatalogImportRepo;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use http::StatusCode;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct ImportService {
    pub catalog_import_repo: Arc<dyn CatalogImportRepo>,
    pub import_config: Arc<ImportConfig>,
    pub max_upload_bytes: usize,
}

impl ImportService {
    /// Parses the workbook on a blocking worker, then writes it. The caller waits for both.
    pub async fn import_workbook(self, file_name: String, bytes: Bytes) -> Response {
        info!(
            "Importing catalog workbook {file_name} ({} bytes) with {} associations...",
            bytes.len(),
            self.import_config.association_policy
        );
        let config = self.import_config.clone();
        let parsed = tokio::task::spawn_blocking(move || parse_workbook(&bytes, &config)).await;
        let batch = match parsed {
            Err(join_error) => {
                error!(%join_error, "Workbook parsing task failed");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    .into_response();
            }
            Ok(Err(err)) => {
                warn!(%err, "Rejected workbook {file_name}");
                return err.into_response();
            }
            Ok(Ok(batch)) => batch,
        };

        let written = write_batch(
            self.catalog_import_repo.as_ref(),
            &batch,
            self.import_config.association_policy,
        )
        .await;
        match written {
            Ok(summary) => {
                info!("Finished importing {file_name}");
                Json(summary).into_response()
            }
            Err(err) => {
                if let ImportError::Write(db_err) = &err {
                    error!(%db_err, "Import of {file_name} aborted");
                }
                err.into_response()
            }
        }
    }
}
