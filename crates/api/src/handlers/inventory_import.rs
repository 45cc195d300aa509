//! Handlers for the inventory CSV import.
//!
//! Provides the multipart upload endpoint, the static CSV template
//! download, and the import history listing.

use axum::extract::{Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use storefront_db::models::import_summary::ImportSummary;
use storefront_db::repositories::ImportSummaryRepo;

use crate::error::{AppError, AppResult};
use crate::importer::{run_inventory_import, ImportReport};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field name carrying the uploaded CSV.
const FILE_FIELD: &str = "file";

/// Header row served by the template endpoint. Matches the preferred
/// column candidates the parser looks for.
const TEMPLATE_CSV: &str = "SKU,Total in stock\n";

/// Query parameters for the import history listing.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/admin/inventory/import
///
/// Accept a multipart CSV upload, run the import, and respond with the
/// persisted summary plus per-row outcomes.
pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ImportReport>>)> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.csv").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| {
        AppError::BadRequest(format!("No '{FILE_FIELD}' field in multipart upload"))
    })?;

    if !filename.to_ascii_lowercase().ends_with(".csv") {
        return Err(AppError::BadRequest(format!(
            "Expected a .csv file, got '{filename}'"
        )));
    }

    if data.len() > state.config.max_import_bytes {
        return Err(AppError::BadRequest(format!(
            "Upload exceeds the maximum import size of {} bytes",
            state.config.max_import_bytes
        )));
    }

    let report =
        run_inventory_import(&state.pool, &filename, &data, state.config.max_import_rows).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// GET /api/v1/admin/inventory/import/template
///
/// Serve the static CSV template admins fill in for an import.
pub async fn download_template() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"inventory-import-template.csv\"",
            ),
        ],
        TEMPLATE_CSV,
    )
}

/// GET /api/v1/admin/inventory/imports?limit=&offset=
///
/// List import summaries newest-first for the admin history view.
pub async fn list_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<DataResponse<Vec<ImportSummary>>>> {
    let summaries =
        ImportSummaryRepo::list_recent(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: summaries }))
}
