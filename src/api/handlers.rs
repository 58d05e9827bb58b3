//! Endpoint handlers

use std::sync::Arc;

use axum::extract::{Path as UrlPath, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::server::AppState;
use crate::error::ExportError;
use crate::export::generate_export;

/// MIME type downloads are served with.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Error body shape: `{"detail": "..."}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ExportError {
    fn into_response(self) -> Response {
        let status = if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        if status.is_server_error() {
            error!("request failed: {self}");
        }
        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Health response
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { ok: true })
}

/// Export query parameters
#[derive(Deserialize)]
pub struct ExportParams {
    pub campana_id: String,
}

/// Export response
#[derive(Serialize)]
pub struct ExportResponse {
    pub download_url: String,
}

/// GET /export?campana_id=<id> - generate a workbook, return its download URL
pub async fn export(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> Result<Json<ExportResponse>, ExportError> {
    let path = generate_export(
        state.store.as_ref(),
        &state.template_path,
        &state.output_dir,
        &params.campana_id,
    )
    .await?;

    let fname = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ExportError::Workbook("saved workbook has no file name".to_string()))?;

    Ok(Json(ExportResponse {
        download_url: format!("{}/download/{}", state.base_url, fname),
    }))
}

/// GET /download/{fname} - serve a generated workbook as an attachment
pub async fn download(
    State(state): State<Arc<AppState>>,
    UrlPath(fname): UrlPath<String>,
) -> Result<Response, ExportError> {
    // only flat names generated by the writer are servable
    if fname.contains(['/', '\\']) || fname.contains("..") {
        return Err(ExportError::FileNotFound(fname));
    }

    let path = state.output_dir.join(&fname);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ExportError::FileNotFound(fname.clone()))?;

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{fname}\""),
        ),
        (header::CACHE_CONTROL, "no-store".to_string()),
    ];
    Ok((headers, bytes).into_response())
}
