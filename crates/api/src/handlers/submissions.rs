//! Handlers for submitting requests and reading back the store.
//!
//! Store calls are blocking file I/O and run on the blocking thread pool.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};

use intake_core::error::CoreError;
use intake_core::submission::validate_submission;
use intake_core::types::{format_timestamp, Timestamp};
use intake_store::{Row, StoreError, SubmissionStore};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const SAVE_FAILED: &str = "Failed to save data to Excel file";
const STATS_FAILED: &str = "Error getting stats";
const DOWNLOAD_FAILED: &str = "Error downloading file";
const READ_FAILED: &str = "Error reading data";

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub submission_time: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_submissions: usize,
    pub file_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excel_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ViewDataResponse {
    pub total_submissions: usize,
    pub submissions: Vec<Row>,
    pub excel_file: String,
    pub last_updated: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run a store operation on the blocking pool, tagging failures with the
/// message the client should see.
async fn run_store<T, F>(state: &AppState, context: &'static str, op: F) -> AppResult<T>
where
    F: FnOnce(&SubmissionStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| AppError::InternalError(format!("Store task failed: {e}")))?
        .map_err(AppError::storage(context))
}

/// Turn a missing backing file into `None`.
fn absent_as_none<T>(result: Result<T, StoreError>) -> Result<Option<T>, StoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Decode the request body into a non-empty JSON object.
fn parse_payload(body: &[u8]) -> AppResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(CoreError::NoData.into());
    }
    let not_an_object = || AppError::BadRequest("Request body must be a JSON object".into());

    match serde_json::from_slice::<Value>(body).map_err(|_| not_an_object())? {
        Value::Object(map) if !map.is_empty() => Ok(map),
        Value::Object(_) | Value::Null => Err(CoreError::NoData.into()),
        _ => Err(not_an_object()),
    }
}

fn format_mtime(ts: Option<Timestamp>) -> Option<String> {
    ts.as_ref().map(format_timestamp)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /submit
///
/// Validate the payload and append it to the store.
pub async fn submit(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<SubmitResponse>> {
    let raw = parse_payload(&body)?;
    let submission =
        validate_submission(&raw, chrono::Utc::now()).map_err(CoreError::Validation)?;

    let submission_time = submission.submission_time.clone();
    let row = run_store(&state, SAVE_FAILED, move |store| store.append(&submission)).await?;

    tracing::info!(row, %submission_time, "Accepted submission");

    Ok(Json(SubmitResponse {
        message: "AI Solution request submitted successfully!",
        status: "success",
        submission_time,
    }))
}

/// GET /stats
///
/// Row count and last modification time of the backing file.
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let snapshot = run_store(&state, STATS_FAILED, |store| {
        let Some(count) = absent_as_none(store.count())? else {
            return Ok(None);
        };
        Ok(Some((count, store.last_modified()?)))
    })
    .await?;

    let response = match snapshot {
        None => StatsResponse {
            total_submissions: 0,
            file_exists: false,
            excel_file: None,
            last_updated: None,
            message: Some("No submissions yet"),
        },
        Some((count, modified)) => StatsResponse {
            total_submissions: count,
            file_exists: true,
            excel_file: Some(state.config.excel_file_display()),
            last_updated: format_mtime(modified),
            message: None,
        },
    };
    Ok(Json(response))
}

/// GET /view-data
///
/// Every stored submission keyed by column name. A missing file is an empty
/// result, not an error status.
pub async fn view_data(State(state): State<AppState>) -> AppResult<Response> {
    let snapshot = run_store(&state, READ_FAILED, |store| {
        let Some(rows) = absent_as_none(store.scan_all())? else {
            return Ok(None);
        };
        Ok(Some((rows, store.last_modified()?)))
    })
    .await?;

    let Some((rows, modified)) = snapshot else {
        return Ok(Json(json!({ "error": "No data found", "submissions": [] })).into_response());
    };

    Ok(Json(ViewDataResponse {
        total_submissions: rows.len(),
        submissions: rows,
        excel_file: state.config.excel_file_display(),
        last_updated: format_mtime(modified),
    })
    .into_response())
}

/// GET /download-excel
///
/// The raw workbook as an attachment with a timestamped file name.
pub async fn download_excel(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let bytes = run_store(&state, DOWNLOAD_FAILED, |store| store.read_raw()).await?;

    let filename = format!(
        "ai_solutions_responses_{}.xlsx",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
