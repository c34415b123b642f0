use axum::{extract::Multipart, extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::import::csv::parse_delimited;
use crate::import::importer::{import_rows, ImportKind, ImportOutcome};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub imported: usize,
    pub total: usize,
    pub errors: Vec<String>,
}

impl From<ImportOutcome> for ImportResponse {
    fn from(outcome: ImportOutcome) -> Self {
        Self {
            message: "Import completed".to_string(),
            imported: outcome.imported,
            total: outcome.total,
            errors: outcome.errors,
        }
    }
}

/// POST /api/candidates/bulk-import
pub async fn handle_candidate_import(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    run_import(state, multipart, ImportKind::Candidates).await
}

/// POST /api/companies/bulk-import
pub async fn handle_company_import(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    run_import(state, multipart, ImportKind::Companies).await
}

async fn run_import(
    state: AppState,
    multipart: Multipart,
    kind: ImportKind,
) -> Result<Json<ImportResponse>, AppError> {
    let text = read_file_field(multipart).await?;
    let csv = parse_delimited(&text);

    if csv.rows.is_empty() {
        return Err(AppError::Validation(
            "CSV file is empty or invalid".to_string(),
        ));
    }

    let outcome = import_rows(state.store.as_ref(), kind, &csv).await;
    info!(
        imported = outcome.imported,
        total = outcome.total,
        errors = outcome.errors.len(),
        "Bulk import completed"
    );
    Ok(Json(outcome.into()))
}

/// Extracts the text of the multipart field named `file`.
async fn read_file_field(mut multipart: Multipart) -> Result<String, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            return field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Unreadable file field: {e}")));
        }
    }
    Err(AppError::Validation("No file uploaded".to_string()))
}
