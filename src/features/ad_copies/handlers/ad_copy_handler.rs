use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::ad_copies::dtos::{
    AdCopyBatchDto, ExportAdCopiesDto, ExportResultDto, GenerateAdCopiesDto,
};
use crate::features::ad_copies::routes::AdCopyState;
use crate::modules::sheets::SheetExporter;
use crate::shared::types::ApiResponse;

/// Generate ad copies for the selected platform(s)
///
/// Renders the per-platform prompt templates with the submitted form fields
/// and runs one completion call per platform, sequentially. The batch is
/// stored as the latest result until overwritten by the next generation.
#[utoipa::path(
    post,
    path = "/api/ad-copies/generate",
    request_body = GenerateAdCopiesDto,
    responses(
        (status = 200, description = "Ad copies generated", body = ApiResponse<AdCopyBatchDto>),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Completion service failure")
    ),
    tag = "ad-copies"
)]
pub async fn generate_ad_copies(
    State(state): State<AdCopyState>,
    AppJson(dto): AppJson<GenerateAdCopiesDto>,
) -> Result<Json<ApiResponse<AdCopyBatchDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let batch = state.service.generate(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(AdCopyBatchDto::from(&batch)),
        Some("Ad copies generated".to_string()),
        None,
    )))
}

/// Get the last generated batch
#[utoipa::path(
    get,
    path = "/api/ad-copies/latest",
    responses(
        (status = 200, description = "Last generated batch", body = ApiResponse<AdCopyBatchDto>),
        (status = 404, description = "Nothing generated yet")
    ),
    tag = "ad-copies"
)]
pub async fn get_latest_ad_copies(
    State(state): State<AdCopyState>,
) -> Result<Json<ApiResponse<AdCopyBatchDto>>> {
    let batch = state
        .service
        .latest()
        .await
        .ok_or_else(|| AppError::NotFound("No ad copies generated yet".to_string()))?;

    Ok(Json(ApiResponse::success(
        Some(AdCopyBatchDto::from(&batch)),
        None,
        None,
    )))
}

/// Export the last generated batch to a new Google spreadsheet
///
/// Creates a fresh spreadsheet on every call (no deduplication), writes the
/// header and one row per result, and shares the document with the
/// configured account.
#[utoipa::path(
    post,
    path = "/api/ad-copies/export",
    request_body = ExportAdCopiesDto,
    responses(
        (status = 200, description = "Batch exported", body = ApiResponse<ExportResultDto>),
        (status = 400, description = "Export not configured or invalid request"),
        (status = 404, description = "Nothing to export"),
        (status = 502, description = "Spreadsheet service failure")
    ),
    tag = "ad-copies"
)]
pub async fn export_ad_copies(
    State(state): State<AdCopyState>,
    AppJson(dto): AppJson<ExportAdCopiesDto>,
) -> Result<Json<ApiResponse<ExportResultDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let sheets = state.sheets.as_ref().ok_or_else(|| {
        AppError::BadRequest("Sheets export is not configured on this server".to_string())
    })?;

    let batch = state
        .service
        .latest()
        .await
        .ok_or_else(|| AppError::NotFound("No ad copies to export".to_string()))?;

    let rows: Vec<_> = batch.copies.iter().map(|c| c.to_export_row()).collect();
    let export = sheets.export(&rows, dto.sheet_name.as_deref()).await?;

    Ok(Json(ApiResponse::success(
        Some(ExportResultDto {
            spreadsheet_id: export.spreadsheet_id,
            spreadsheet_url: export.spreadsheet_url,
            rows_written: export.rows_written,
        }),
        Some("Data successfully exported to Google Sheets".to_string()),
        None,
    )))
}
