use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::core::config::SheetsConfig;
use crate::core::error::{AppError, Result};
use crate::features::ad_copies::models::ExportRow;
use crate::modules::sheets::service_account::{ServiceAccountKey, ServiceAccountTokenProvider};
use crate::shared::constants::EXPORT_HEADER;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3/files";

/// Range the header and data rows are appended to
const APPEND_RANGE: &str = "Sheet1!A1";

/// Outcome of one export
#[derive(Debug, Clone)]
pub struct SheetExport {
    pub spreadsheet_id: String,
    pub spreadsheet_url: String,
    pub rows_written: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSpreadsheetResponse {
    spreadsheet_id: String,
}

/// A spreadsheet export destination: rows in, shareable document out.
///
/// The handler only depends on this trait, so tests can substitute a local
/// implementation the same way `CompletionClient` is substituted for
/// generation.
#[async_trait]
pub trait SheetExporter: Send + Sync {
    /// Create a spreadsheet named `title` (falling back to the configured
    /// default), write the header plus one row per export row, share it and
    /// return the shareable URL.
    async fn export(&self, rows: &[ExportRow], title: Option<&str>) -> Result<SheetExport>;
}

/// Client for exporting ad-copy rows to a new Google spreadsheet.
///
/// Every export creates a fresh document: header row, one row per result,
/// then a writer grant for the configured recipient. There is no
/// deduplication across exports.
pub struct SheetsClient {
    client: reqwest::Client,
    token_provider: ServiceAccountTokenProvider,
    config: SheetsConfig,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let key = ServiceAccountKey::from_file(&config.credentials_path)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        tracing::info!(
            "Sheets client initialized: service_account={}, share_email={}",
            key.client_email,
            config.share_email
        );

        Ok(Self {
            client: reqwest::Client::new(),
            token_provider: ServiceAccountTokenProvider::new(key),
            config,
        })
    }
}

#[async_trait]
impl SheetExporter for SheetsClient {
    async fn export(&self, rows: &[ExportRow], title: Option<&str>) -> Result<SheetExport> {
        let title = title.unwrap_or(&self.config.default_sheet_title);
        let token = self
            .token_provider
            .get_access_token()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;

        let spreadsheet_id = self.create_spreadsheet(title, &token.access_token).await?;

        let values = build_export_values(rows);
        let rows_written = values.len();
        self.append_values(&spreadsheet_id, values, &token.access_token)
            .await?;

        self.share(&spreadsheet_id, &token.access_token).await?;

        let spreadsheet_url = format!("https://docs.google.com/spreadsheets/d/{}", spreadsheet_id);
        tracing::info!(
            "Exported {} rows to spreadsheet {} ({})",
            rows_written,
            spreadsheet_id,
            spreadsheet_url
        );

        Ok(SheetExport {
            spreadsheet_id,
            spreadsheet_url,
            rows_written,
        })
    }
}

impl SheetsClient {
    async fn create_spreadsheet(&self, title: &str, access_token: &str) -> Result<String> {
        let body = json!({ "properties": { "title": title } });

        let response = self
            .client
            .post(SHEETS_API_BASE)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Spreadsheet creation request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Spreadsheet creation failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Spreadsheet creation returned HTTP {}: {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Spreadsheet creation returned HTTP {}",
                status
            )));
        }

        let created: CreateSpreadsheetResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse creation response: {}", e))
        })?;

        tracing::debug!("Created spreadsheet {}", created.spreadsheet_id);
        Ok(created.spreadsheet_id)
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        values: Vec<Vec<String>>,
        access_token: &str,
    ) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=RAW",
            SHEETS_API_BASE,
            spreadsheet_id,
            urlencoding::encode(APPEND_RANGE)
        );

        let body = json!({ "values": values });

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Row append request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Row append failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Row append returned HTTP {}: {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Row append returned HTTP {}",
                status
            )));
        }

        Ok(())
    }

    /// Grant the configured account access to the document via the Drive API
    async fn share(&self, spreadsheet_id: &str, access_token: &str) -> Result<()> {
        let url = format!("{}/{}/permissions", DRIVE_API_BASE, spreadsheet_id);

        let body = json!({
            "type": "user",
            "role": self.config.share_role,
            "emailAddress": self.config.share_email,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Permission grant request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Permission grant failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Permission grant returned HTTP {}: {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Permission grant returned HTTP {}",
                status
            )));
        }

        tracing::debug!(
            "Shared spreadsheet {} with {} as {}",
            spreadsheet_id,
            self.config.share_email,
            self.config.share_role
        );
        Ok(())
    }
}

/// Header row plus one three-column row per export row
fn build_export_values(rows: &[ExportRow]) -> Vec<Vec<String>> {
    let mut values = Vec::with_capacity(rows.len() + 1);
    values.push(EXPORT_HEADER.iter().map(|s| s.to_string()).collect());
    for row in rows {
        values.push(row.clone().into_cells());
    }
    values
}
