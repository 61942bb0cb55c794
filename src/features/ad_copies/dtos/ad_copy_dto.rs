use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::ad_copies::models::{AdCopy, AdPlatformSelection, GeneratedBatch};

/// Request DTO for generating ad copies.
///
/// All seven text fields are free-form; they default to empty strings so a
/// partially filled form still renders a well-formed prompt.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAdCopiesDto {
    /// Platform(s) to generate for
    pub platform: AdPlatformSelection,

    #[serde(default)]
    #[validate(length(max = 255, message = "Brand name must not exceed 255 characters"))]
    pub brand_name: String,

    /// e.g. Retail, Healthcare, Technology
    #[serde(default)]
    #[validate(length(max = 255, message = "Industry must not exceed 255 characters"))]
    pub industry: String,

    #[serde(default)]
    #[validate(length(max = 2048, message = "URL must not exceed 2048 characters"))]
    pub url: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Offers must not exceed 2000 characters"))]
    pub offers: String,

    /// e.g. E-commerce, Service Provider, B2B, B2C
    #[serde(default)]
    #[validate(length(max = 255, message = "Business type must not exceed 255 characters"))]
    pub business_type: String,

    /// Age, gender, interests; multiple values separated by commas
    #[serde(default)]
    #[validate(length(max = 5000, message = "Audience must not exceed 5000 characters"))]
    pub audience_demographics: String,

    /// e.g. Buy Now, Sign Up
    #[serde(default)]
    #[validate(length(max = 255, message = "Call to action must not exceed 255 characters"))]
    pub cta: String,
}

/// One generated ad copy in a response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdCopyDto {
    /// Stable platform key (google_ads, facebook_ads, tiktok_ads)
    pub platform: String,
    /// Label shown in the UI and used in export rows
    pub label: String,
    /// Raw generated text
    pub content: String,
}

impl From<&AdCopy> for AdCopyDto {
    fn from(copy: &AdCopy) -> Self {
        Self {
            platform: copy.platform.key().to_string(),
            label: copy.platform.export_label(),
            content: copy.content.clone(),
        }
    }
}

/// Response DTO for a generation run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdCopyBatchDto {
    pub id: Uuid,
    /// Results in fixed platform order; unselected platforms are absent
    pub copies: Vec<AdCopyDto>,
    pub generated_at: DateTime<Utc>,
}

impl From<&GeneratedBatch> for AdCopyBatchDto {
    fn from(batch: &GeneratedBatch) -> Self {
        Self {
            id: batch.id,
            copies: batch.copies.iter().map(AdCopyDto::from).collect(),
            generated_at: batch.generated_at,
        }
    }
}

/// Request DTO for exporting the last generated batch
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportAdCopiesDto {
    /// Spreadsheet title; defaults to the configured title when omitted
    #[validate(length(min = 1, max = 255, message = "Sheet name must be 1-255 characters"))]
    pub sheet_name: Option<String>,
}

/// Response DTO for a completed export
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportResultDto {
    pub spreadsheet_id: String,
    /// Shareable document URL
    pub spreadsheet_url: String,
    /// Rows written, including the header row
    pub rows_written: usize,
}
