use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::EXPORT_LABEL_PREFIX;

/// The three supported ad destinations, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdPlatform {
    GoogleAds,
    FacebookAds,
    TiktokAds,
}

/// All platforms in the fixed order generation runs in
pub const ALL_PLATFORMS: [AdPlatform; 3] = [
    AdPlatform::GoogleAds,
    AdPlatform::FacebookAds,
    AdPlatform::TiktokAds,
];

impl AdPlatform {
    /// Stable key used in result mappings and API payloads
    pub fn key(&self) -> &'static str {
        match self {
            AdPlatform::GoogleAds => "google_ads",
            AdPlatform::FacebookAds => "facebook_ads",
            AdPlatform::TiktokAds => "tiktok_ads",
        }
    }

    /// Human-readable platform name
    pub fn display_name(&self) -> &'static str {
        match self {
            AdPlatform::GoogleAds => "Google Ads",
            AdPlatform::FacebookAds => "Facebook Ads",
            AdPlatform::TiktokAds => "TikTok Ads",
        }
    }

    /// Prompt template for this platform
    pub fn template_name(&self) -> &'static str {
        match self {
            AdPlatform::GoogleAds => "google_ads.jinja",
            AdPlatform::FacebookAds => "facebook_ads.jinja",
            AdPlatform::TiktokAds => "tiktok_ads.jinja",
        }
    }

    /// Label used in the first column of export rows
    pub fn export_label(&self) -> String {
        format!("{} {}", EXPORT_LABEL_PREFIX, self.display_name())
    }
}

/// Platform selector from the request form: a single platform or all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdPlatformSelection {
    GoogleAds,
    FacebookAds,
    TiktokAds,
    All,
}

impl AdPlatformSelection {
    /// Expand the selection into concrete platforms, in generation order
    pub fn platforms(&self) -> Vec<AdPlatform> {
        match self {
            AdPlatformSelection::GoogleAds => vec![AdPlatform::GoogleAds],
            AdPlatformSelection::FacebookAds => vec![AdPlatform::FacebookAds],
            AdPlatformSelection::TiktokAds => vec![AdPlatform::TiktokAds],
            AdPlatformSelection::All => ALL_PLATFORMS.to_vec(),
        }
    }
}

/// One generated ad copy: platform plus the raw model output.
///
/// The text is free-form (headlines/descriptions/primary text as the model
/// chose to format them) and is never parsed.
#[derive(Debug, Clone)]
pub struct AdCopy {
    pub platform: AdPlatform,
    pub content: String,
}

impl AdCopy {
    /// Flatten into the three-column export row shape
    pub fn to_export_row(&self) -> ExportRow {
        ExportRow {
            label: self.platform.export_label(),
            content: self.content.clone(),
            extra: String::new(),
        }
    }
}

/// A spreadsheet data row: (platform label, content, empty placeholder)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub label: String,
    pub content: String,
    pub extra: String,
}

impl ExportRow {
    pub fn into_cells(self) -> Vec<String> {
        vec![self.label, self.content, self.extra]
    }
}

/// The result of one generation run, held as the service's last batch
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    pub id: Uuid,
    pub copies: Vec<AdCopy>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_expands_in_fixed_order() {
        assert_eq!(
            AdPlatformSelection::All.platforms(),
            vec![
                AdPlatform::GoogleAds,
                AdPlatform::FacebookAds,
                AdPlatform::TiktokAds
            ]
        );
        assert_eq!(
            AdPlatformSelection::GoogleAds.platforms(),
            vec![AdPlatform::GoogleAds]
        );
    }

    #[test]
    fn test_export_labels() {
        assert_eq!(AdPlatform::GoogleAds.export_label(), "OpenAI Google Ads");
        assert_eq!(AdPlatform::FacebookAds.export_label(), "OpenAI Facebook Ads");
        assert_eq!(AdPlatform::TiktokAds.export_label(), "OpenAI TikTok Ads");
    }

    #[test]
    fn test_export_row_shape() {
        let copy = AdCopy {
            platform: AdPlatform::GoogleAds,
            content: "Headline 1".to_string(),
        };
        let cells = copy.to_export_row().into_cells();
        assert_eq!(cells, vec!["OpenAI Google Ads", "Headline 1", ""]);
    }
}
