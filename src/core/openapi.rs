use utoipa::{Modify, OpenApi};

use crate::features::ad_copies::{dtos as ad_copies_dtos, handlers as ad_copies_handlers};
use crate::features::ad_copies::models as ad_copies_models;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Ad copies
        ad_copies_handlers::generate_ad_copies,
        ad_copies_handlers::get_latest_ad_copies,
        ad_copies_handlers::export_ad_copies,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Ad copies
            ad_copies_models::AdPlatformSelection,
            ad_copies_dtos::GenerateAdCopiesDto,
            ad_copies_dtos::AdCopyDto,
            ad_copies_dtos::AdCopyBatchDto,
            ad_copies_dtos::ExportAdCopiesDto,
            ad_copies_dtos::ExportResultDto,
            ApiResponse<ad_copies_dtos::AdCopyBatchDto>,
            ApiResponse<ad_copies_dtos::ExportResultDto>,
        )
    ),
    tags(
        (name = "ad-copies", description = "LLM-generated ad copy for Google, Facebook and TikTok Ads"),
    ),
    info(
        title = "Ad Copy Generator API",
        version = "0.1.0",
        description = "API documentation for the ad copy generator",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
