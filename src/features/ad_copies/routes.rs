use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::ad_copies::handlers;
use crate::features::ad_copies::services::AdCopyService;
use crate::modules::sheets::SheetExporter;

/// Shared state for the ad-copies feature.
///
/// The exporter is optional: when the service-account key file is missing
/// the API still generates copies, only export is unavailable.
#[derive(Clone)]
pub struct AdCopyState {
    pub service: Arc<AdCopyService>,
    pub sheets: Option<Arc<dyn SheetExporter>>,
}

/// Create routes for the ad-copies feature
pub fn routes(service: Arc<AdCopyService>, sheets: Option<Arc<dyn SheetExporter>>) -> Router {
    Router::new()
        .route(
            "/api/ad-copies/generate",
            post(handlers::generate_ad_copies),
        )
        .route("/api/ad-copies/latest", get(handlers::get_latest_ad_copies))
        .route("/api/ad-copies/export", post(handlers::export_ad_copies))
        .with_state(AdCopyState { service, sheets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::features::ad_copies::clients::CompletionClient;
    use crate::features::ad_copies::models::ExportRow;
    use crate::modules::sheets::sheets_client::SheetExport;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubCompletionClient;

    #[async_trait]
    impl CompletionClient for StubCompletionClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok("Headline 1 | Headline 2".to_string())
        }
    }

    /// Creates a fresh spreadsheet id per call, like the real service
    struct RecordingSheetExporter {
        created: AtomicUsize,
    }

    impl RecordingSheetExporter {
        fn new() -> Self {
            Self {
                created: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SheetExporter for RecordingSheetExporter {
        async fn export(&self, rows: &[ExportRow], _title: Option<&str>) -> Result<SheetExport> {
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            let spreadsheet_id = format!("sheet-{}", n);
            Ok(SheetExport {
                spreadsheet_url: format!(
                    "https://docs.google.com/spreadsheets/d/{}",
                    spreadsheet_id
                ),
                spreadsheet_id,
                rows_written: rows.len() + 1,
            })
        }
    }

    fn test_server() -> TestServer {
        let service = Arc::new(AdCopyService::new(Arc::new(StubCompletionClient)));
        TestServer::new(routes(service, None)).unwrap()
    }

    fn test_server_with_exporter() -> TestServer {
        let service = Arc::new(AdCopyService::new(Arc::new(StubCompletionClient)));
        let exporter = Arc::new(RecordingSheetExporter::new());
        TestServer::new(routes(service, Some(exporter))).unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_selected_platform_only() {
        let server = test_server();

        let response = server
            .post("/api/ad-copies/generate")
            .json(&json!({
                "platform": "google_ads",
                "brandName": "Acme",
                "industry": "Retail",
                "url": "acme.com",
                "offers": "20% off",
                "businessType": "E-commerce",
                "audienceDemographics": "adults 25-40",
                "cta": "Shop Now"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let copies = body["data"]["copies"].as_array().unwrap();
        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0]["platform"], "google_ads");
        assert_eq!(copies[0]["label"], "OpenAI Google Ads");
        assert!(!copies[0]["content"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_all_returns_three_platforms() {
        let server = test_server();

        let response = server
            .post("/api/ad-copies/generate")
            .json(&json!({ "platform": "all" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let copies = body["data"]["copies"].as_array().unwrap();
        let keys: Vec<&str> = copies
            .iter()
            .map(|c| c["platform"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["google_ads", "facebook_ads", "tiktok_ads"]);
    }

    #[tokio::test]
    async fn test_generate_rejects_unknown_platform() {
        let server = test_server();

        let response = server
            .post("/api/ad-copies/generate")
            .json(&json!({ "platform": "linkedin_ads" }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_latest_is_404_before_first_generation() {
        let server = test_server();

        let response = server.get("/api/ad-copies/latest").await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_latest_returns_most_recent_batch() {
        let server = test_server();

        server
            .post("/api/ad-copies/generate")
            .json(&json!({ "platform": "all" }))
            .await
            .assert_status_ok();
        server
            .post("/api/ad-copies/generate")
            .json(&json!({ "platform": "tiktok_ads" }))
            .await
            .assert_status_ok();

        let response = server.get("/api/ad-copies/latest").await;
        response.assert_status_ok();
        let body: Value = response.json();
        let copies = body["data"]["copies"].as_array().unwrap();
        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0]["platform"], "tiktok_ads");
    }

    #[tokio::test]
    async fn test_export_without_sheets_client_is_rejected() {
        let server = test_server();

        server
            .post("/api/ad-copies/generate")
            .json(&json!({ "platform": "google_ads" }))
            .await
            .assert_status_ok();

        let response = server.post("/api/ad-copies/export").json(&json!({})).await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_export_unconfigured_reported_before_empty_batch() {
        let server = test_server();
        let response = server.post("/api/ad-copies/export").json(&json!({})).await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_export_writes_header_plus_batch_rows() {
        let server = test_server_with_exporter();

        server
            .post("/api/ad-copies/generate")
            .json(&json!({ "platform": "google_ads", "brandName": "Acme" }))
            .await
            .assert_status_ok();

        let response = server.post("/api/ad-copies/export").json(&json!({})).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["rowsWritten"], 2);
        let url = body["data"]["spreadsheetUrl"].as_str().unwrap();
        let id = body["data"]["spreadsheetId"].as_str().unwrap();
        assert!(url.ends_with(id));
    }

    #[tokio::test]
    async fn test_repeated_export_creates_distinct_spreadsheets() {
        let server = test_server_with_exporter();

        server
            .post("/api/ad-copies/generate")
            .json(&json!({ "platform": "all" }))
            .await
            .assert_status_ok();

        let first: Value = server
            .post("/api/ad-copies/export")
            .json(&json!({}))
            .await
            .json();
        let second: Value = server
            .post("/api/ad-copies/export")
            .json(&json!({}))
            .await
            .json();

        let first_id = first["data"]["spreadsheetId"].as_str().unwrap();
        let second_id = second["data"]["spreadsheetId"].as_str().unwrap();
        assert_ne!(first_id, second_id);
        assert_eq!(first["data"]["rowsWritten"], 4);
        assert_eq!(second["data"]["rowsWritten"], 4);
    }

    #[tokio::test]
    async fn test_export_with_empty_history_is_404() {
        let server = test_server_with_exporter();
        let response = server.post("/api/ad-copies/export").json(&json!({})).await;
        response.assert_status_not_found();
    }
}
