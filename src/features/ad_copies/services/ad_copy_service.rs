use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::ad_copies::clients::CompletionClient;
use crate::features::ad_copies::dtos::GenerateAdCopiesDto;
use crate::features::ad_copies::models::{AdCopy, GeneratedBatch};
use crate::shared::prompts;

/// Orchestrates ad-copy generation: renders the prompt for each selected
/// platform and invokes the completion client once per platform, strictly
/// sequentially in fixed order (Google, Facebook, TikTok).
///
/// The most recent batch is kept in a single slot, overwritten on every
/// generation and read by the export endpoint.
pub struct AdCopyService {
    completion_client: Arc<dyn CompletionClient>,
    last_batch: RwLock<Option<GeneratedBatch>>,
}

impl AdCopyService {
    pub fn new(completion_client: Arc<dyn CompletionClient>) -> Self {
        Self {
            completion_client,
            last_batch: RwLock::new(None),
        }
    }

    /// Run one generation for the selected platform(s).
    ///
    /// A failed completion call aborts the run; the previously stored batch
    /// is left untouched in that case.
    pub async fn generate(&self, dto: GenerateAdCopiesDto) -> Result<GeneratedBatch> {
        let platforms = dto.platform.platforms();

        let ctx: HashMap<&str, &str> = HashMap::from([
            ("brand_name", dto.brand_name.as_str()),
            ("industry", dto.industry.as_str()),
            ("url", dto.url.as_str()),
            ("offers", dto.offers.as_str()),
            ("business_type", dto.business_type.as_str()),
            ("audience_demographics", dto.audience_demographics.as_str()),
            ("cta", dto.cta.as_str()),
        ]);

        let mut copies = Vec::with_capacity(platforms.len());
        for platform in platforms {
            let prompt = prompts::render_template_simple(platform.template_name(), &ctx)
                .map_err(|e| AppError::Internal(format!("Prompt rendering failed: {}", e)))?;

            tracing::info!(
                "Requesting completion for {}: prompt_len={}",
                platform.key(),
                prompt.len()
            );

            let content = self.completion_client.complete(&prompt).await?;

            tracing::info!(
                "Completion received for {}: response_len={}",
                platform.key(),
                content.len()
            );

            copies.push(AdCopy { platform, content });
        }

        let batch = GeneratedBatch {
            id: Uuid::new_v4(),
            copies,
            generated_at: Utc::now(),
        };

        let mut last = self.last_batch.write().await;
        *last = Some(batch.clone());

        tracing::info!(
            "Generation complete: batch_id={}, platforms={}",
            batch.id,
            batch.copies.len()
        );

        Ok(batch)
    }

    /// The last generated batch, if any
    pub async fn latest(&self) -> Option<GeneratedBatch> {
        self.last_batch.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ad_copies::models::{AdPlatform, AdPlatformSelection};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoCompletionClient {
        calls: AtomicUsize,
    }

    impl EchoCompletionClient {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for EchoCompletionClient {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("generated for: {}", &prompt[..20.min(prompt.len())]))
        }
    }

    /// Succeeds for the first `ok_calls` completions, then fails
    struct FlakyCompletionClient {
        ok_calls: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionClient for FlakyCompletionClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.ok_calls {
                Ok("ok".to_string())
            } else {
                Err(AppError::ExternalServiceError("quota exceeded".to_string()))
            }
        }
    }

    fn request(platform: AdPlatformSelection) -> GenerateAdCopiesDto {
        GenerateAdCopiesDto {
            platform,
            brand_name: "Acme".to_string(),
            industry: "Retail".to_string(),
            url: "acme.com".to_string(),
            offers: "20% off".to_string(),
            business_type: "E-commerce".to_string(),
            audience_demographics: "adults 25-40".to_string(),
            cta: "Shop Now".to_string(),
        }
    }

    #[tokio::test]
    async fn test_single_platform_yields_one_result() {
        let client = Arc::new(EchoCompletionClient::new());
        let service = AdCopyService::new(client.clone());

        let batch = service
            .generate(request(AdPlatformSelection::GoogleAds))
            .await
            .unwrap();

        assert_eq!(batch.copies.len(), 1);
        assert_eq!(batch.copies[0].platform.key(), "google_ads");
        assert!(!batch.copies[0].content.is_empty());
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_platforms_yield_three_results_in_order() {
        let client = Arc::new(EchoCompletionClient::new());
        let service = AdCopyService::new(client.clone());

        let batch = service
            .generate(request(AdPlatformSelection::All))
            .await
            .unwrap();

        let platforms: Vec<AdPlatform> = batch.copies.iter().map(|c| c.platform).collect();
        assert_eq!(
            platforms,
            vec![
                AdPlatform::GoogleAds,
                AdPlatform::FacebookAds,
                AdPlatform::TiktokAds
            ]
        );
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_generation_overwrites_last_batch() {
        let service = AdCopyService::new(Arc::new(EchoCompletionClient::new()));
        assert!(service.latest().await.is_none());

        let first = service
            .generate(request(AdPlatformSelection::All))
            .await
            .unwrap();
        let second = service
            .generate(request(AdPlatformSelection::TiktokAds))
            .await
            .unwrap();

        let latest = service.latest().await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(latest.id, second.id);
        assert_eq!(latest.copies.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_run_preserves_previous_batch() {
        // First run (one call) succeeds; second run fails on its second call
        let service = AdCopyService::new(Arc::new(FlakyCompletionClient {
            ok_calls: 2,
            calls: AtomicUsize::new(0),
        }));

        let kept = service
            .generate(request(AdPlatformSelection::GoogleAds))
            .await
            .unwrap();

        let err = service
            .generate(request(AdPlatformSelection::All))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));

        assert_eq!(service.latest().await.unwrap().id, kept.id);
    }

    #[tokio::test]
    async fn test_empty_fields_still_generate() {
        let service = AdCopyService::new(Arc::new(EchoCompletionClient::new()));
        let dto = GenerateAdCopiesDto {
            platform: AdPlatformSelection::GoogleAds,
            brand_name: String::new(),
            industry: String::new(),
            url: String::new(),
            offers: String::new(),
            business_type: String::new(),
            audience_demographics: String::new(),
            cta: String::new(),
        };

        let batch = service.generate(dto).await.unwrap();
        assert_eq!(batch.copies.len(), 1);
    }
}
