// Text-generation gateway: response cache, timeout and rule-based fallback around the backend
// Author: kelexine (https://github.com/kelexine)

use super::prompt::{build_context, build_prompt};
use super::BackendState;
use crate::cache::{prompt_cache_key, CacheManager};
use crate::error::ChatbotError;
use crate::metrics;
use crate::query::QueryAnalysis;
use crate::response::fallback_response;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Wraps the text-completion backend. [`respond`](Self::respond) always
/// produces an answer; backend failures degrade to the rule-based fallback.
pub struct TextGenGateway {
    backend: BackendState,
    cache: Arc<CacheManager>,
    timeout: Duration,
}

impl TextGenGateway {
    pub fn new(backend: BackendState, cache: Arc<CacheManager>, timeout: Duration) -> Self {
        Self {
            backend,
            cache,
            timeout,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_ready()
    }

    /// Answer `query` from the response cache, the backend, or the fallback.
    ///
    /// Only non-empty backend answers are cached. Errors and timeouts bump the
    /// error counter; an unavailable backend or an empty answer does not.
    pub async fn respond(&self, query: &str, analysis: &QueryAnalysis) -> String {
        let cache_key = prompt_cache_key(query);
        if let Some(cached) = self.cache.get_gemini(&cache_key) {
            return cached;
        }

        let backend = match &self.backend {
            BackendState::Ready(backend) => backend,
            BackendState::Unavailable { reason } => {
                warn!("Gemini model not available ({}), using fallback response", reason);
                metrics::record_text_generation("skipped", None);
                return fallback_response(query, analysis);
            }
        };

        let prompt = build_prompt(&build_context(&analysis.data), query);
        debug!("Gemini prompt length: {} characters", prompt.len());

        let start = Instant::now();
        let outcome = match tokio::time::timeout(self.timeout, backend.generate_content(&prompt)).await
        {
            Ok(result) => result,
            Err(_) => Err(ChatbotError::TextGen(format!(
                "request timed out after {:.1}s",
                self.timeout.as_secs_f64()
            ))),
        };
        let elapsed = start.elapsed();
        let secs = elapsed.as_secs_f64();

        match outcome {
            Ok(text) if !text.trim().is_empty() => {
                let text = text.trim().to_string();
                self.cache.set_gemini(&cache_key, text.clone());
                self.cache.record_gemini_call(elapsed);
                metrics::record_text_generation("success", Some(secs));
                info!("Generated Gemini response in {:.2}s", secs);
                text
            }
            Ok(_) => {
                warn!("Empty response from Gemini after {:.2}s", secs);
                metrics::record_text_generation("empty", Some(secs));
                fallback_response(query, analysis)
            }
            Err(e) => {
                error!("Gemini API error after {:.2}s: {}", secs, e);
                self.cache.record_gemini_error();
                metrics::record_text_generation("error", Some(secs));
                fallback_response(query, analysis)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::error::Result;
    use crate::gemini::TextCompletion;
    use crate::models::Summary;
    use crate::query::{Intent, QueryData};
    use crate::response::GENERIC_APOLOGY;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        reply: Option<&'static str>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn replying(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextCompletion for Scripted {
        async fn generate_content(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.reply
                .map(str::to_string)
                .ok_or_else(|| ChatbotError::TextGen("boom".to_string()))
        }
    }

    fn gateway(backend: BackendState) -> (TextGenGateway, Arc<CacheManager>) {
        let cache = Arc::new(CacheManager::new(CacheConfig::default()));
        let gateway = TextGenGateway::new(backend, cache.clone(), Duration::from_millis(200));
        (gateway, cache)
    }

    fn summary_analysis() -> QueryAnalysis {
        QueryAnalysis::new(
            Intent::Conversational,
            QueryData::Summary(Summary {
                total_servers: Some(3),
                ..Default::default()
            }),
        )
    }

    #[tokio::test]
    async fn test_success_is_cached() {
        let backend = Scripted::replying("  Fleet looks healthy.  ");
        let (gateway, cache) = gateway(BackendState::Ready(backend.clone()));
        let analysis = summary_analysis();

        assert_eq!(gateway.respond("explain", &analysis).await, "Fleet looks healthy.");
        assert_eq!(gateway.respond("explain", &analysis).await, "Fleet looks healthy.");

        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!(stats.gemini_calls, 1);
        assert_eq!(stats.gemini_errors, 0);
    }

    #[tokio::test]
    async fn test_failure_falls_back_and_counts_error() {
        let backend = Scripted::failing();
        let (gateway, cache) = gateway(BackendState::Ready(backend.clone()));
        let analysis = summary_analysis();

        let first = gateway.respond("explain", &analysis).await;
        let second = gateway.respond("explain", &analysis).await;

        assert!(first.starts_with("**Server Summary for Chennai Data Center:**"));
        assert_eq!(first, second);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
        let stats = cache.stats();
        assert_eq!(stats.gemini_errors, 2);
        assert_eq!(stats.gemini_calls, 0);
    }

    #[tokio::test]
    async fn test_empty_reply_is_not_an_error() {
        let (gateway, cache) = gateway(BackendState::Ready(Scripted::replying("   ")));
        let analysis = QueryAnalysis::new(Intent::General, QueryData::None);

        assert_eq!(gateway.respond("dev", &analysis).await, GENERIC_APOLOGY);
        let stats = cache.stats();
        assert_eq!(stats.gemini_errors, 0);
        assert_eq!(stats.gemini_calls, 0);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_error() {
        let backend = Arc::new(Scripted {
            reply: Some("too late"),
            delay: Duration::from_secs(2),
            calls: AtomicUsize::new(0),
        });
        let (gateway, cache) = gateway(BackendState::Ready(backend));
        let analysis = QueryAnalysis::new(Intent::General, QueryData::None);

        assert_eq!(gateway.respond("slow", &analysis).await, GENERIC_APOLOGY);
        assert_eq!(cache.stats().gemini_errors, 1);
    }

    #[tokio::test]
    async fn test_unavailable_uses_fallback_silently() {
        let (gateway, cache) = gateway(BackendState::unavailable("no key"));
        assert!(!gateway.is_available());

        let text = gateway.respond("explain", &summary_analysis()).await;
        assert!(text.contains("Total servers: 3"));
        assert_eq!(cache.stats().gemini_errors, 0);
        assert_eq!(cache.cache_report().gemini_cache.total_entries, 0);
    }
}
