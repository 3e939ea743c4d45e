//! Test doubles for the [`ScrollClient`] contract: a mockall mock for
//! expectation-style tests and a scripted in-memory search service for
//! end-to-end paging scenarios.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use parking_lot::Mutex;
use serde_json::json;

use crate::{ApiError, Page, Query, ScrollClient, ScrollId, ScrollSettings, SearchHit};

/// Install a fmt subscriber for test output. Safe to call from every test.
pub fn logger() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::builder().parse_lossy("scrollstream=debug,scrollstream_api=debug");
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

mock! {
    pub ScrollClient {}

    #[async_trait]
    impl ScrollClient for ScrollClient {
        async fn search(&self, query: &Query, settings: &ScrollSettings) -> Result<Page, ApiError>;
        async fn scroll(&self, scroll_id: &ScrollId, keep_alive: Duration) -> Result<Page, ApiError>;
    }
}

struct ScrollContext {
    offset: usize,
    page_size: usize,
}

/// In-memory stand-in for a scroll-capable search service.
///
/// Serves a fixed document set page by page, tracks how many search and
/// scroll calls were made, and can be scripted to fail the nth scroll call.
pub struct FakeSearchService {
    docs: Vec<SearchHit>,
    contexts: Mutex<HashMap<String, ScrollContext>>,
    fail_on_scroll: Option<usize>,
    search_calls: AtomicUsize,
    scroll_calls: AtomicUsize,
}

impl FakeSearchService {
    pub fn new(docs: Vec<SearchHit>) -> Self {
        Self {
            docs,
            contexts: Mutex::new(HashMap::new()),
            fail_on_scroll: None,
            search_calls: AtomicUsize::new(0),
            scroll_calls: AtomicUsize::new(0),
        }
    }

    /// Seed `n` play-line documents shaped like the reference domain:
    /// a speaker, a line number and a play name per document.
    pub fn with_play_lines(n: usize) -> Self {
        let docs = (0..n)
            .map(|i| {
                SearchHit::new(
                    i.to_string(),
                    json!({
                        "line_number": i.to_string(),
                        "speaker": "coach",
                        "play_name": (i % 7).to_string(),
                    }),
                )
            })
            .collect();
        Self::new(docs)
    }

    /// Make the `nth` scroll call (1-based) fail with a server error.
    pub fn fail_on_scroll(mut self, nth: usize) -> Self {
        self.fail_on_scroll = Some(nth);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn scroll_calls(&self) -> usize {
        self.scroll_calls.load(Ordering::SeqCst)
    }

    fn serve(&self, offset: usize, page_size: usize) -> Vec<SearchHit> {
        let end = (offset + page_size).min(self.docs.len());
        self.docs
            .get(offset..end)
            .map(<[SearchHit]>::to_vec)
            .unwrap_or_default()
    }
}

#[async_trait]
impl ScrollClient for FakeSearchService {
    async fn search(&self, _query: &Query, settings: &ScrollSettings) -> Result<Page, ApiError> {
        let call = self.search_calls.fetch_add(1, Ordering::SeqCst);
        let scroll_id = format!("scroll-{call}");
        let page_size = settings.page_size() as usize;
        let hits = self.serve(0, page_size);
        tracing::debug!(scroll_id = %scroll_id, hits = hits.len(), "fake seed search");
        self.contexts.lock().insert(
            scroll_id.clone(),
            ScrollContext {
                offset: hits.len(),
                page_size,
            },
        );
        Ok(Page::new(scroll_id, hits))
    }

    async fn scroll(&self, scroll_id: &ScrollId, _keep_alive: Duration) -> Result<Page, ApiError> {
        let call = self.scroll_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_scroll == Some(call) {
            return Err(ApiError::Server {
                status: 500,
                reason: "injected failure".to_owned(),
            });
        }
        let mut contexts = self.contexts.lock();
        let context = contexts
            .get_mut(scroll_id.as_str())
            .ok_or_else(|| ApiError::ScrollExpired(scroll_id.clone()))?;
        let hits = self.serve(context.offset, context.page_size);
        context.offset += hits.len();
        tracing::debug!(scroll_id = %scroll_id, hits = hits.len(), "fake scroll continuation");
        Ok(Page::new(scroll_id.clone(), hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_service_pages_through_all_documents() {
        let service = FakeSearchService::with_play_lines(25);
        let settings = ScrollSettings::new(Duration::from_secs(60), 10).expect("valid settings");

        let mut page = service
            .search(&Query::match_all("shakespeare"), &settings)
            .await
            .expect("seed search");
        let mut seen = page.len();
        assert_eq!(seen, 10);

        loop {
            page = service
                .scroll(&page.scroll_id, settings.keep_alive())
                .await
                .expect("scroll");
            if page.is_empty() {
                break;
            }
            seen += page.len();
        }

        assert_eq!(seen, 25);
        assert_eq!(service.search_calls(), 1);
        // one full page, a short page, then the empty terminator
        assert_eq!(service.scroll_calls(), 3);
    }

    #[tokio::test]
    async fn unknown_scroll_context_is_reported_expired() {
        let service = FakeSearchService::with_play_lines(5);
        let err = service
            .scroll(&ScrollId::from("scroll-99"), Duration::from_secs(60))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ScrollExpired(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn injected_failure_hits_the_requested_call() {
        let service = FakeSearchService::with_play_lines(30).fail_on_scroll(2);
        let settings = ScrollSettings::new(Duration::from_secs(60), 10).expect("valid settings");

        let page = service
            .search(&Query::match_all("shakespeare"), &settings)
            .await
            .expect("seed search");
        assert!(service
            .scroll(&page.scroll_id, settings.keep_alive())
            .await
            .is_ok());
        let err = service
            .scroll(&page.scroll_id, settings.keep_alive())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert!(err.is_retryable());
    }
}
