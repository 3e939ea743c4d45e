use std::time::Duration;

use crate::{Page, Query, ScrollId, ScrollSettings};

/// Failure reported by a search service client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("search service returned status {status}: {reason}")]
    Server { status: u16, reason: String },
    #[error("scroll context `{0}` expired or is unknown")]
    ScrollExpired(ScrollId),
}

impl ApiError {
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }

    /// Whether a caller-supplied retry wrapper may reasonably retry the call.
    /// An expired scroll context cannot be resumed, only re-queried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Server { status, .. } => *status >= 500,
            Self::ScrollExpired(_) => false,
        }
    }
}

/// Client-side contract of a scroll-capable search service.
///
/// `search` issues the initial query and opens the scroll context; `scroll`
/// continues it one page at a time. Pages are strictly sequential:
/// implementations must never reorder or merge them, and each returned
/// [`Page`] carries the token to use for the fetch after it.
#[async_trait::async_trait]
pub trait ScrollClient {
    /// Run the seed search for `query`, opening a scroll context with the
    /// keep-alive and page size taken from `settings`.
    async fn search(&self, query: &Query, settings: &ScrollSettings) -> Result<Page, ApiError>;

    /// Fetch the next page of an open scroll context, refreshing its
    /// keep-alive. Returns an empty page once the context is drained.
    async fn scroll(&self, scroll_id: &ScrollId, keep_alive: Duration) -> Result<Page, ApiError>;
}

#[async_trait::async_trait]
impl<T> ScrollClient for std::sync::Arc<T>
where
    T: ScrollClient + Send + Sync + ?Sized,
{
    async fn search(&self, query: &Query, settings: &ScrollSettings) -> Result<Page, ApiError> {
        (**self).search(query, settings).await
    }

    async fn scroll(&self, scroll_id: &ScrollId, keep_alive: Duration) -> Result<Page, ApiError> {
        (**self).scroll(scroll_id, keep_alive).await
    }
}
