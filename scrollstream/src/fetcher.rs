use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use scrollstream_api::{Page, ScrollClient, ScrollId};
use tokio::task::JoinHandle;

use crate::FetchError;

/// Issues page-continuation requests in the background so network latency
/// overlaps with the caller consuming the current page.
pub(crate) struct PageFetcher<C> {
    client: Arc<C>,
    keep_alive: Duration,
}

impl<C> PageFetcher<C>
where
    C: ScrollClient + Send + Sync + 'static,
{
    pub(crate) fn new(client: Arc<C>, keep_alive: Duration) -> Self {
        Self { client, keep_alive }
    }

    /// Submit the continuation request for `scroll_id` and return immediately
    /// with a handle to the in-flight fetch. Called exactly once per page
    /// transition.
    pub(crate) fn submit(&self, scroll_id: ScrollId) -> InFlightPage {
        tracing::debug!(scroll_id = %scroll_id, "submitting background page fetch");
        let client = Arc::clone(&self.client);
        let keep_alive = self.keep_alive;
        let handle = tokio::spawn(async move {
            client
                .scroll(&scroll_id, keep_alive)
                .await
                .map_err(FetchError::from)
        });
        InFlightPage { handle }
    }
}

/// The single outstanding background fetch of a scroll stream.
///
/// Dropping the handle detaches the task rather than aborting it; an
/// orphaned scroll context simply expires server-side after its keep-alive.
pub(crate) struct InFlightPage {
    handle: JoinHandle<Result<Page, FetchError>>,
}

impl Future for InFlightPage {
    type Output = Result<Page, FetchError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(join_err)) => Poll::Ready(Err(FetchError::Task(join_err))),
        }
    }
}
