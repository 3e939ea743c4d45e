use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;

use scrollstream_api::{Page, Query, ScrollClient, ScrollSettings, SearchHit};

use crate::buffer::PageBuffer;
use crate::fetcher::{InFlightPage, PageFetcher};
use crate::FetchError;

/// Lazy, finite, forward-only sequence of search hits backed by a
/// server-side scroll context.
///
/// The stream is primed with the seed page and immediately submits a
/// background fetch for the page after it, so network latency overlaps with
/// the caller draining the buffered page. On buffer exhaustion the stream
/// awaits the in-flight fetch, installs the new page, submits the next fetch
/// and continues; a fetched empty page ends the stream for good.
///
/// One logical consumer: pulling advances a single cursor, serialized by
/// `&mut` access in [`Stream::poll_next`]. The stream cannot be restarted;
/// a caller that stops pulling simply lets the server-side scroll context
/// expire after its keep-alive.
pub struct ScrollStream<C> {
    fetcher: PageFetcher<C>,
    buffer: PageBuffer,
    state: State,
}

enum State {
    /// Hits remain in the buffer, or the in-flight fetch will supply more.
    Scrolling { in_flight: InFlightPage },
    /// A fetched page came back empty, or a fetch failed. Terminal.
    Finished,
}

impl<C> ScrollStream<C>
where
    C: ScrollClient + Send + Sync + 'static,
{
    /// Run the seed search for `query` with default settings and return the
    /// stream over every matching hit.
    pub async fn create(client: Arc<C>, query: &Query) -> Result<Self, FetchError> {
        Self::create_with_settings(client, query, ScrollSettings::default()).await
    }

    /// Run the seed search for `query` with explicit pagination settings.
    pub async fn create_with_settings(
        client: Arc<C>,
        query: &Query,
        settings: ScrollSettings,
    ) -> Result<Self, FetchError> {
        tracing::debug!(?settings, index = %query.index, "creating scroll stream");
        let seed = client.search(query, &settings).await?;
        tracing::debug!(scroll_id = %seed.scroll_id, hits = seed.len(), "seed search returned");
        Ok(Self::from_seed(client, seed, &settings))
    }

    /// Prime the stream from a seed page the caller already fetched and
    /// immediately submit the background fetch for the page after it.
    pub fn from_seed(client: Arc<C>, seed: Page, settings: &ScrollSettings) -> Self {
        let fetcher = PageFetcher::new(client, settings.keep_alive());
        let buffer = PageBuffer::new(seed);
        let in_flight = fetcher.submit(buffer.scroll_id().clone());
        Self {
            fetcher,
            buffer,
            state: State::Scrolling { in_flight },
        }
    }
}

impl<C> Stream for ScrollStream<C>
where
    C: ScrollClient + Send + Sync + 'static,
{
    type Item = Result<SearchHit, FetchError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        // At most one page transition per pull: an installed non-empty page
        // always satisfies the next request, so the loop runs at most twice.
        loop {
            let State::Scrolling { in_flight } = &mut this.state else {
                return Poll::Ready(None);
            };
            if let Some(hit) = this.buffer.advance() {
                return Poll::Ready(Some(Ok(hit)));
            }
            let page = match Pin::new(in_flight).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(page)) => page,
                Poll::Ready(Err(err)) => {
                    this.state = State::Finished;
                    return Poll::Ready(Some(Err(err)));
                }
            };
            if page.is_empty() {
                tracing::debug!(scroll_id = %page.scroll_id, "scroll drained, ending stream");
                this.state = State::Finished;
                return Poll::Ready(None);
            }
            tracing::debug!(scroll_id = %page.scroll_id, hits = page.len(), "installing next page");
            this.buffer.install(page);
            let in_flight = this.fetcher.submit(this.buffer.scroll_id().clone());
            this.state = State::Scrolling { in_flight };
        }
    }
}
