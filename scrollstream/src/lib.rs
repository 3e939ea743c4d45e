//! Turns a search service's cursor-based scroll pagination into a lazy
//! [`futures::Stream`] of hits, overlapping each page fetch with the
//! consumption of the page before it.

#![warn(clippy::unwrap_used)]

mod buffer;
pub mod error;
mod fetcher;
pub mod mapper;
pub mod stream;

pub use error::{FetchError, MappingError, ScrollError};
pub use mapper::{FromHit, Mapped, ScrollStreamExt};
pub use scrollstream_api::{
    ApiError, ConfigurationError, Page, Query, ScrollClient, ScrollId, ScrollSettings, SearchHit,
};
pub use stream::ScrollStream;

pub type Result<T> = std::result::Result<T, ScrollError>;

#[cfg(test)]
#[ctor::ctor]
fn _setup() {
    scrollstream_api::test_utils::logger();
}
