//! The record-mapper seam: converting raw hits into domain records while
//! letting fetch and mapping failures propagate unmasked.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use scrollstream_api::SearchHit;
use serde_json::Value;

use crate::{FetchError, MappingError, ScrollError};

/// Conversion from one raw hit into a domain record.
///
/// Mappers are pure and fail fast: a missing or mistyped required field is a
/// [`MappingError`], never a silently defaulted record.
pub trait FromHit: Sized {
    fn from_hit(hit: &SearchHit) -> Result<Self, MappingError>;
}

/// Read a required string field from the hit source.
pub fn require_str<'a>(hit: &'a SearchHit, field: &'static str) -> Result<&'a str, MappingError> {
    match hit.source.get(field) {
        None | Some(Value::Null) => Err(MappingError::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(MappingError::InvalidType(field)),
    }
}

/// Extension methods for streams of raw hits.
pub trait ScrollStreamExt: Stream<Item = Result<SearchHit, FetchError>> + Sized {
    /// Map each pulled hit into a domain record via [`FromHit`].
    fn mapped<T: FromHit>(self) -> Mapped<Self, T> {
        Mapped {
            inner: self,
            _marker: PhantomData,
        }
    }
}

impl<S> ScrollStreamExt for S where S: Stream<Item = Result<SearchHit, FetchError>> + Sized {}

/// Stream adapter applying a [`FromHit`] mapper to each pulled hit.
pub struct Mapped<S, T> {
    inner: S,
    _marker: PhantomData<fn() -> T>,
}

impl<S, T> Stream for Mapped<S, T>
where
    S: Stream<Item = Result<SearchHit, FetchError>> + Unpin,
    T: FromHit,
{
    type Item = Result<T, ScrollError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Ready(Some(Ok(hit))) => {
                Poll::Ready(Some(T::from_hit(&hit).map_err(ScrollError::from)))
            }
            Poll::Ready(Some(Err(err))) => Poll::Ready(Some(Err(ScrollError::Fetch(err)))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use scrollstream_api::ApiError;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Speaker(String);

    impl FromHit for Speaker {
        fn from_hit(hit: &SearchHit) -> Result<Self, MappingError> {
            Ok(Speaker(require_str(hit, "speaker")?.to_owned()))
        }
    }

    fn raw(items: Vec<Result<SearchHit, FetchError>>) -> impl Stream<Item = Result<SearchHit, FetchError>> + Unpin {
        futures::stream::iter(items)
    }

    #[tokio::test]
    async fn maps_hits_and_propagates_mapping_failures() {
        let stream = raw(vec![
            Ok(SearchHit::new("0", json!({ "speaker": "coach" }))),
            Ok(SearchHit::new("1", json!({ "line_number": "12" }))),
            Ok(SearchHit::new("2", json!({ "speaker": 4 }))),
        ]);

        let results: Vec<_> = stream.mapped::<Speaker>().collect().await;
        assert_eq!(
            results[0].as_ref().expect("mapped record"),
            &Speaker("coach".to_owned())
        );
        assert!(matches!(
            results[1],
            Err(ScrollError::Mapping(MappingError::MissingField("speaker")))
        ));
        assert!(matches!(
            results[2],
            Err(ScrollError::Mapping(MappingError::InvalidType("speaker")))
        ));
    }

    #[tokio::test]
    async fn fetch_errors_pass_through_the_mapping_stage_unmasked() {
        let stream = raw(vec![Err(FetchError::Api(ApiError::Server {
            status: 500,
            reason: "boom".to_owned(),
        }))]);

        let results: Vec<Result<Speaker, _>> = stream.mapped::<Speaker>().collect().await;
        assert!(matches!(
            results[0],
            Err(ScrollError::Fetch(FetchError::Api(ApiError::Server { .. })))
        ));
    }

    #[tokio::test]
    async fn null_required_fields_fail_like_missing_ones() {
        let stream = raw(vec![Ok(SearchHit::new("0", json!({ "speaker": null })))]);
        let results: Vec<Result<Speaker, _>> = stream.mapped::<Speaker>().collect().await;
        assert!(matches!(
            results[0],
            Err(ScrollError::Mapping(MappingError::MissingField("speaker")))
        ));
    }
}
