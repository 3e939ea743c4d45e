use scrollstream_api::ApiError;

/// A background page fetch failed. Surfaced to the pulling caller at the
/// next pull that needed the failed page; never swallowed as end-of-stream.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The spawned fetch task was cancelled or panicked before producing a page.
    #[error("background fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A record mapper could not build a domain record from a raw hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("required field `{0}` is missing from the hit source")]
    MissingField(&'static str),
    #[error("field `{0}` has an unexpected type")]
    InvalidType(&'static str),
}

/// Umbrella error for mapped scroll streams. Fetch and mapping failures
/// propagate unmasked through the mapping stage.
#[derive(Debug, thiserror::Error)]
pub enum ScrollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}
