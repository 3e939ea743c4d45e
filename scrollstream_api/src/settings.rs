use std::time::Duration;

/// How long an unused scroll context stays alive server-side, unless overridden.
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(60);

/// How many hits a single page carries, unless overridden.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Invalid settings, rejected before any network call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Immutable pagination settings consumed when a scroll sequence is
/// constructed: the scroll keep-alive and the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSettings {
    keep_alive: Duration,
    page_size: u32,
}

impl ScrollSettings {
    pub fn new(keep_alive: Duration, page_size: u32) -> Result<Self, ConfigurationError> {
        if page_size == 0 {
            return Err(ConfigurationError::ZeroPageSize);
        }
        Ok(Self {
            keep_alive,
            page_size,
        })
    }

    /// Duration to keep one scroll context alive between page fetches.
    pub fn keep_alive(&self) -> Duration {
        self.keep_alive
    }

    /// How many hits should be loaded in one scroll page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            keep_alive: DEFAULT_KEEP_ALIVE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
