//! Service configuration.

/// Default number of jokes returned by a listing when the caller gives no limit.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound applied to any requested page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Default number of times a mutation is retried after a concurrent modification.
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Tunables for [`JokeService`](super::JokeService).
///
/// Domain limits (question length, maximum likes, ...) are constants of the model and
/// cannot be changed here.
///
/// # Examples
///
/// ```rust
/// use jokebox::service::JokeServiceConfig;
///
/// let config = JokeServiceConfig::default()
///     .with_default_page_size(10)
///     .with_max_conflict_retries(5);
///
/// assert_eq!(config.page_size(None), 10);
/// assert_eq!(config.page_size(Some(1_000)), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeServiceConfig {
    /// Page size used when a listing does not ask for one.
    pub default_page_size: usize,

    /// Largest page a listing may return.
    pub max_page_size: usize,

    /// How many times a mutation reloads and retries after losing a write race.
    /// Zero disables retrying.
    pub max_conflict_retries: u32,
}

impl Default for JokeServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}

impl JokeServiceConfig {
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    pub fn with_max_conflict_retries(mut self, retries: u32) -> Self {
        self.max_conflict_retries = retries;
        self
    }

    /// Resolve the page size for a listing request.
    ///
    /// A missing limit falls back to `default_page_size`; any limit is capped at
    /// `max_page_size`. A limit of zero is honoured and yields an empty page that still
    /// reports the total.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }
}
