//! Configuration for the outbound HTTP client.
//!
//! Defaults impose no timeout: how long an upstream may take is a deployment
//! decision, not a property of the relay.

use std::time::Duration;

/// Idle connections kept per upstream host unless configured.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Redirects followed unless configured. Matches reqwest's own default.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Configuration for [`ReqwestDispatcher`](crate::ReqwestDispatcher).
///
/// # Example
///
/// ```
/// use binrelay_http::DispatcherConfig;
/// use std::time::Duration;
///
/// let config = DispatcherConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-relay/1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// User agent string for outbound requests
    pub(crate) user_agent: String,
    /// Whole-request timeout, unset by default
    pub(crate) timeout: Option<Duration>,
    /// Idle connections kept per upstream host
    pub(crate) pool_max_idle_per_host: usize,
    /// Redirects followed before giving up
    pub(crate) max_redirects: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("binrelay/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl DispatcherConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Bound the total time of one outbound request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defaults to 10.
    #[must_use]
    pub const fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Set the redirect limit. Zero disables redirect following.
    #[must_use]
    pub const fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub const fn pool_max_idle_per_host(&self) -> usize {
        self.pool_max_idle_per_host
    }

    pub const fn max_redirects(&self) -> usize {
        self.max_redirects
    }
}
