//! Configuration for the HTTP network adapter.

use std::time::Duration;

/// Configuration for `HttpNetwork`.
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Base URL that relative request URLs are resolved against.
    pub base_url: Option<String>,
    /// Request timeout applied by the underlying client.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("precache/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NetConfig {
    /// Set the base URL for resolving relative request URLs.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the client timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
