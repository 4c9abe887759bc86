//! Configuration options for the nav-core entry point

use std::time::Duration;

/// Configuration options for [`NavCore`](crate::NavCore)
#[derive(Debug, Clone)]
pub struct NavOptions {
    /// Timeout for the HTTP calls nav-core makes itself (token revocation).
    /// No timeout by default.
    pub request_timeout: Option<Duration>,

    /// User agent sent with those calls
    pub user_agent: String,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            request_timeout: None,
            user_agent: format!("nav-core/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NavOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = value.to_string();
        self
    }
}
