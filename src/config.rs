//! Client configuration: credentials and default transport settings.

use std::fmt;
use std::time::Duration;

use reqwest::Client;

use crate::error::{HarborError, Result};

const USER_AGENT: &str = concat!("harborapi/", env!("CARGO_PKG_VERSION"));

/// Basic-auth credentials.
///
/// An empty pair (both fields empty) means "send no `Authorization` header".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True when neither a username nor a password is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for the HTTP transport built when the caller does not supply one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Bound on establishing a connection, TLS included.
    pub connect_timeout: Duration,
    /// TCP keep-alive interval for pooled connections.
    pub keep_alive: Duration,
    /// Requested bound on the TLS handshake.
    ///
    /// Informational only: reqwest has no separate handshake timeout, so
    /// this is never enforced on its own. It only raises the connect bound
    /// when larger (see [`TransportConfig::effective_connect_timeout`]).
    pub tls_handshake_timeout: Duration,
    /// Bound on waiting for response data once the request is sent.
    pub response_header_timeout: Duration,
    /// Idle connections kept per host.
    pub max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            keep_alive: Duration::from_secs(120),
            tls_handshake_timeout: Duration::from_secs(10),
            response_header_timeout: Duration::from_secs(30),
            max_idle_per_host: 20,
        }
    }
}

impl TransportConfig {
    /// Connect bound handed to the transport; covers the TLS handshake.
    pub fn effective_connect_timeout(&self) -> Duration {
        self.connect_timeout.max(self.tls_handshake_timeout)
    }

    /// Build a `reqwest` client from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`HarborError::Transport`] if the TLS backend cannot be
    /// initialised.
    pub fn build_http_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .connect_timeout(self.effective_connect_timeout())
            .tcp_keepalive(self.keep_alive)
            .read_timeout(self.response_header_timeout)
            .pool_max_idle_per_host(self.max_idle_per_host)
            .build()
            .map_err(HarborError::Transport)
    }
}
