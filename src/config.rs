//! Startup configuration: deployment environment, credentials, and the
//! streaming-channel option table.

use std::fmt;

use serde::Serialize;

/// Deployment environment the client targets.
///
/// Exactly two environments exist; the choice is injected at startup rather
/// than read from ambient global state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Base URL of the environment's API server.
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => "https://192.168.2.140:5000",
            Environment::Development => "http://localhost:5000",
        }
    }
}

/// Startup configuration for [`SiteDashClient`](crate::SiteDashClient).
///
/// Credentials are provisioned externally (environment variables or a secret
/// store), never embedded in source.
#[derive(Clone)]
pub struct ClientConfig {
    /// API server base URL, without a trailing path.
    pub base_url: String,
    /// Basic-auth username; must be set together with `password`.
    pub username: Option<String>,
    /// Basic-auth password; must be set together with `username`.
    pub password: Option<String>,
    /// Accept self-signed TLS certificates. The production deployment serves
    /// a self-signed certificate on a private address.
    pub accept_invalid_certs: bool,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl ClientConfig {
    /// Builds a configuration for one of the two deployment environments.
    pub fn new(environment: Environment) -> Self {
        Self {
            base_url: environment.base_url().to_owned(),
            username: None,
            password: None,
            accept_invalid_certs: false,
        }
    }

    /// Overrides the environment's base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attaches basic-auth credentials to every request.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Accepts self-signed TLS certificates. No effect on `wasm32`, where the
    /// browser owns certificate validation.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Reads configuration from environment variables.
    ///
    /// Reads:
    /// - `SITEDASH_BASE_URL` — API server base URL (required)
    /// - `SITEDASH_USERNAME` / `SITEDASH_PASSWORD` — basic-auth credentials,
    ///   optional but only valid as a pair
    ///
    /// **Not available on `wasm32` targets** — environment variables do not
    /// exist in browser runtimes; pass credentials in from JavaScript instead.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        let base_url = std::env::var("SITEDASH_BASE_URL")
            .map_err(|_| "missing SITEDASH_BASE_URL environment variable".to_owned())?;
        if base_url.trim().is_empty() {
            return Err("SITEDASH_BASE_URL is set but empty".to_owned());
        }

        let username = non_empty_var("SITEDASH_USERNAME");
        let password = non_empty_var("SITEDASH_PASSWORD");
        if username.is_some() != password.is_some() {
            return Err(
                "SITEDASH_USERNAME and SITEDASH_PASSWORD must be set together".to_owned(),
            );
        }

        Ok(Self {
            base_url,
            username,
            password,
            accept_invalid_certs: false,
        })
    }

    pub(crate) fn credentials(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            _ => None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Credentials carried alongside the streaming-channel handshake.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SocketAuth {
    pub username: String,
    pub password: String,
}

/// Streaming-channel configuration handed to a Socket.IO transport layer.
///
/// Data only — this crate does not implement the socket protocol. Field
/// names serialize to the camelCase keys the JavaScript client expects.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketOptions {
    /// Transport preference order.
    pub transports: Vec<String>,
    pub secure: bool,
    /// `false` relaxes TLS validation for the self-signed deployment.
    pub reject_unauthorized: bool,
    pub path: String,
    pub reconnection: bool,
    /// Reconnection delay floor in milliseconds.
    pub reconnection_delay: u64,
    /// Reconnection delay ceiling in milliseconds.
    pub reconnection_delay_max: u64,
    pub reconnection_attempts: u32,
    /// Connect timeout in milliseconds.
    pub timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<SocketAuth>,
}

impl Default for SocketOptions {
    fn default() -> Self {
        Self {
            transports: vec!["polling".to_owned(), "websocket".to_owned()],
            secure: true,
            reject_unauthorized: false,
            path: "/socket.io".to_owned(),
            reconnection: true,
            reconnection_delay: 1_000,
            reconnection_delay_max: 5_000,
            reconnection_attempts: 5,
            timeout: 20_000,
            auth: None,
        }
    }
}
