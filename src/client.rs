use std::fmt;
use std::time::Duration;

use reqwest::header;
use serde::de::DeserializeOwned;

// tokio::time::sleep is only available on non-WASM targets.
#[cfg(not(target_arch = "wasm32"))]
use tokio::time::sleep;

use crate::{
    decode::decode_body,
    retry::{CancelToken, RetryPolicy},
    ClientConfig, ClientOptions, OutagePolicy, PerformanceReport, ProjectProgress, Result,
    SiteDashError, WeeklyProject,
};

/// Joins the API base URL with an endpoint path.
///
/// Example: `"http://localhost:5000/"` + `"/api/progress"` →
/// `"http://localhost:5000/api/progress"`
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[derive(Clone)]
/// HTTP client for the SiteDash project-tracking API.
pub struct SiteDashClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
    options: ClientOptions,
    cancel: Option<CancelToken>,
}

impl fmt::Debug for SiteDashClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteDashClient")
            .field("base_url", &self.base_url)
            .field(
                "credentials",
                &self.credentials.as_ref().map(|_| "<redacted>"),
            )
            .field("options", &self.options)
            .finish()
    }
}

impl SiteDashClient {
    /// Creates an unauthenticated client against a base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            credentials: None,
            options: ClientOptions::default(),
            cancel: None,
        }
    }

    /// Creates a client with basic-auth credentials attached to every request.
    pub fn with_basic_auth(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let mut client = Self::new(base_url);
        client.credentials = Some((username.into(), password.into()));
        client
    }

    /// Creates a client from startup configuration.
    ///
    /// Fails if the underlying HTTP client cannot be built, which can happen
    /// when the TLS backend fails to initialize.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sitedash_http::{ClientConfig, Environment, SiteDashClient};
    ///
    /// let config = ClientConfig::new(Environment::Production).with_accept_invalid_certs(true);
    /// let client = SiteDashClient::from_config(&config).expect("client must build");
    /// ```
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = {
            let mut builder = reqwest::Client::builder();
            if config.accept_invalid_certs {
                builder = builder.danger_accept_invalid_certs(true);
            }
            builder.build().map_err(SiteDashError::Transport)?
        };
        // The browser owns certificate validation on wasm32.
        #[cfg(target_arch = "wasm32")]
        let http = reqwest::Client::new();

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            credentials: config.credentials(),
            options: ClientOptions::default(),
            cancel: None,
        })
    }

    /// Creates a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// **Not available on `wasm32` targets** — environment variables do not
    /// exist in browser runtimes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sitedash_http::SiteDashClient;
    ///
    /// let client = SiteDashClient::from_env().expect("missing SITEDASH_* env vars");
    /// ```
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        let config = ClientConfig::from_env()?;
        Self::from_config(&config).map_err(|err| format!("failed to build HTTP client: {err}"))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Attaches a cancellation token observed before each attempt and during
    /// backoff suspension. A request already on the wire is not interrupted.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Fetches project schedule rows from `/api/progress`.
    pub async fn progress(&self) -> Result<Vec<ProjectProgress>> {
        self.get_list("/api/progress").await
    }

    /// Fetches the map-overlay subset of project rows from `/api/mapdata`.
    pub async fn map_data(&self) -> Result<Vec<ProjectProgress>> {
        self.get_list("/api/mapdata").await
    }

    /// Fetches KPI and monthly delivery metrics from `/api/performance`.
    pub async fn performance(&self) -> Result<PerformanceReport> {
        self.get_json("/api/performance").await
    }

    /// Fetches the weekly report from `/api/weekly-report`, including work
    /// and operation items per project.
    pub async fn weekly_report(&self) -> Result<Vec<WeeklyProject>> {
        self.get_list("/api/weekly-report").await
    }

    /// List endpoints honor the empty-result substitution policy; record
    /// endpoints always surface the terminal error.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        match self.get_json(path).await {
            Err(err)
                if self.options.on_outage == OutagePolicy::SubstituteEmpty
                    && err.is_outage() =>
            {
                #[cfg(feature = "tracing")]
                tracing::warn!("substituting empty result for outage on {path}: {err}");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = endpoint_url(&self.base_url, path);
        let policy = RetryPolicy {
            max_attempts: self.options.max_attempts.max(1),
            base_delay: Duration::from_millis(self.options.retry_base_delay_ms),
        };

        // Fresh per logical request; discarded once an outcome is produced.
        let mut failures = 0usize;
        let mut reissued_unauthorized = false;

        loop {
            if let Some(cancel) = &self.cancel {
                if cancel.is_cancelled() {
                    return Err(SiteDashError::Cancelled);
                }
            }

            match self.send(&url).await {
                Ok(value) => return Ok(value),
                // The single-shot reissue is never itself retried.
                Err(err) if reissued_unauthorized => return Err(err),
                Err(err)
                    if self.options.retry_unauthorized_once && err.is_unauthorized() =>
                {
                    // Credential-refresh path, kept outside the backoff loop
                    // so the two strategies cannot chain.
                    #[cfg(feature = "tracing")]
                    tracing::debug!("reissuing {path} once after unauthorized response");
                    reissued_unauthorized = true;
                }
                Err(err @ SiteDashError::Api { .. }) => return Err(err),
                Err(err) => {
                    failures += 1;
                    if failures == policy.max_attempts {
                        return Err(err);
                    }
                    self.wait_before_retry(policy.delay_for(failures)).await?;
                }
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        // Build the request. On WASM, reqwest uses AbortController for
        // timeout; the `.timeout()` method is available on both targets.
        let mut request = self
            .http
            .get(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .timeout(Duration::from_millis(self.options.timeout_ms));

        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await.map_err(SiteDashError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(SiteDashError::Transport)?;

        if !status.is_success() {
            return Err(SiteDashError::Http {
                status: status.as_u16(),
                body,
            });
        }

        decode_body(&body)
    }

    /// Suspends before the next retry attempt.
    ///
    /// On native targets: linear backoff sleep via `tokio::time::sleep`,
    /// racing the cancellation token when one is attached. On WASM targets:
    /// no-op — edge runtimes prefer fast failure over sleeping, and
    /// `tokio::time::sleep` is not available.
    async fn wait_before_retry(&self, delay: Duration) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!("retrying request after {} ms", delay.as_millis());

        #[cfg(not(target_arch = "wasm32"))]
        match &self.cancel {
            Some(cancel) => {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(SiteDashError::Cancelled),
                    _ = sleep(delay) => {}
                }
            }
            None => sleep(delay).await,
        }

        // WASM: no sleep implementation — suppress unused variable warning.
        #[cfg(target_arch = "wasm32")]
        let _ = delay;

        Ok(())
    }
}
