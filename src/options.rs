/// What to do with a terminal Unauthorized or Bad-Gateway failure on the
/// list endpoints.
///
/// One deployment of the dashboard replaced these failures with an empty
/// result so widgets kept rendering during outages. That substitution hides
/// real failures from callers, so it is opt-in here rather than hard-wired.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutagePolicy {
    /// Surface the terminal error unchanged.
    #[default]
    Surface,
    /// Return the endpoint's empty value instead of the error.
    SubstituteEmpty,
}

/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Total attempt budget per logical request, including the first attempt.
    pub max_attempts: usize,
    /// Base backoff delay in milliseconds; attempt n waits `n * base`.
    pub retry_base_delay_ms: u64,
    /// Reissue a request exactly once after a 401 response, outside the
    /// backoff loop. The reissue is never itself retried.
    pub retry_unauthorized_once: bool,
    /// Empty-result substitution policy for list endpoints.
    pub on_outage: OutagePolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 20_000,
            max_attempts: 3,
            retry_base_delay_ms: 1_000,
            retry_unauthorized_once: false,
            on_outage: OutagePolicy::Surface,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClientOptions, OutagePolicy};

    #[test]
    fn defaults_match_dashboard_connection_settings() {
        let opts = ClientOptions::default();
        assert_eq!(opts.timeout_ms, 20_000);
        assert_eq!(opts.max_attempts, 3);
        assert_eq!(opts.retry_base_delay_ms, 1_000);
        assert!(!opts.retry_unauthorized_once);
        assert_eq!(opts.on_outage, OutagePolicy::Surface);
    }
}
