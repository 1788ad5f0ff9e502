/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum SiteDashError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// In-band error envelope reported by the backend inside a `200 OK` body.
    #[error("api error: {message}")]
    Api { message: String },
    /// Response decoding or payload-shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
    /// The request was aborted through a [`CancelToken`](crate::CancelToken).
    #[error("request cancelled")]
    Cancelled,
}

impl SiteDashError {
    /// Returns `true` for an HTTP 401 response.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Statuses the empty-result substitution policy applies to.
    pub(crate) fn is_outage(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 502, .. })
    }
}
