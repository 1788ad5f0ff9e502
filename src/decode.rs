use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{Result, SiteDashError};

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// Decodes a success-status response body into a typed payload.
///
/// The backend reports database failures as `200 OK` with
/// `{"error": "<message>"}` in place of the expected payload; that envelope
/// is surfaced as [`SiteDashError::Api`] and is not worth retrying — the
/// server answered, and an identical request re-runs the same failing query.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Err(SiteDashError::Api {
            message: envelope.error,
        });
    }

    serde_json::from_str(body).map_err(|err| {
        SiteDashError::Decode(format!("invalid response JSON: {err}; body: {body}"))
    })
}
