use serde::de::DeserializeOwned;

use crate::FetchError;

/// Turns a finished `crux_http` exchange into a typed body.
///
/// Transport errors and non-2xx statuses map to [`FetchError::Transport`] and
/// [`FetchError::Status`]; an undecodable body maps to [`FetchError::Parse`].
pub fn decode_json<T: DeserializeOwned>(
    result: crux_http::Result<crux_http::Response<Vec<u8>>>,
) -> Result<T, FetchError> {
    let mut response = result.map_err(|e| FetchError::Transport {
        message: e.to_string(),
    })?;

    let status = u16::from(response.status());
    let body = response.take_body().unwrap_or_default();
    decode_body(status, &body)
}

pub fn decode_body<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status { status });
    }

    serde_json::from_slice(body).map_err(|e| FetchError::Parse {
        reason: format!("failed to parse JSON: {e}"),
    })
}
