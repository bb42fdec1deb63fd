//! Shared request plumbing for the HTTP adapters.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::upstream::domain::{UpstreamError, UpstreamResult};

const USER_AGENT: &str = concat!("beymax/", env!("CARGO_PKG_VERSION"));

/// Builds a client whose requests give up after `timeout`.
///
/// # Errors
///
/// Returns [`UpstreamError::Transport`] when the TLS backend cannot be
/// initialized.
pub fn build_client(source_name: &'static str, timeout: Duration) -> UpstreamResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|err| UpstreamError::Transport {
            source_name,
            reason: err.to_string(),
        })
}

/// Sends `request` and returns the status and body, whatever the status.
///
/// # Errors
///
/// Maps timeouts and transport failures onto [`UpstreamError`].
pub async fn fetch_response(
    source_name: &'static str,
    request: RequestBuilder,
) -> UpstreamResult<(StatusCode, Vec<u8>)> {
    let response = request
        .send()
        .await
        .map_err(|err| transport_error(source_name, &err))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| transport_error(source_name, &err))?;
    debug!(source = source_name, %status, bytes = body.len(), "upstream responded");
    Ok((status, body.to_vec()))
}

/// Sends `request` and returns the body of a successful response.
///
/// # Errors
///
/// Maps timeouts, transport failures and non-success statuses onto
/// [`UpstreamError`].
pub async fn fetch_bytes(
    source_name: &'static str,
    request: RequestBuilder,
) -> UpstreamResult<Vec<u8>> {
    let (status, body) = fetch_response(source_name, request).await?;
    if !status.is_success() {
        warn!(source = source_name, %status, "upstream returned an error status");
        return Err(UpstreamError::Unavailable {
            source_name,
            status: status.as_u16(),
        });
    }
    Ok(body)
}

/// Sends `request` and decodes the JSON body of a successful response.
///
/// # Errors
///
/// As [`fetch_bytes`], plus [`UpstreamError::Malformed`] when the body does
/// not decode into `T`.
pub async fn fetch_json<T>(source_name: &'static str, request: RequestBuilder) -> UpstreamResult<T>
where
    T: DeserializeOwned,
{
    let body = fetch_bytes(source_name, request).await?;
    decode_json(source_name, &body)
}

/// Decodes a JSON payload.
///
/// # Errors
///
/// Returns [`UpstreamError::Malformed`] when `body` does not decode into
/// `T`.
pub fn decode_json<T>(source_name: &'static str, body: &[u8]) -> UpstreamResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body)
        .map_err(|err| UpstreamError::malformed(source_name, err.to_string()))
}

fn transport_error(source_name: &'static str, err: &reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        warn!(source = source_name, "upstream request timed out");
        UpstreamError::Timeout { source_name }
    } else {
        warn!(source = source_name, error = %err, "upstream request failed");
        UpstreamError::Transport {
            source_name,
            reason: err.to_string(),
        }
    }
}
