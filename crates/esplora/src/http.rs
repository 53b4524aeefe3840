use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::{HttpError, HttpResult};

/// Timeout applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_client(timeout: Duration) -> HttpResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| HttpError::Client(e.to_string()))
}

pub(crate) fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_owned()
}

/// Reads the body as text first, so a bad status keeps the server's message
/// and a bad body surfaces as a protocol error.
pub(crate) fn read_json<T: DeserializeOwned>(resp: Response) -> HttpResult<T> {
    let status = resp.status();
    let body = resp.text().map_err(HttpError::from_reqwest)?;
    if !status.is_success() {
        return Err(HttpError::Status {
            status: status.as_u16(),
            body,
        });
    }
    parse_json(&body)
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str) -> HttpResult<T> {
    serde_json::from_str(body).map_err(|e| HttpError::Protocol(e.to_string()))
}
