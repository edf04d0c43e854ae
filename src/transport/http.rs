use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

const DEFAULT_USER_AGENT: &str = concat!("enka-client/", env!("CARGO_PKG_VERSION"));

/// Default total deadline for one API request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper over the HTTP client used by every upstream call.
///
/// Retry policy deliberately lives outside this crate; a request either
/// succeeds with a JSON body or fails with the mapped API error.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, extra_headers: Option<HeaderMap>) -> Result<Self> {
        let mut headers = extra_headers.unwrap_or_default();
        if !headers.contains_key(USER_AGENT) {
            headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Issues a GET and decodes the body as JSON.
    ///
    /// Non-200 statuses map to their domain errors via
    /// [`Error::from_status`]; a deadline hit maps to [`Error::Timeout`].
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        debug!(%url, "requesting");

        let resp = self.client.get(url).send().await.map_err(map_reqwest)?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::from_status(status.as_u16()));
        }

        resp.json().await.map_err(map_reqwest)
    }

    /// Fetches the raw body bytes of `url` (used by the asset updater).
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(%url, "downloading");

        let resp = self.client.get(url).send().await.map_err(map_reqwest)?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::AssetDownload {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.bytes().await.map_err(map_reqwest)?.to_vec())
    }
}

fn map_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Transport(e)
    }
}
