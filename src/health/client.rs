use reqwest::header::ACCEPT;

use super::models::ProbeResult;
use crate::configuration::Settings;
use crate::error::CollectorError;

pub const USER_AGENT: &str = "synthetic-check/1";

/// Issues a single GET against the backend and never fails: every outcome
/// is folded into a `ProbeResult`.
/// Production uses `HttpBackendClient`; tests can inject a stub.
pub trait BackendClient {
    fn fetch(&self, path: &str) -> ProbeResult;
}

/// Blocking `reqwest` client bound to one backend base URL.
pub struct HttpBackendClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpBackendClient {
    pub fn new(settings: &Settings) -> Result<Self, CollectorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.backend_url.clone(),
        })
    }
}

impl BackendClient for HttpBackendClient {
    #[tracing::instrument(name = "Fetch backend probe", skip(self))]
    fn fetch(&self, path: &str) -> ProbeResult {
        let url = format!("{}{}", self.base_url, path);

        let response = match self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Probe request failed");
                return ProbeResult::failed(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let bytes = match response.bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(url = %url, status, error = %e, "Failed to read probe body");
                return ProbeResult::failed(e.to_string());
            }
        };

        match String::from_utf8(bytes.to_vec()) {
            Ok(body) => {
                tracing::debug!(url = %url, status, "Probe answered");
                ProbeResult::response(status, body)
            }
            Err(e) => {
                tracing::warn!(url = %url, status, "Probe body is not valid UTF-8");
                ProbeResult::failed(format!("Response body is not valid UTF-8: {e}"))
            }
        }
    }
}
