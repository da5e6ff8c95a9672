use std::time::Duration;

use reqwest::header;
use tracing::debug;

use crate::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
use crate::error::RpcError;

use super::super::Transport;
use super::connection::{parse_connection, resolve_auth};

/// Knobs for [`HttpTransport`]. Credentials, when present, are sent as HTTP
/// basic auth on every request.
#[derive(Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user: None,
            pass: None,
        }
    }
}

/// JSON-RPC transport over HTTP(S) POST.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
    auth: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(url: &str, settings: HttpSettings) -> Result<Self, RpcError> {
        let url = parse_connection(url)?;
        let auth = resolve_auth(settings.user.as_deref(), settings.pass.as_deref())?;

        // No idle pool: every call opens, and closes, its own connection.
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.timeout)
            .pool_max_idle_per_host(0)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| RpcError::Configuration(format!("build HTTP client: {e}")))?;

        Ok(Self { client, url, auth })
    }

    fn transport_error(&self, message: String) -> RpcError {
        RpcError::Transport {
            url: self.url.clone(),
            message,
        }
    }
}

impl Transport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.url
    }

    fn post(&self, body: &str) -> Result<String, RpcError> {
        let mut builder = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.to_owned());
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder
            .send()
            .map_err(|e| self.transport_error(format!("HTTP error: {e}")))?;
        let status = response.status();
        debug!(url = %self.url, %status, "http response");

        // An error page is not a JSON-RPC reply; treat it like a failed open.
        if !status.is_success() {
            return Err(self.transport_error(format!("HTTP status {status}")));
        }

        response
            .text()
            .map_err(|e| self.transport_error(format!("read response body: {e}")))
    }
}
