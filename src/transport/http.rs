use crate::config::SmokeConfig;
use crate::Result;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Proxy;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Correlation header attached to every request. Servers may ignore it.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Status and raw body of a completed exchange.
///
/// The body is kept as text so non-200 replies can be printed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(config: &SmokeConfig) -> Result<Self> {
        let mut builder = Client::builder();

        // Without an explicit timeout the blocking client keeps its own default.
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url.as_str())
                .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST `body` as JSON and wait for the full reply.
    ///
    /// Any status code is a successful exchange here; only failures to send or
    /// to read the body are errors.
    pub fn post_json<T: Serialize>(&self, body: &T, request_id: &str) -> Result<HttpReply> {
        let bytes = serde_json::to_vec(body)?;
        tracing::debug!(
            url = %self.endpoint,
            payload_bytes = bytes.len(),
            request_id,
            "sending request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(REQUEST_ID_HEADER, request_id)
            .body(bytes)
            .send()
            .map_err(TransportError::Http)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(TransportError::Http)?;

        Ok(HttpReply { status, body })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
