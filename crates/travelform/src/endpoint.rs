//! Client for the spreadsheet endpoint.
//!
//! The endpoint is an opaque web script that appends rows to a sheet. It
//! accepts a JSON document sent as `text/plain` (which keeps browsers from
//! issuing a CORS preflight) and answers with JSON, usually after a redirect.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::payload::{EndpointResponse, Payload};

/// Maximum number of redirects followed for one submission.
const MAX_REDIRECTS: usize = 10;

/// Something that accepts submissions.
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Send one payload and return the endpoint's answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if no response arrives,
    /// [`Error::EndpointRejected`] for a non-success status, and
    /// [`Error::ResponseParse`] if the body is not JSON.
    async fn submit(&self, payload: &Payload) -> Result<EndpointResponse>;
}

/// HTTP implementation of [`Endpoint`].
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: Client,
    url: Url,
}

impl HttpEndpoint {
    /// Create a client for the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: Url) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client, url })
    }

    /// The endpoint URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Endpoint for HttpEndpoint {
    async fn submit(&self, payload: &Payload) -> Result<EndpointResponse> {
        let body = serde_json::to_string(payload)?;
        debug!("POST {} ({} bytes, id={})", self.url, body.len(), payload.id);

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::EndpointRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        info!("Endpoint accepted record {}", payload.id);
        serde_json::from_str(&text).map_err(|e| Error::response_parse(e.to_string()))
    }
}
