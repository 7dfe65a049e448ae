//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::Client;

use super::{RawResponse, Transport};
use crate::Result;
use crate::types::RequestOptions;

/// [`Transport`] that treats the identity as a URL and calls it over HTTP(S).
///
/// No client-level timeout is configured: deadlines are per attempt and
/// enforced by the fetcher.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Use a preconfigured client (proxies, TLS roots, default headers).
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, identity: &str, request: &RequestOptions) -> Result<RawResponse> {
        let mut builder = self
            .http
            .request(request.method.clone(), identity)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
