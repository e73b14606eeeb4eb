//! reqwest-backed implementation of the `Network` port.

use async_trait::async_trait;
use precache_core::http::{Method, Request, Response};
use precache_core::ports::Network;
use precache_core::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

use crate::config::NetConfig;

/// HTTP client behind the `Network` port.
///
/// Transport failures map to `Error::NetworkUnavailable`; response status is
/// passed through verbatim (a 404 is a response, not an error).
pub struct HttpNetwork {
    client: reqwest::Client,
    config: NetConfig,
}

impl HttpNetwork {
    pub fn new() -> Result<Self> {
        Self::with_config(NetConfig::default())
    }

    pub fn with_config(config: NetConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Resolve a possibly-relative URL against the configured base.
    fn resolve(&self, raw: &str) -> Result<Url> {
        match Url::parse(raw) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.config.base_url.as_deref().ok_or_else(|| {
                    Error::NetworkUnavailable {
                        url: raw.to_string(),
                        reason: "relative URL and no base URL configured".to_string(),
                    }
                })?;
                let base = Url::parse(base).map_err(|e| Error::NetworkUnavailable {
                    url: raw.to_string(),
                    reason: format!("invalid base URL {}: {}", base, e),
                })?;
                base.join(raw).map_err(|e| Error::NetworkUnavailable {
                    url: raw.to_string(),
                    reason: format!("cannot resolve against base: {}", e),
                })
            }
            Err(e) => Err(Error::NetworkUnavailable {
                url: raw.to_string(),
                reason: format!("invalid URL: {}", e),
            }),
        }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response> {
        let url = self.resolve(&request.url)?;
        debug!(method = %request.method, url = %url, "Fetching from network");

        let mut builder = self.client.request(Self::method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|e| Error::NetworkUnavailable {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_string(), value.to_string());
            }
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::NetworkUnavailable {
                url: request.url.clone(),
                reason: format!("body read failed: {}", e),
            })?
            .to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
