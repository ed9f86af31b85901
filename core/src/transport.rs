//! The I/O seam between the request builders and the network.
//!
//! A [`Transport`] executes one [`HttpRequest`] and hands back the raw
//! [`HttpResponse`]. Non-2xx statuses are data, not errors: classifying them
//! is the envelope decoder's job. Only failures where no response exists at
//! all (connection refused, unreadable body, transport-level timeout) are
//! returned as `Err`.
//!
//! Any HTTP library can sit behind the trait. `ReqwestTransport` is the
//! bundled implementation, enabled by the default `reqwest-transport`
//! feature.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request).await
    }
}

#[cfg(feature = "reqwest-transport")]
pub use reqwest_impl::ReqwestTransport;

#[cfg(feature = "reqwest-transport")]
mod reqwest_impl {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Async transport built on a pooled `reqwest::Client`.
    ///
    /// The client-level timeout of [`Jotform`](crate::api::Jotform) applies
    /// on top of any timeout configured here.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
        timeout: Option<Duration>,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Transport whose underlying client aborts requests after `timeout`.
        pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| ApiError::InvalidConfig(format!("cannot build HTTP client: {e}")))?;
            Ok(Self {
                client,
                timeout: Some(timeout),
            })
        }

        /// Wrap an already configured `reqwest::Client`.
        pub fn with_client(client: reqwest::Client) -> Self {
            Self {
                client,
                timeout: None,
            }
        }

        fn map_error(&self, e: reqwest::Error) -> ApiError {
            if e.is_timeout() {
                ApiError::Timeout(self.timeout.unwrap_or_default())
            } else {
                ApiError::Transport(e.to_string())
            }
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| self.map_error(e))?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response.bytes().await.map_err(|e| self.map_error(e))?.to_vec();

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
