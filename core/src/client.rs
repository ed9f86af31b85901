//! Stateless HTTP request builder and response parser for the Jotform API.
//!
//! # Design
//! `JotformClient` holds only its [`ClientConfig`] and carries no mutable
//! state between calls. Each endpoint has a `build_*` method that produces
//! an `HttpRequest`; every response, whatever the endpoint, goes through the
//! same envelope decoder via [`JotformClient::parse_response`]. The caller
//! (or [`Jotform`](crate::api::Jotform)) executes the HTTP round trip in
//! between, keeping this layer deterministic and free of I/O.
//!
//! Builders validate before assembling anything: a missing API key fails
//! first, then empty required identifiers.
//!
//! Endpoint builders are grouped by resource in the `client/` submodules.

mod folder;
mod form;
mod report;
mod submission;
mod system;
mod user;

use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::encoding::{form_encode, json_encode, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
use crate::envelope::{self, ApiEnvelope};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Synchronous, stateless request builder for the Jotform API.
#[derive(Debug, Clone)]
pub struct JotformClient {
    config: ClientConfig,
}

type Query = Vec<(&'static str, String)>;

impl JotformClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ClientConfig) {
        self.config = config;
    }

    /// Decode any Jotform response into its `content`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        envelope::decode_response(&response)
    }

    /// Decode a response, keeping `limit-left` and `duration`.
    pub fn parse_envelope(&self, response: HttpResponse) -> Result<ApiEnvelope, ApiError> {
        envelope::decode_envelope(response.status, response.content_type(), &response.body)
    }

    /// Fail on a missing API key, then on the first empty argument.
    fn preflight(&self, required: &[(&'static str, &str)]) -> Result<(), ApiError> {
        self.config.api_key().ok_or(ApiError::MissingApiKey)?;
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ApiError::MissingArgument(*name));
            }
        }
        Ok(())
    }

    fn url(&self, segments: &[&str], query: &[(&'static str, String)]) -> Result<String, ApiError> {
        let api_key = self.config.api_key().ok_or(ApiError::MissingApiKey)?;
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            ApiError::InvalidConfig(format!("invalid base URL {:?}: {e}", self.config.base_url))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ApiError::InvalidConfig(format!("base URL {:?} cannot have a path", self.config.base_url))
            })?;
            path.pop_if_empty();
            if let Some(version) = self.config.version_segment() {
                path.push(&version);
            }
            path.extend(segments);
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apiKey", api_key);
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    fn request(
        &self,
        method: HttpMethod,
        segments: &[&str],
        query: &[(&'static str, String)],
        body: Option<(&'static str, String)>,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.url(segments, query)?;
        let mut headers = vec![("accept".to_string(), JSON_CONTENT_TYPE.to_string())];
        let body = body.map(|(content_type, body)| {
            headers.push(("content-type".to_string(), content_type.to_string()));
            body
        });
        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    fn get(&self, segments: &[&str], query: Query) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Get, segments, &query, None)
    }

    fn delete(&self, segments: &[&str]) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Delete, segments, &[], None)
    }

    /// POST with a urlencoded body, or no body at all for `None`.
    fn post_form(&self, segments: &[&str], body: Option<&Value>) -> Result<HttpRequest, ApiError> {
        self.config.api_key().ok_or(ApiError::MissingApiKey)?;
        let body = body
            .map(|b| form_encode(b).map(|encoded| (FORM_CONTENT_TYPE, encoded)))
            .transpose()?;
        self.request(HttpMethod::Post, segments, &[], body)
    }

    fn put_json(&self, segments: &[&str], body: &Value) -> Result<HttpRequest, ApiError> {
        self.config.api_key().ok_or(ApiError::MissingApiKey)?;
        let body = json_encode(body)?;
        self.request(HttpMethod::Put, segments, &[], Some((JSON_CONTENT_TYPE, body)))
    }
}

/// Payloads wrapped as `name[key]=…` must be keyed by question or property.
fn require_object(payload: &Value, what: &str) -> Result<(), ApiError> {
    if payload.is_object() {
        Ok(())
    } else {
        Err(ApiError::Serialization(format!("{what} must be a JSON object")))
    }
}

fn require_array(payload: &Value, what: &str) -> Result<(), ApiError> {
    if payload.is_array() {
        Ok(())
    } else {
        Err(ApiError::Serialization(format!("{what} must be a JSON array")))
    }
}
