//! Envelope decoding.
//!
//! Every Jotform response wraps its payload as
//! `{"responseCode": …, "message": …, "content": …, "limit-left": …, "duration": …}`.
//! The envelope carries its own success signal, independent of the HTTP
//! status: a `200 OK` can still hold `"responseCode": 404`.
//!
//! Decoding is a pure function of `(status, content type, body)`:
//!
//! 1. JSON media types holding an object are read into an [`ApiEnvelope`];
//!    anything else, or JSON that fails to parse, is kept as raw text.
//! 2. A non-2xx status is an [`ApiError::Http`] whose message is the
//!    envelope message, the raw text, or the status reason phrase, in that
//!    order.
//! 3. A 2xx status with a `responseCode` whose decimal form does not start
//!    with `2` is an [`ApiError::Vendor`].
//! 4. Otherwise the envelope's `content` is the result.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// The vendor's `responseCode`, which arrives as a number on most endpoints
/// and as a numeric string on some.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseCode {
    Number(i64),
    Text(String),
}

impl ResponseCode {
    /// Any code in the 2xx family, compared on its decimal string form.
    pub fn is_success(&self) -> bool {
        self.to_string().trim().starts_with('2')
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Number(n) => write!(f, "{n}"),
            ResponseCode::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResponseCode {
    fn from(code: i64) -> Self {
        ResponseCode::Number(code)
    }
}

/// A decoded response envelope.
///
/// `content` is only meaningful when `response_code` signals success.
/// `limit-left` and `duration` are carried as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ApiEnvelope {
    #[serde(rename = "responseCode", skip_serializing_if = "Option::is_none")]
    pub response_code: Option<ResponseCode>,
    pub message: String,
    pub content: Value,
    #[serde(rename = "limit-left", skip_serializing_if = "Option::is_none")]
    pub limit_left: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
}

impl ApiEnvelope {
    /// `true` unless the envelope carries a non-2xx `responseCode`.
    pub fn is_success(&self) -> bool {
        self.response_code.as_ref().map_or(true, ResponseCode::is_success)
    }
}

/// Any JSON object is an envelope. Fields of an unexpected type are
/// treated as absent (`message` becomes empty) rather than failing.
impl TryFrom<Value> for ApiEnvelope {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err("envelope must be a JSON object".to_string());
        };
        let response_code = match fields.remove("responseCode") {
            Some(Value::Number(n)) => Some(match n.as_i64() {
                Some(code) => ResponseCode::Number(code),
                None => ResponseCode::Text(n.to_string()),
            }),
            Some(Value::String(s)) => Some(ResponseCode::Text(s)),
            _ => None,
        };
        let message = match fields.remove("message") {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        let present = |v: Option<Value>| v.filter(|v| !v.is_null());
        Ok(ApiEnvelope {
            response_code,
            message,
            content: fields.remove("content").unwrap_or(Value::Null),
            limit_left: present(fields.remove("limit-left")),
            duration: present(fields.remove("duration")),
        })
    }
}

/// Parsed form of a response body.
enum Body {
    Envelope(ApiEnvelope),
    Text(String),
}

/// `true` for `application/json` and any `+json` structured suffix.
pub fn is_json_content_type(content_type: &str) -> bool {
    match content_type.trim().parse::<mime::Mime>() {
        Ok(m) => m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON),
        Err(_) => false,
    }
}

/// Decode a raw response into the envelope's `content`.
pub fn decode(status: u16, content_type: &str, body: &[u8]) -> Result<Value, ApiError> {
    decode_envelope(status, content_type, body).map(|envelope| envelope.content)
}

/// Decode a raw response, keeping the whole envelope on success.
pub fn decode_envelope(status: u16, content_type: &str, body: &[u8]) -> Result<ApiEnvelope, ApiError> {
    let parsed = parse_body(content_type, body);

    if !(200..300).contains(&status) {
        return Err(ApiError::Http {
            status,
            message: http_failure_message(status, &parsed),
        });
    }

    match parsed {
        Body::Envelope(envelope) if envelope.is_success() => Ok(envelope),
        Body::Envelope(envelope) => {
            let code = envelope
                .response_code
                .map(|c| c.to_string())
                .unwrap_or_default();
            let message = if envelope.message.trim().is_empty() {
                format!("responseCode {code}")
            } else {
                envelope.message
            };
            Err(ApiError::Vendor { code, message })
        }
        Body::Text(text) => Err(ApiError::Vendor {
            code: "invalid".to_string(),
            message: if text.trim().is_empty() {
                "empty response body".to_string()
            } else {
                format!("response is not a Jotform envelope: {}", snippet(&text))
            },
        }),
    }
}

/// Convenience wrapper over [`decode`] for a captured [`HttpResponse`].
pub fn decode_response(response: &HttpResponse) -> Result<Value, ApiError> {
    decode(response.status, response.content_type(), &response.body)
}

fn parse_body(content_type: &str, body: &[u8]) -> Body {
    if is_json_content_type(content_type) {
        if let Some(envelope) = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| ApiEnvelope::try_from(value).ok())
        {
            return Body::Envelope(envelope);
        }
    }
    Body::Text(String::from_utf8_lossy(body).into_owned())
}

fn http_failure_message(status: u16, parsed: &Body) -> String {
    let candidate = match parsed {
        Body::Envelope(envelope) => envelope.message.trim(),
        Body::Text(text) => text.trim(),
    };
    if !candidate.is_empty() {
        return candidate.to_string();
    }
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

fn snippet(text: &str) -> String {
    const MAX: usize = 200;
    let text = text.trim();
    match text.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
