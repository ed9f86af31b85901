//! Client core for the Jotform REST API.
//!
//! # Overview
//! Every Jotform endpoint answers with the same JSON envelope
//! (`responseCode`, `message`, `content`, `limit-left`, `duration`). This
//! crate builds requests for each endpoint and decodes every response
//! through one envelope decoder, so success and failure look the same no
//! matter which resource was called.
//!
//! # Design
//! - [`JotformClient`] is a stateless request builder and response parser.
//!   It produces [`HttpRequest`] values and consumes [`HttpResponse`] values
//!   without touching the network.
//! - [`Transport`] is the I/O seam. [`ReqwestTransport`] is the default
//!   implementation.
//! - [`Jotform`] wires the two together with a per-request timeout and
//!   tracing, exposing one `async fn` per endpoint.
//! - Errors fall into three kinds (configuration, HTTP, vendor); see
//!   [`ErrorKind`].
//!
//! ```no_run
//! # async fn demo() -> Result<(), jotform_core::ApiError> {
//! use jotform_core::{ClientConfig, Jotform, ListQuery};
//!
//! let jotform = Jotform::new(ClientConfig::from_env()?);
//! let forms = jotform.get_forms(&ListQuery::new().limit(10)).await?;
//! println!("{forms}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod encoding;
pub mod envelope;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::Jotform;
pub use client::JotformClient;
pub use config::ClientConfig;
pub use envelope::{decode, ApiEnvelope, ResponseCode};
pub use error::{ApiError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
#[cfg(feature = "reqwest-transport")]
pub use transport::ReqwestTransport;
pub use types::{
    Direction, FolderParameters, HistoryQuery, ListQuery, Plan, ReportFields, ReportParameters,
    ReportType, UserSettings,
};
