//! Async client facade.
//!
//! # Design
//! `Jotform` pairs the stateless [`JotformClient`] with a [`Transport`].
//! Every endpoint is one `async fn` that builds its request, awaits exactly
//! one transport call under the configured timeout, and decodes the
//! envelope. Builder failures (no API key, empty identifiers) return before
//! the transport is touched, so an unconfigured client never does network
//! I/O. Nothing is retried.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::client::JotformClient;
use crate::config::ClientConfig;
use crate::envelope::ApiEnvelope;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::{FolderParameters, HistoryQuery, ListQuery, Plan, ReportParameters, UserSettings};

#[cfg(feature = "reqwest-transport")]
use crate::transport::ReqwestTransport;

/// Async Jotform API client.
#[derive(Debug, Clone)]
pub struct Jotform<T> {
    client: JotformClient,
    transport: T,
}

#[cfg(feature = "reqwest-transport")]
impl Jotform<ReqwestTransport> {
    /// Client backed by a default `reqwest` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> Jotform<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: JotformClient::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    /// Replace this instance's configuration. Other instances are unaffected.
    pub fn set_config(&mut self, config: ClientConfig) {
        self.client.set_config(config);
    }

    /// The underlying request builder, for callers driving I/O themselves.
    pub fn requests(&self) -> &JotformClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a prepared request and return the envelope's `content`.
    pub async fn execute(&self, request: HttpRequest) -> Result<Value, ApiError> {
        self.execute_envelope(request).await.map(|envelope| envelope.content)
    }

    /// Send a prepared request and return the whole envelope.
    pub async fn execute_envelope(&self, request: HttpRequest) -> Result<ApiEnvelope, ApiError> {
        let config = self.client.config();
        let method = request.method;
        let url = redact_api_key(&request.url);
        if config.debug {
            info!("{method} to URL: {url}");
        } else {
            debug!(%method, %url, "sending request");
        }

        let started = Instant::now();
        let result = match tokio::time::timeout(config.timeout, self.transport.send(request)).await {
            Ok(Ok(response)) => self.client.parse_envelope(response),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ApiError::Timeout(config.timeout)),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(envelope) => debug!(
                %method,
                %url,
                elapsed_ms,
                limit_left = ?envelope.limit_left,
                "request succeeded"
            ),
            Err(e) => warn!(
                %method,
                %url,
                elapsed_ms,
                kind = ?e.kind(),
                status = ?e.status(),
                error = %e,
                "request failed"
            ),
        }
        result
    }

    // -----------------------------------------------------------------------
    // User
    // -----------------------------------------------------------------------

    pub async fn get_user(&self) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_user()?).await
    }

    pub async fn get_usage(&self) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_usage()?).await
    }

    pub async fn get_forms(&self, query: &ListQuery) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_forms(query)?).await
    }

    pub async fn get_submissions(&self, query: &ListQuery) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_submissions(query)?).await
    }

    pub async fn get_subusers(&self) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_subusers()?).await
    }

    pub async fn get_folders(&self) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_folders()?).await
    }

    pub async fn get_reports(&self) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_reports()?).await
    }

    pub async fn get_settings(&self) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_settings()?).await
    }

    pub async fn update_settings(&self, settings: &UserSettings) -> Result<Value, ApiError> {
        self.execute(self.client.build_update_settings(settings)?).await
    }

    pub async fn get_history(&self, query: &HistoryQuery) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_history(query)?).await
    }

    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<Value, ApiError> {
        self.execute(self.client.build_register_user(username, password, email)?)
            .await
    }

    pub async fn create_form(&self, form: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.build_create_form(form)?).await
    }

    pub async fn create_forms(&self, forms: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.build_create_forms(forms)?).await
    }

    // -----------------------------------------------------------------------
    // Form
    // -----------------------------------------------------------------------

    pub async fn get_form(&self, form_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_form(form_id)?).await
    }

    pub async fn delete_form(&self, form_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_delete_form(form_id)?).await
    }

    pub async fn clone_form(&self, form_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_clone_form(form_id)?).await
    }

    pub async fn get_form_questions(&self, form_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_form_questions(form_id)?).await
    }

    pub async fn get_form_question(&self, form_id: &str, question_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_form_question(form_id, question_id)?)
            .await
    }

    pub async fn add_form_question(&self, form_id: &str, question: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.build_add_form_question(form_id, question)?)
            .await
    }

    pub async fn add_form_questions(&self, form_id: &str, questions: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.build_add_form_questions(form_id, questions)?)
            .await
    }

    pub async fn update_form_question(
        &self,
        form_id: &str,
        question_id: &str,
        properties: &Value,
    ) -> Result<Value, ApiError> {
        self.execute(
            self.client
                .build_update_form_question(form_id, question_id, properties)?,
        )
        .await
    }

    pub async fn delete_form_question(&self, form_id: &str, question_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_delete_form_question(form_id, question_id)?)
            .await
    }

    pub async fn get_form_properties(&self, form_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_form_properties(form_id)?).await
    }

    pub async fn get_form_property(&self, form_id: &str, key: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_form_property(form_id, key)?).await
    }

    pub async fn add_form_properties(&self, form_id: &str, properties: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.build_add_form_properties(form_id, properties)?)
            .await
    }

    pub async fn set_form_properties(&self, form_id: &str, properties: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.build_set_form_properties(form_id, properties)?)
            .await
    }

    pub async fn get_form_reports(&self, form_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_form_reports(form_id)?).await
    }

    pub async fn create_form_report(
        &self,
        form_id: &str,
        report: &ReportParameters,
    ) -> Result<Value, ApiError> {
        self.execute(self.client.build_create_form_report(form_id, report)?)
            .await
    }

    pub async fn get_form_files(&self, form_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_form_files(form_id)?).await
    }

    pub async fn get_form_webhooks(&self, form_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_form_webhooks(form_id)?).await
    }

    pub async fn create_form_webhook(&self, form_id: &str, webhook_url: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_create_form_webhook(form_id, webhook_url)?)
            .await
    }

    pub async fn delete_form_webhook(&self, form_id: &str, webhook_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_delete_form_webhook(form_id, webhook_id)?)
            .await
    }

    pub async fn get_form_submissions(&self, form_id: &str, query: &ListQuery) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_form_submissions(form_id, query)?)
            .await
    }

    pub async fn create_form_submission(&self, form_id: &str, submission: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.build_create_form_submission(form_id, submission)?)
            .await
    }

    pub async fn create_form_submissions(
        &self,
        form_id: &str,
        submissions: &Value,
    ) -> Result<Value, ApiError> {
        self.execute(self.client.build_create_form_submissions(form_id, submissions)?)
            .await
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    pub async fn get_submission(&self, submission_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_submission(submission_id)?).await
    }

    pub async fn edit_submission(&self, submission_id: &str, submission: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.build_edit_submission(submission_id, submission)?)
            .await
    }

    pub async fn delete_submission(&self, submission_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_delete_submission(submission_id)?).await
    }

    // -----------------------------------------------------------------------
    // Report
    // -----------------------------------------------------------------------

    pub async fn get_report(&self, report_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_report(report_id)?).await
    }

    pub async fn delete_report(&self, report_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_delete_report(report_id)?).await
    }

    // -----------------------------------------------------------------------
    // Folder
    // -----------------------------------------------------------------------

    pub async fn get_folder(&self, folder_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_folder(folder_id)?).await
    }

    pub async fn create_folder(&self, folder: &FolderParameters) -> Result<Value, ApiError> {
        self.execute(self.client.build_create_folder(folder)?).await
    }

    pub async fn update_folder(&self, folder_id: &str, properties: &Value) -> Result<Value, ApiError> {
        self.execute(self.client.build_update_folder(folder_id, properties)?)
            .await
    }

    pub async fn delete_folder(&self, folder_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_delete_folder(folder_id)?).await
    }

    pub async fn add_forms_to_folder(&self, folder_id: &str, form_ids: &[&str]) -> Result<Value, ApiError> {
        self.execute(self.client.build_add_forms_to_folder(folder_id, form_ids)?)
            .await
    }

    pub async fn add_form_to_folder(&self, folder_id: &str, form_id: &str) -> Result<Value, ApiError> {
        self.execute(self.client.build_add_form_to_folder(folder_id, form_id)?)
            .await
    }

    // -----------------------------------------------------------------------
    // System
    // -----------------------------------------------------------------------

    pub async fn get_plan(&self, plan: Plan) -> Result<Value, ApiError> {
        self.execute(self.client.build_get_plan(plan)?).await
    }
}

/// Replace the `apiKey` query value so URLs can be logged.
pub fn redact_api_key(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k.eq_ignore_ascii_case("apikey") {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return url.to_string();
    }
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::http::{HttpMethod, HttpResponse};

    /// Records requests and replays a canned response.
    #[derive(Default)]
    struct SpyTransport {
        calls: AtomicUsize,
        last: Mutex<Option<HttpRequest>>,
        status: u16,
        body: String,
    }

    impl SpyTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl Transport for SpyTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request);
            Ok(HttpResponse::json(self.status, self.body.clone()))
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new("secret").with_base_url("http://jotform.test")
    }

    #[tokio::test]
    async fn get_form_returns_content() {
        let spy = SpyTransport::replying(200, r#"{"responseCode":200,"message":"success","content":{"id":"42"}}"#);
        let jotform = Jotform::with_transport(config(), spy);
        let form = jotform.get_form("42").await.unwrap();
        assert_eq!(form, json!({"id": "42"}));

        let last = jotform.transport().last.lock().unwrap().clone().unwrap();
        assert_eq!(last.method, HttpMethod::Get);
        assert_eq!(last.url, "http://jotform.test/form/42?apiKey=secret");
    }

    #[tokio::test]
    async fn missing_api_key_sends_nothing() {
        let jotform = Jotform::with_transport(
            ClientConfig::default().with_base_url("http://jotform.test"),
            SpyTransport::replying(200, "{}"),
        );
        let err = jotform.get_user().await.unwrap_err();
        assert!(matches!(err, ApiError::MissingApiKey));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(jotform.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_argument_sends_nothing() {
        let jotform = Jotform::with_transport(config(), SpyTransport::replying(200, "{}"));
        let err = jotform.delete_submission("").await.unwrap_err();
        assert_eq!(err.to_string(), "Submission ID is undefined");
        assert_eq!(jotform.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn vendor_error_is_surfaced() {
        let spy = SpyTransport::replying(200, r#"{"responseCode":401,"message":"Invalid API key"}"#);
        let jotform = Jotform::with_transport(config(), spy);
        let err = jotform.get_user().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Vendor);
        assert_eq!(err.message(), "Invalid API key");
        assert_eq!(jotform.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn set_config_affects_only_this_instance() {
        let body = r#"{"responseCode":200,"message":"success","content":null}"#;
        let mut first = Jotform::with_transport(config(), SpyTransport::replying(200, body));
        let second = Jotform::with_transport(config(), SpyTransport::replying(200, body));
        first.set_config(ClientConfig::new("other").with_base_url("http://elsewhere.test"));

        first.get_user().await.unwrap();
        second.get_user().await.unwrap();

        let first_url = first.transport().last.lock().unwrap().clone().unwrap().url;
        let second_url = second.transport().last.lock().unwrap().clone().unwrap().url;
        assert_eq!(first_url, "http://elsewhere.test/user?apiKey=other");
        assert_eq!(second_url, "http://jotform.test/user?apiKey=secret");
    }

    #[test]
    fn redact_hides_api_key_only() {
        let redacted = redact_api_key("https://api.jotform.com/user/forms?apiKey=secret&limit=5");
        assert_eq!(redacted, "https://api.jotform.com/user/forms?apiKey=***&limit=5");
    }

    #[test]
    fn redact_leaves_unparsable_urls_alone() {
        assert_eq!(redact_api_key("not a url"), "not a url");
        assert_eq!(redact_api_key("http://a.test/user"), "http://a.test/user");
    }

    #[test]
    fn redact_handles_percent_encoded_keys() {
        let redacted = redact_api_key(&format!("http://a.test/user?apiKey={}", "k%26y"));
        assert!(!redacted.contains("k%26y"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn debug_mode_logs_url_with_redacted_key() {
        let spy = SpyTransport::replying(200, r#"{"responseCode":200,"message":"success","content":{}}"#);
        let jotform = Jotform::with_transport(config().with_debug(true), spy);
        jotform.get_user().await.unwrap();

        assert!(logs_contain("GET to URL: http://jotform.test/user?apiKey=***"));
        assert!(logs_contain("request succeeded"));
        assert!(!logs_contain("apiKey=secret"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn quiet_mode_skips_the_info_line() {
        let spy = SpyTransport::replying(200, r#"{"responseCode":200,"message":"success","content":{}}"#);
        let jotform = Jotform::with_transport(config(), spy);
        jotform.get_user().await.unwrap();

        assert!(!logs_contain("to URL:"));
        assert!(logs_contain("sending request"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn failures_are_logged_as_warnings() {
        let spy = SpyTransport::replying(200, r#"{"responseCode":404,"message":"Form not found"}"#);
        let jotform = Jotform::with_transport(config(), spy);
        let _ = jotform.get_form("9").await;

        assert!(logs_contain("WARN"));
        assert!(logs_contain("request failed"));
        assert!(logs_contain("Form not found"));
    }

    #[tokio::test]
    async fn timeout_is_reported() {
        struct Stalled;

        #[async_trait]
        impl Transport for Stalled {
            async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
                std::future::pending().await
            }
        }

        let jotform = Jotform::with_transport(config().with_timeout(Duration::from_millis(1)), Stalled);
        let started = Instant::now();
        let err = jotform.get_usage().await.unwrap_err();
        assert!(started.elapsed() < Duration::from_millis(50));
        assert!(err.is_timeout());
        assert_eq!(err.kind(), ErrorKind::Http);
    }
}
