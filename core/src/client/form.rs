//! `/form/{id}` endpoints: questions, properties, reports, files, webhooks
//! and submissions of a single form.

use serde_json::{json, Value};

use super::{require_array, require_object, JotformClient};
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::types::{ListQuery, ReportParameters};

const FORM_ID: &str = "Form ID";
const QUESTION_ID: &str = "Question ID";

impl JotformClient {
    pub fn build_get_form(&self, form_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.get(&["form", form_id], Vec::new())
    }

    pub fn build_delete_form(&self, form_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.delete(&["form", form_id])
    }

    pub fn build_clone_form(&self, form_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.post_form(&["form", form_id, "clone"], None)
    }

    // -----------------------------------------------------------------------
    // Questions
    // -----------------------------------------------------------------------

    pub fn build_get_form_questions(&self, form_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.get(&["form", form_id, "questions"], Vec::new())
    }

    pub fn build_get_form_question(
        &self,
        form_id: &str,
        question_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id), (QUESTION_ID, question_id)])?;
        self.get(&["form", form_id, "question", question_id], Vec::new())
    }

    /// Add one question, e.g. `{"type": "control_email", "text": "Email"}`.
    pub fn build_add_form_question(
        &self,
        form_id: &str,
        question: &Value,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        require_object(question, "question")?;
        self.post_form(&["form", form_id, "questions"], Some(&json!({ "question": question })))
    }

    /// Add several questions at once as JSON.
    pub fn build_add_form_questions(
        &self,
        form_id: &str,
        questions: &Value,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.put_json(&["form", form_id, "questions"], &json!({ "questions": questions }))
    }

    pub fn build_update_form_question(
        &self,
        form_id: &str,
        question_id: &str,
        properties: &Value,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id), (QUESTION_ID, question_id)])?;
        require_object(properties, "question properties")?;
        self.post_form(
            &["form", form_id, "question", question_id],
            Some(&json!({ "question": properties })),
        )
    }

    pub fn build_delete_form_question(
        &self,
        form_id: &str,
        question_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id), (QUESTION_ID, question_id)])?;
        self.delete(&["form", form_id, "question", question_id])
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    pub fn build_get_form_properties(&self, form_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.get(&["form", form_id, "properties"], Vec::new())
    }

    pub fn build_get_form_property(&self, form_id: &str, key: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id), ("Property key", key)])?;
        self.get(&["form", form_id, "properties", key], Vec::new())
    }

    /// Edit or add properties such as `formWidth` or `styles`, form-encoded.
    pub fn build_add_form_properties(
        &self,
        form_id: &str,
        properties: &Value,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        require_object(properties, "form properties")?;
        self.post_form(
            &["form", form_id, "properties"],
            Some(&json!({ "properties": properties })),
        )
    }

    /// Same as [`build_add_form_properties`](Self::build_add_form_properties)
    /// but sent as JSON, for nested property values.
    pub fn build_set_form_properties(
        &self,
        form_id: &str,
        properties: &Value,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        require_object(properties, "form properties")?;
        self.put_json(&["form", form_id, "properties"], &json!({ "properties": properties }))
    }

    // -----------------------------------------------------------------------
    // Reports and files
    // -----------------------------------------------------------------------

    pub fn build_get_form_reports(&self, form_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.get(&["form", form_id, "reports"], Vec::new())
    }

    pub fn build_create_form_report(
        &self,
        form_id: &str,
        report: &ReportParameters,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id), ("Report title", report.title.as_str())])?;
        let body = json!({
            "title": report.title,
            "list_type": report.report_type.to_string(),
            "fields": report.fields.to_field_list(),
        });
        self.post_form(&["form", form_id, "reports"], Some(&body))
    }

    /// Uploaded files with their size and type.
    pub fn build_get_form_files(&self, form_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.get(&["form", form_id, "files"], Vec::new())
    }

    // -----------------------------------------------------------------------
    // Webhooks
    // -----------------------------------------------------------------------

    pub fn build_get_form_webhooks(&self, form_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.get(&["form", form_id, "webhooks"], Vec::new())
    }

    pub fn build_create_form_webhook(
        &self,
        form_id: &str,
        webhook_url: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id), ("webhookURL", webhook_url)])?;
        self.post_form(
            &["form", form_id, "webhooks"],
            Some(&json!({ "webhookURL": webhook_url })),
        )
    }

    pub fn build_delete_form_webhook(
        &self,
        form_id: &str,
        webhook_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id), ("Webhook ID", webhook_id)])?;
        self.delete(&["form", form_id, "webhooks", webhook_id])
    }

    // -----------------------------------------------------------------------
    // Submissions
    // -----------------------------------------------------------------------

    pub fn build_get_form_submissions(
        &self,
        form_id: &str,
        query: &ListQuery,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        self.get(&["form", form_id, "submissions"], query.to_pairs())
    }

    /// Submit one set of answers keyed by question id, form-encoded as
    /// `submission[<qid>]=…`.
    pub fn build_create_form_submission(
        &self,
        form_id: &str,
        submission: &Value,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        require_object(submission, "submission")?;
        self.post_form(
            &["form", form_id, "submissions"],
            Some(&json!({ "submission": submission })),
        )
    }

    /// Submit an array of answer sets as JSON.
    pub fn build_create_form_submissions(
        &self,
        form_id: &str,
        submissions: &Value,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FORM_ID, form_id)])?;
        require_array(submissions, "submissions")?;
        self.put_json(&["form", form_id, "submissions"], submissions)
    }
}
