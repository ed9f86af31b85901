//! `/submission/{id}` endpoints.

use serde_json::{json, Value};

use super::{require_object, JotformClient};
use crate::error::ApiError;
use crate::http::HttpRequest;

const SUBMISSION_ID: &str = "Submission ID";

impl JotformClient {
    pub fn build_get_submission(&self, submission_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(SUBMISSION_ID, submission_id)])?;
        self.get(&["submission", submission_id], Vec::new())
    }

    /// Overwrite answers of an existing submission, keyed by question id.
    pub fn build_edit_submission(
        &self,
        submission_id: &str,
        submission: &Value,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(SUBMISSION_ID, submission_id)])?;
        require_object(submission, "submission")?;
        self.post_form(
            &["submission", submission_id],
            Some(&json!({ "submission": submission })),
        )
    }

    pub fn build_delete_submission(&self, submission_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(SUBMISSION_ID, submission_id)])?;
        self.delete(&["submission", submission_id])
    }
}
