//! `/report/{id}` endpoints. Reports are created per form, see
//! [`JotformClient::build_create_form_report`].

use super::JotformClient;
use crate::error::ApiError;
use crate::http::HttpRequest;

const REPORT_ID: &str = "Report ID";

impl JotformClient {
    pub fn build_get_report(&self, report_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(REPORT_ID, report_id)])?;
        self.get(&["report", report_id], Vec::new())
    }

    pub fn build_delete_report(&self, report_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(REPORT_ID, report_id)])?;
        self.delete(&["report", report_id])
    }
}
