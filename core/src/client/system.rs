//! `/system` endpoints.

use super::JotformClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::types::Plan;

impl JotformClient {
    /// Limits and pricing of an account plan.
    pub fn build_get_plan(&self, plan: Plan) -> Result<HttpRequest, ApiError> {
        let plan = plan.to_string();
        self.get(&["system", "plan", plan.as_str()], Vec::new())
    }
}
