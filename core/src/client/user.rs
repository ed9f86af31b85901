//! `/user` endpoints: account details, account-wide listings and form
//! creation.

use serde_json::{json, Value};

use super::JotformClient;
use crate::encoding::to_value;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::types::{HistoryQuery, ListQuery, UserSettings};

impl JotformClient {
    /// Account details: account type, avatar, name, email, limits.
    pub fn build_get_user(&self) -> Result<HttpRequest, ApiError> {
        self.get(&["user"], Vec::new())
    }

    /// Submissions, uploads and payments counted this month.
    pub fn build_get_usage(&self) -> Result<HttpRequest, ApiError> {
        self.get(&["user", "usage"], Vec::new())
    }

    pub fn build_get_forms(&self, query: &ListQuery) -> Result<HttpRequest, ApiError> {
        self.get(&["user", "forms"], query.to_pairs())
    }

    /// Submissions across every form on the account.
    pub fn build_get_submissions(&self, query: &ListQuery) -> Result<HttpRequest, ApiError> {
        self.get(&["user", "submissions"], query.to_pairs())
    }

    pub fn build_get_subusers(&self) -> Result<HttpRequest, ApiError> {
        self.get(&["user", "subusers"], Vec::new())
    }

    pub fn build_get_folders(&self) -> Result<HttpRequest, ApiError> {
        self.get(&["user", "folders"], Vec::new())
    }

    pub fn build_get_reports(&self) -> Result<HttpRequest, ApiError> {
        self.get(&["user", "reports"], Vec::new())
    }

    pub fn build_get_settings(&self) -> Result<HttpRequest, ApiError> {
        self.get(&["user", "settings"], Vec::new())
    }

    pub fn build_update_settings(&self, settings: &UserSettings) -> Result<HttpRequest, ApiError> {
        let body = to_value(settings)?;
        self.post_form(&["user", "settings"], Some(&body))
    }

    /// Activity log: forms created or deleted, logins and so on.
    pub fn build_get_history(&self, query: &HistoryQuery) -> Result<HttpRequest, ApiError> {
        self.get(&["user", "history"], query.to_pairs())
    }

    pub fn build_register_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[("username", username), ("password", password), ("email", email)])?;
        let body = json!({"username": username, "password": password, "email": email});
        self.post_form(&["user", "register"], Some(&body))
    }

    /// Create a form with questions, properties and emails, form-encoded.
    pub fn build_create_form(&self, form: &Value) -> Result<HttpRequest, ApiError> {
        self.post_form(&["user", "forms"], Some(form))
    }

    /// Create one or more forms from a JSON document.
    pub fn build_create_forms(&self, forms: &Value) -> Result<HttpRequest, ApiError> {
        self.put_json(&["user", "forms"], forms)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::tests::client;
    use crate::encoding::FORM_CONTENT_TYPE;
    use crate::http::HttpMethod;
    use crate::types::{Direction, HistoryQuery, ListQuery, UserSettings};

    #[test]
    fn build_get_user_produces_correct_request() {
        let req = client().build_get_user().unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/user?apiKey=test-key");
        assert!(req.body.is_none());
    }

    #[test]
    fn simple_user_listings_hit_their_paths() {
        let c = client();
        let cases = [
            (c.build_get_usage().unwrap(), "/user/usage"),
            (c.build_get_subusers().unwrap(), "/user/subusers"),
            (c.build_get_folders().unwrap(), "/user/folders"),
            (c.build_get_reports().unwrap(), "/user/reports"),
            (c.build_get_settings().unwrap(), "/user/settings"),
        ];
        for (req, path) in cases {
            assert_eq!(req.method, HttpMethod::Get);
            assert_eq!(req.url, format!("http://localhost:3000{path}?apiKey=test-key"));
        }
    }

    #[test]
    fn build_get_forms_appends_query() {
        let query = ListQuery::new().limit(5).orderby("title").direction(Direction::Asc);
        let req = client().build_get_forms(&query).unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/user/forms?apiKey=test-key&limit=5&orderby=title&direction=ASC"
        );
    }

    #[test]
    fn build_get_submissions_encodes_filter_as_json() {
        let query = ListQuery::new().filter(json!({"new": "1"}));
        let req = client().build_get_submissions(&query).unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/user/submissions?apiKey=test-key&filter=%7B%22new%22%3A%221%22%7D"
        );
    }

    #[test]
    fn build_get_history_sends_defaults() {
        let req = client().build_get_history(&HistoryQuery::default()).unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/user/history?apiKey=test-key&action=all&sortBy=ASC"
        );
    }

    #[test]
    fn build_update_settings_is_form_encoded() {
        let settings = UserSettings {
            name: Some("Jane Doe".to_string()),
            ..Default::default()
        };
        let req = client().build_update_settings(&settings).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("content-type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(req.body.as_deref(), Some("name=Jane+Doe"));
    }

    #[test]
    fn build_register_user_requires_all_fields() {
        let err = client().build_register_user("jane", "", "jane@example.com").unwrap_err();
        assert_eq!(err.to_string(), "password is undefined");

        let req = client()
            .build_register_user("jane", "s3cret", "jane@example.com")
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/user/register?apiKey=test-key");
        let body = req.body.unwrap();
        assert!(body.contains("username=jane"));
        assert!(body.contains("email=jane%40example.com"));
    }

    #[test]
    fn create_form_uses_post_and_create_forms_uses_put() {
        let form = json!({"properties": {"title": "New Form"}});
        let post = client().build_create_form(&form).unwrap();
        assert_eq!(post.method, HttpMethod::Post);
        assert_eq!(post.body.as_deref(), Some("properties%5Btitle%5D=New+Form"));

        let put = client().build_create_forms(&form).unwrap();
        assert_eq!(put.method, HttpMethod::Put);
        assert_eq!(put.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(put.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, form);
    }
}
