//! `/folder` endpoints.

use serde_json::{json, Value};

use super::{require_object, JotformClient};
use crate::encoding::to_value;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::types::FolderParameters;

const FOLDER_ID: &str = "Folder ID";

impl JotformClient {
    /// Forms in a folder plus folder details such as its color.
    pub fn build_get_folder(&self, folder_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FOLDER_ID, folder_id)])?;
        self.get(&["folder", folder_id], Vec::new())
    }

    pub fn build_create_folder(&self, folder: &FolderParameters) -> Result<HttpRequest, ApiError> {
        self.preflight(&[("Folder name", folder.name.as_str())])?;
        let body = to_value(folder)?;
        self.post_form(&["folder"], Some(&body))
    }

    /// Update name, color, parent or contained forms, sent as JSON.
    pub fn build_update_folder(
        &self,
        folder_id: &str,
        properties: &Value,
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FOLDER_ID, folder_id)])?;
        require_object(properties, "folder properties")?;
        self.put_json(&["folder", folder_id], properties)
    }

    pub fn build_delete_folder(&self, folder_id: &str) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FOLDER_ID, folder_id)])?;
        self.delete(&["folder", folder_id])
    }

    pub fn build_add_forms_to_folder(
        &self,
        folder_id: &str,
        form_ids: &[&str],
    ) -> Result<HttpRequest, ApiError> {
        self.preflight(&[(FOLDER_ID, folder_id)])?;
        if form_ids.is_empty() || form_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ApiError::MissingArgument("Form ID"));
        }
        self.build_update_folder(folder_id, &json!({ "forms": form_ids }))
    }

    pub fn build_add_form_to_folder(
        &self,
        folder_id: &str,
        form_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.build_add_forms_to_folder(folder_id, &[form_id])
    }
}
