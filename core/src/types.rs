//! Typed parameters for the Jotform endpoints.
//!
//! # Design
//! Only inputs that the client itself has to shape (query strings, report
//! field lists, enumerated path segments) get dedicated types. Free-form
//! payloads such as question definitions or submission answers stay as
//! `serde_json::Value`, because their schema is owned by the vendor and
//! varies per form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

/// Pagination and filtering for `/user/forms`, `/user/submissions` and
/// `/form/{id}/submissions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// Sent as JSON text, e.g. `{"created_at:gt":"2013-01-01 00:00:00"}`.
    pub filter: Option<Value>,
    pub orderby: Option<String>,
    pub direction: Option<Direction>,
    pub full_text: Option<String>,
    pub nocache: Option<bool>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn orderby(mut self, field: impl Into<String>) -> Self {
        self.orderby = Some(field.into());
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn full_text(mut self, text: impl Into<String>) -> Self {
        self.full_text = Some(text.into());
        self
    }

    pub fn nocache(mut self, nocache: bool) -> Self {
        self.nocache = Some(nocache);
        self
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(orderby) = &self.orderby {
            pairs.push(("orderby", orderby.clone()));
        }
        if let Some(direction) = self.direction {
            pairs.push(("direction", direction.to_string()));
        }
        if let Some(text) = &self.full_text {
            pairs.push(("fullText", text.clone()));
        }
        if let Some(nocache) = self.nocache {
            pairs.push(("nocache", nocache.to_string()));
        }
        pairs
    }
}

/// Filters for `/user/history`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryQuery {
    /// Defaults to `all` on the wire.
    pub action: Option<String>,
    /// One of `lastWeek`, `lastMonth`, `last3Months`, `last6Months`,
    /// `lastYear`, `all`.
    pub date: Option<String>,
    /// Defaults to `ASC` on the wire.
    pub sort_by: Option<Direction>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl HistoryQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("action", self.action.clone().unwrap_or_else(|| "all".to_string()))];
        if let Some(date) = &self.date {
            pairs.push(("date", date.clone()));
        }
        pairs.push(("sortBy", self.sort_by.unwrap_or(Direction::Asc).to_string()));
        if let Some(start) = &self.start_date {
            pairs.push(("startDate", start.clone()));
        }
        if let Some(end) = &self.end_date {
            pairs.push(("endDate", end.clone()));
        }
        pairs
    }
}

/// Account settings accepted by `POST /user/settings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(rename = "securityQuestion", skip_serializing_if = "Option::is_none")]
    pub security_question: Option<String>,
    #[serde(rename = "securityAnswer", skip_serializing_if = "Option::is_none")]
    pub security_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// Payload for `POST /folder`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderParameters {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Output format of a form report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Csv,
    Excel,
    Grid,
    Table,
    Rss,
}

/// Columns included in a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportFields {
    pub ip: bool,
    pub submission_date: bool,
    pub question_ids: Vec<String>,
}

impl ReportFields {
    /// Comma-separated wire form: `ip`, `dt`, then question ids.
    pub fn to_field_list(&self) -> String {
        let mut fields = Vec::new();
        if self.ip {
            fields.push("ip");
        }
        if self.submission_date {
            fields.push("dt");
        }
        fields.extend(
            self.question_ids
                .iter()
                .map(String::as_str)
                .filter(|id| !id.is_empty()),
        );
        fields.join(",")
    }
}

/// Payload for `POST /form/{id}/reports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParameters {
    pub title: String,
    pub report_type: ReportType,
    #[serde(default)]
    pub fields: ReportFields,
}

/// Account plans listed under `/system/plan/{plan}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    Free,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_list_query_has_no_pairs() {
        assert!(ListQuery::new().to_pairs().is_empty());
    }

    #[test]
    fn list_query_pairs_use_wire_names() {
        let pairs = ListQuery::new()
            .offset(20)
            .limit(10)
            .filter(json!({"status": "ACTIVE"}))
            .orderby("created_at")
            .direction(Direction::Desc)
            .full_text("John Brown")
            .nocache(true)
            .to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("filter", r#"{"status":"ACTIVE"}"#.to_string()),
                ("offset", "20".to_string()),
                ("limit", "10".to_string()),
                ("orderby", "created_at".to_string()),
                ("direction", "DESC".to_string()),
                ("fullText", "John Brown".to_string()),
                ("nocache", "true".to_string()),
            ]
        );
    }

    #[test]
    fn history_query_applies_defaults() {
        let pairs = HistoryQuery::default().to_pairs();
        assert_eq!(
            pairs,
            vec![("action", "all".to_string()), ("sortBy", "ASC".to_string())]
        );
    }

    #[test]
    fn history_query_custom_values() {
        let query = HistoryQuery {
            action: Some("formCreation".to_string()),
            date: Some("lastWeek".to_string()),
            sort_by: Some(Direction::Desc),
            start_date: Some("01/01/2024".to_string()),
            end_date: None,
        };
        let pairs = query.to_pairs();
        assert_eq!(pairs[0], ("action", "formCreation".to_string()));
        assert!(pairs.contains(&("sortBy", "DESC".to_string())));
        assert!(pairs.contains(&("startDate", "01/01/2024".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "endDate"));
    }

    #[test]
    fn report_fields_serialize_in_order() {
        let fields = ReportFields {
            ip: true,
            submission_date: true,
            question_ids: vec!["1".to_string(), "".to_string(), "2".to_string()],
        };
        assert_eq!(fields.to_field_list(), "ip,dt,1,2");
        assert_eq!(ReportFields::default().to_field_list(), "");
    }

    #[test]
    fn enums_use_vendor_spelling() {
        assert_eq!(Plan::Platinum.to_string(), "PLATINUM");
        assert_eq!(ReportType::Excel.to_string(), "excel");
        assert_eq!("DESC".parse::<Direction>().unwrap(), Direction::Desc);
    }

    #[test]
    fn user_settings_skip_unset_fields() {
        let settings = UserSettings {
            time_zone: Some("Europe/Istanbul".to_string()),
            security_question: Some("Pet?".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value, json!({"time_zone": "Europe/Istanbul", "securityQuestion": "Pet?"}));
    }
}
