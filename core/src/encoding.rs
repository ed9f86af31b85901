//! Request body encoders.
//!
//! POST bodies are sent as `application/x-www-form-urlencoded`. Nested
//! objects and arrays are flattened with bracket keys, the way the vendor's
//! PHP backend expects them:
//!
//! ```text
//! {"submission": {"1": "a", "2": {"first": "Ann"}}}
//!   -> submission[1]=a&submission[2][first]=Ann
//! ```
//!
//! PUT bodies are sent as a JSON document.

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::ApiError;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Flatten a JSON object into form fields.
///
/// `null` values are skipped. The top level must be an object.
pub fn form_fields(value: &Value) -> Result<Vec<(String, String)>, ApiError> {
    let Value::Object(map) = value else {
        return Err(ApiError::Serialization(format!(
            "form body must be a JSON object, got {}",
            type_name(value)
        )));
    };
    let mut fields = Vec::new();
    for (key, value) in map {
        flatten(key.clone(), value, &mut fields);
    }
    Ok(fields)
}

/// Encode a JSON object as a urlencoded form body.
pub fn form_encode(value: &Value) -> Result<String, ApiError> {
    let fields = form_fields(value)?;
    Ok(form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish())
}

/// Encode any serializable value as a JSON body.
pub fn json_encode<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Serialize a typed payload into a `Value`, for bodies built from structs.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn flatten(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Number(n) => out.push((prefix, n.to_string())),
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(format!("{prefix}[{i}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten(format!("{prefix}[{key}]"), item, out);
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flat_object_encodes_as_pairs() {
        let body = form_encode(&json!({"webhookURL": "http://www.myhost.com/post.php"})).unwrap();
        assert_eq!(body, "webhookURL=http%3A%2F%2Fwww.myhost.com%2Fpost.php");
    }

    #[test]
    fn nested_object_uses_bracket_keys() {
        let fields = form_fields(&json!({
            "submission": {"1": "john@example.com", "3": {"first": "John", "last": "Doe"}}
        }))
        .unwrap();
        assert_eq!(
            fields,
            vec![
                ("submission[1]".to_string(), "john@example.com".to_string()),
                ("submission[3][first]".to_string(), "John".to_string()),
                ("submission[3][last]".to_string(), "Doe".to_string()),
            ]
        );
    }

    #[test]
    fn arrays_use_indexed_keys() {
        let fields = form_fields(&json!({"forms": ["a", "b"]})).unwrap();
        assert_eq!(
            fields,
            vec![
                ("forms[0]".to_string(), "a".to_string()),
                ("forms[1]".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn scalars_are_stringified_and_nulls_dropped() {
        let fields = form_fields(&json!({"order": 2, "required": true, "hint": null})).unwrap();
        assert!(fields.contains(&("order".to_string(), "2".to_string())));
        assert!(fields.contains(&("required".to_string(), "true".to_string())));
        assert!(!fields.iter().any(|(k, _)| k == "hint"));
    }

    #[test]
    fn brackets_in_keys_are_percent_encoded() {
        let body = form_encode(&json!({"question": {"type": "control_email"}})).unwrap();
        assert_eq!(body, "question%5Btype%5D=control_email");
    }

    #[test]
    fn non_object_form_body_is_rejected() {
        let err = form_encode(&json!(["a"])).unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
    }

    #[test]
    fn json_encode_keeps_nesting() {
        let body = json_encode(&json!([{"1": {"text": "answer"}}])).unwrap();
        let back: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(back[0]["1"]["text"], "answer");
    }
}
