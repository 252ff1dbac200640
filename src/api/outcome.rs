//! Typed result of a form submission against the banking API.
//!
//! Validation failures from the server arrive as a JSON object keyed by
//! field name, with a special `detail` key for page-level errors. That shape
//! is parsed exactly once, here, into a tagged variant - no caller iterates
//! arbitrary response keys.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Outcome of submitting a form to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<T> {
    /// 2xx response with the parsed payload.
    Ok(T),
    /// Field-keyed validation errors, one message per field (the first
    /// element of each server-side message array).
    FieldErrors(HashMap<String, String>),
    /// A page-level error from the `detail` key.
    Detail(String),
}

impl<T: DeserializeOwned> FormOutcome<T> {
    /// Consume an HTTP response and classify it.
    pub async fn from_response(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if status.is_success() {
            let payload =
                serde_json::from_str(&body).context("Failed to parse success response")?;
            Ok(FormOutcome::Ok(payload))
        } else {
            debug!(%status, "Form submission rejected");
            Ok(classify_error_body(&body))
        }
    }
}

/// Parse a non-2xx JSON body into the tagged error variant.
///
/// `detail` wins over any field keys; other keys map to the first element of
/// their message array, or the bare string value when the server sends one.
/// Unintelligible bodies become a generic `Detail`.
pub fn classify_error_body<T>(body: &str) -> FormOutcome<T> {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return FormOutcome::Detail("Unexpected response from server".to_string()),
    };

    let map = match parsed.as_object() {
        Some(map) => map,
        None => return FormOutcome::Detail("Unexpected response from server".to_string()),
    };

    if let Some(detail) = map.get("detail") {
        return FormOutcome::Detail(value_to_message(detail));
    }

    let mut fields = HashMap::new();
    for (key, value) in map {
        fields.insert(key.clone(), value_to_message(value));
    }

    if fields.is_empty() {
        FormOutcome::Detail("Unexpected response from server".to_string())
    } else {
        FormOutcome::FieldErrors(fields)
    }
}

/// First element of a message array, or the string itself.
fn value_to_message(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .first()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_take_first_message() {
        let outcome: FormOutcome<()> =
            classify_error_body(r#"{"password": ["too short", "too common"]}"#);
        match outcome {
            FormOutcome::FieldErrors(fields) => {
                assert_eq!(fields.get("password").unwrap(), "too short");
                assert_eq!(fields.len(), 1);
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_detail_key_becomes_page_level_error() {
        let outcome: FormOutcome<()> =
            classify_error_body(r#"{"detail": "No active account found with the given credentials"}"#);
        assert_eq!(
            outcome,
            FormOutcome::Detail("No active account found with the given credentials".to_string())
        );
    }

    #[test]
    fn test_detail_wins_over_field_keys() {
        let outcome: FormOutcome<()> =
            classify_error_body(r#"{"detail": "nope", "username": ["required"]}"#);
        assert_eq!(outcome, FormOutcome::Detail("nope".to_string()));
    }

    #[test]
    fn test_bare_string_value_is_taken_as_is() {
        let outcome: FormOutcome<()> =
            classify_error_body(r#"{"recipient": "Recipient must be specified"}"#);
        match outcome {
            FormOutcome::FieldErrors(fields) => {
                assert_eq!(fields.get("recipient").unwrap(), "Recipient must be specified");
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_field_errors_all_mapped() {
        let outcome: FormOutcome<()> = classify_error_body(
            r#"{"username": ["This field is required."], "password": ["This field is required."]}"#,
        );
        match outcome {
            FormOutcome::FieldErrors(fields) => assert_eq!(fields.len(), 2),
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_body_degrades_to_generic_detail() {
        let outcome: FormOutcome<()> = classify_error_body("<html>504</html>");
        assert!(matches!(outcome, FormOutcome::Detail(_)));

        let outcome: FormOutcome<()> = classify_error_body("[1, 2, 3]");
        assert!(matches!(outcome, FormOutcome::Detail(_)));
    }

    #[test]
    fn test_empty_message_array_yields_empty_message() {
        let outcome: FormOutcome<()> = classify_error_body(r#"{"amount": []}"#);
        match outcome {
            FormOutcome::FieldErrors(fields) => assert_eq!(fields.get("amount").unwrap(), ""),
            other => panic!("expected field errors, got {:?}", other),
        }
    }
}
