//! Classification of create-source failures into displayable payloads

use contracts::shared::metadata::FieldErrors;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub const ERROR_FIELD: &str = "error";
pub const NO_SERVER_RESPONSE: &str = "No Server Response";
pub const SOURCE_ADD_URL_NOT_FOUND: &str = "Source add URL not found";
pub const ADDING_LOG_SOURCE_FAILED: &str = "Adding log source failed";

/// Server messages that are shown to the user in a friendlier wording.
/// Keys are normalized with [`normalize_message`].
static MESSAGE_REWRITES: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    [(
        "The fields name, user must make a unique set.",
        "Source name should be unique",
    )]
    .into_iter()
    .map(|(server, shown)| (normalize_message(server), shown))
    .collect()
});

fn normalize_message(message: &str) -> String {
    message.to_lowercase()
}

/// Text to render for a single server message
pub fn display_message(message: &str) -> &str {
    match MESSAGE_REWRITES.get(&normalize_message(message)) {
        Some(shown) => *shown,
        None => message,
    }
}

/// Failure of `POST /api/sources/`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateSourceError {
    /// No response was received at all
    #[error("no response from server")]
    Transport,
    /// 400/401 with a field-keyed body authored by the server
    #[error("request rejected with status {status}")]
    ClientRequest { status: u16, fields: FieldErrors },
    #[error("create source endpoint not found")]
    NotFound,
    #[error("server failed with status {status}")]
    Server { status: u16 },
}

impl CreateSourceError {
    /// Map a transport outcome to an error kind.
    ///
    /// `status` is `None` when no response arrived. A 400/401 without a
    /// usable body is reported as a plain server failure.
    pub fn classify(status: Option<u16>, body: Option<&str>) -> Self {
        let Some(status) = status else {
            return CreateSourceError::Transport;
        };

        match status {
            400 | 401 => match body.and_then(parse_field_errors) {
                Some(fields) => CreateSourceError::ClientRequest { status, fields },
                None => CreateSourceError::Server { status },
            },
            404 => CreateSourceError::NotFound,
            _ => CreateSourceError::Server { status },
        }
    }
}

/// Parse a server error body into field -> message.
///
/// Each field carries either a string or a list of strings; lists are joined
/// with `,`. A bare string or list body is filed under `error`.
fn parse_field_errors(body: &str) -> Option<FieldErrors> {
    let value: Value = serde_json::from_str(body).ok()?;

    let fields: FieldErrors = match value {
        Value::Object(map) => map
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(field, v)| (field, flatten_message(&v)))
            .collect(),
        Value::String(_) | Value::Array(_) => {
            FieldErrors::from([(ERROR_FIELD.to_string(), flatten_message(&value))])
        }
        _ => return None,
    };

    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

fn flatten_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_message)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// One line of the error alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub field: String,
    pub message: String,
}

/// Field-keyed messages shown after a failed submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    entries: Vec<ErrorEntry>,
}

impl ErrorPayload {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            entries: vec![ErrorEntry {
                field: ERROR_FIELD.to_string(),
                message: message.into(),
            }],
        }
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Entries with server wording replaced by display wording
    pub fn display_entries(&self) -> Vec<ErrorEntry> {
        self.entries
            .iter()
            .map(|entry| ErrorEntry {
                field: entry.field.clone(),
                message: display_message(&entry.message).to_string(),
            })
            .collect()
    }
}

impl From<&CreateSourceError> for ErrorPayload {
    fn from(error: &CreateSourceError) -> Self {
        match error {
            CreateSourceError::Transport => ErrorPayload::single(NO_SERVER_RESPONSE),
            CreateSourceError::ClientRequest { fields, .. } => ErrorPayload {
                entries: fields
                    .iter()
                    .map(|(field, message)| ErrorEntry {
                        field: field.clone(),
                        message: message.clone(),
                    })
                    .collect(),
            },
            CreateSourceError::NotFound => ErrorPayload::single(SOURCE_ADD_URL_NOT_FOUND),
            CreateSourceError::Server { .. } => ErrorPayload::single(ADDING_LOG_SOURCE_FAILED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(error: &CreateSourceError) -> Vec<String> {
        ErrorPayload::from(error)
            .display_entries()
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    #[test]
    fn test_no_response() {
        let error = CreateSourceError::classify(None, None);
        assert_eq!(error, CreateSourceError::Transport);
        assert_eq!(shown(&error), vec!["No Server Response"]);
    }

    #[test]
    fn test_not_found() {
        let error = CreateSourceError::classify(Some(404), Some("<html></html>"));
        assert_eq!(shown(&error), vec!["Source add URL not found"]);
    }

    #[test]
    fn test_unmapped_statuses() {
        for status in [403, 409, 500, 502] {
            let error = CreateSourceError::classify(Some(status), Some("{}"));
            assert_eq!(shown(&error), vec!["Adding log source failed"]);
        }
    }

    #[test]
    fn test_bad_request_body_passes_through() {
        let body = r#"{"name": "Ensure this field has no more than 50 characters."}"#;
        let error = CreateSourceError::classify(Some(400), Some(body));
        let payload = ErrorPayload::from(&error);
        assert_eq!(payload.entries().len(), 1);
        assert_eq!(payload.entries()[0].field, "name");
        assert_eq!(
            payload.entries()[0].message,
            "Ensure this field has no more than 50 characters."
        );
    }

    #[test]
    fn test_unauthorized_body_passes_through() {
        let body = r#"{"detail": "Authentication credentials were not provided."}"#;
        let error = CreateSourceError::classify(Some(401), Some(body));
        assert_eq!(
            shown(&error),
            vec!["Authentication credentials were not provided."]
        );
    }

    #[test]
    fn test_unique_message_rewritten_case_insensitively() {
        for text in [
            "The fields name, user must make a unique set.",
            "THE FIELDS NAME, USER MUST MAKE A UNIQUE SET.",
            "the fields name, user must make a unique set.",
        ] {
            let body = serde_json::json!({ "name": text }).to_string();
            let error = CreateSourceError::classify(Some(400), Some(&body));
            assert_eq!(shown(&error), vec!["Source name should be unique"]);
        }
    }

    #[test]
    fn test_list_messages_are_joined() {
        let body = r#"{"non_field_errors": ["The fields name, user must make a unique set."], "name": ["a", "b"]}"#;
        let error = CreateSourceError::classify(Some(400), Some(body));
        let entries = ErrorPayload::from(&error).display_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].field, "name");
        assert_eq!(entries[0].message, "a,b");
        assert_eq!(entries[1].message, "Source name should be unique");
    }

    #[test]
    fn test_bad_request_without_body_is_not_dropped() {
        assert_eq!(
            shown(&CreateSourceError::classify(Some(400), None)),
            vec!["Adding log source failed"]
        );
        assert_eq!(
            shown(&CreateSourceError::classify(Some(400), Some("not json"))),
            vec!["Adding log source failed"]
        );
        assert_eq!(
            shown(&CreateSourceError::classify(Some(400), Some("{}"))),
            vec!["Adding log source failed"]
        );
    }

    #[test]
    fn test_other_messages_untouched() {
        assert_eq!(display_message("Name taken"), "Name taken");
    }
}
