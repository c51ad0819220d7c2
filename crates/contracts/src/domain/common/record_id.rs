use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier.
///
/// The backend hands out integer primary keys, but identifiers that reach the
/// client through the auth endpoints are strings. Both shapes are accepted and
/// serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(value) => write!(f, "{}", value),
            RecordId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_shapes() {
        let int: RecordId = serde_json::from_str("7").unwrap();
        let text: RecordId = serde_json::from_str("\"a1\"").unwrap();
        assert_eq!(int, RecordId::Int(7));
        assert_eq!(text, RecordId::Text("a1".to_string()));
    }

    #[test]
    fn test_serializes_unchanged() {
        assert_eq!(serde_json::to_string(&RecordId::Int(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&RecordId::from("u-3")).unwrap(),
            "\"u-3\""
        );
        assert_eq!(RecordId::Int(3).as_string(), "3");
    }
}
