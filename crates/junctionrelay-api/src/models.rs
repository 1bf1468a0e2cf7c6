// Wire models for the junction endpoints.
//
// The summary endpoint is validated item by item: one malformed entry
// is reported and skipped, the rest of the batch survives.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Opaque junction identifier, always carried as a string.
///
/// The backend sends either a JSON string or a number; both are
/// stringified so `7` and `"7"` name the same junction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JunctionId(String);

impl JunctionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accept a JSON string or number; anything else is not an id.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for JunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JunctionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for JunctionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One entry of `GET {prefix}/junctions/summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Junction {
    pub id: JunctionId,
    pub name: String,
    pub status: Option<String>,
}

/// Body of `GET {prefix}/junctions/{id}`. Fields other than `status` are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JunctionStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A summary entry that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub index: usize,
    pub reason: String,
}

/// Parsed summary response.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub junctions: Vec<Junction>,
    pub rejected: Vec<RejectedEntry>,
}

impl Summary {
    /// Validate a summary body.
    ///
    /// A non-array body is a malformed payload. Items that are not objects,
    /// or lack `id` or `name`, are moved to `rejected`.
    pub fn parse(value: Value) -> Result<Self, Error> {
        let Value::Array(items) = value else {
            return Err(Error::Deserialization {
                message: format!("expected a JSON array, got {}", json_kind(&value)),
                body: value.to_string(),
            });
        };

        let mut summary = Self::default();
        for (index, item) in items.iter().enumerate() {
            match parse_entry(item) {
                Ok(junction) => summary.junctions.push(junction),
                Err(reason) => summary.rejected.push(RejectedEntry { index, reason }),
            }
        }
        Ok(summary)
    }
}

fn parse_entry(item: &Value) -> Result<Junction, String> {
    let Value::Object(map) = item else {
        return Err(format!("entry is not an object: {item}"));
    };

    let id = match map.get("id") {
        None | Some(Value::Null) => return Err(format!("missing required field `id`: {item}")),
        Some(raw) => {
            JunctionId::from_value(raw).ok_or_else(|| format!("unsupported `id` value: {raw}"))?
        }
    };

    let name = match map.get("name") {
        None | Some(Value::Null) => return Err(format!("missing required field `name`: {item}")),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    let status = map.get("status").and_then(Value::as_str).map(str::to_owned);

    Ok(Junction { id, name, status })
}

fn json_kind(value: &Value) -> &'static str {
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
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn numeric_and_string_ids_are_stringified() {
        let summary = Summary::parse(json!([
            { "id": 7, "name": "Desk" },
            { "id": "abc", "name": "Shelf", "status": "Idle", "extra": true },
        ]))
        .unwrap();

        assert_eq!(
            summary.junctions,
            vec![
                Junction { id: "7".into(), name: "Desk".into(), status: None },
                Junction { id: "abc".into(), name: "Shelf".into(), status: Some("Idle".into()) },
            ]
        );
        assert!(summary.rejected.is_empty());
    }

    #[test]
    fn malformed_entries_do_not_abort_the_batch() {
        let summary = Summary::parse(json!([
            "not-an-object",
            { "name": "no id" },
            { "id": 2 },
            { "id": null, "name": "null id" },
            { "id": 3, "name": "Valid" },
        ]))
        .unwrap();

        assert_eq!(summary.junctions.len(), 1);
        assert_eq!(summary.junctions[0].id.as_str(), "3");
        let indexes: Vec<usize> = summary.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn non_array_body_is_malformed() {
        let err = Summary::parse(json!({ "junctions": [] })).unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }), "got {err:?}");
    }

    #[test]
    fn status_body_keeps_unknown_fields() {
        let status: JunctionStatus =
            serde_json::from_value(json!({ "status": "Running", "uptime": 12 })).unwrap();
        assert_eq!(status.status.as_deref(), Some("Running"));
        assert_eq!(status.extra.get("uptime"), Some(&json!(12)));
    }
}
