//! Argument extraction from the untyped tool-call argument bag.
//!
//! All tools share one coerce-or-fail routine instead of per-tool ad hoc
//! casts. An [`ArgError`] never crosses the transport: the dispatcher
//! turns its `Display` text into the content of an otherwise successful
//! tool response, so the calling model can read what was wrong.

use serde_json::{Map, Value};
use thiserror::Error;

/// The raw `arguments` object of a tool call.
pub type ArgMap = Map<String, Value>;

/// A required argument is absent or an argument has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// A required argument was not supplied (or was null).
    #[error("{0} is required")]
    Missing(&'static str),

    /// An argument was supplied but does not coerce to its declared type.
    #[error("{name} must be {expected}")]
    WrongType {
        /// Argument name.
        name: &'static str,
        /// Expected shape, e.g. "a string".
        expected: &'static str,
    },
}

// `null` counts as absent throughout: Jira tooling clients routinely send
// explicit nulls for arguments they leave blank.
fn present<'a>(args: &'a ArgMap, name: &str) -> Option<&'a Value> {
    args.get(name).filter(|value| !value.is_null())
}

/// Extract a required string argument.
///
/// # Errors
///
/// [`ArgError::Missing`] when absent, [`ArgError::WrongType`] when not a
/// string.
pub fn required_str<'a>(args: &'a ArgMap, name: &'static str) -> Result<&'a str, ArgError> {
    optional_str(args, name)?.ok_or(ArgError::Missing(name))
}

/// Extract an optional string argument.
///
/// # Errors
///
/// [`ArgError::WrongType`] when present but not a string.
pub fn optional_str<'a>(args: &'a ArgMap, name: &'static str) -> Result<Option<&'a str>, ArgError> {
    present(args, name)
        .map(|value| {
            value.as_str().ok_or(ArgError::WrongType {
                name,
                expected: "a string",
            })
        })
        .transpose()
}

/// Extract a required object argument.
///
/// # Errors
///
/// [`ArgError::Missing`] when absent, [`ArgError::WrongType`] when not an
/// object.
pub fn required_object<'a>(args: &'a ArgMap, name: &'static str) -> Result<&'a ArgMap, ArgError> {
    present(args, name)
        .ok_or(ArgError::Missing(name))?
        .as_object()
        .ok_or(ArgError::WrongType {
            name,
            expected: "an object",
        })
}

/// Extract an optional non-negative integer argument.
///
/// # Errors
///
/// [`ArgError::WrongType`] when present but not a non-negative integer.
pub fn optional_u32(args: &ArgMap, name: &'static str) -> Result<Option<u32>, ArgError> {
    present(args, name)
        .map(|value| {
            value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or(ArgError::WrongType {
                    name,
                    expected: "a non-negative integer",
                })
        })
        .transpose()
}

/// Flatten update fields to the flat string mapping Jira receives.
///
/// Strings pass through unchanged; every other value (numbers, booleans,
/// nested objects and arrays) is sent as its literal JSON text. Structured
/// updates therefore arrive at Jira as JSON-text strings, matching the
/// contract the server accepts for this endpoint.
#[must_use]
pub fn flatten_fields(fields: &ArgMap) -> ArgMap {
    fields
        .iter()
        .map(|(name, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.clone(), Value::String(text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn bag(value: Value) -> ArgMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn required_str_reads_present_value() {
        let args = bag(json!({"issueId": "DEMO-123"}));
        assert_eq!(required_str(&args, "issueId").unwrap(), "DEMO-123");
    }

    #[rstest]
    #[case::absent(json!({}))]
    #[case::explicit_null(json!({"issueId": null}))]
    fn required_str_missing(#[case] args: Value) {
        let args = bag(args);
        assert_eq!(
            required_str(&args, "issueId"),
            Err(ArgError::Missing("issueId"))
        );
    }

    #[test]
    fn required_str_rejects_non_string() {
        let args = bag(json!({"issueId": 42}));
        assert_eq!(
            required_str(&args, "issueId"),
            Err(ArgError::WrongType {
                name: "issueId",
                expected: "a string"
            })
        );
    }

    #[test]
    fn error_messages_are_human_readable() {
        assert_eq!(ArgError::Missing("searchString").to_string(), "searchString is required");
        assert_eq!(
            ArgError::WrongType {
                name: "fields",
                expected: "an object"
            }
            .to_string(),
            "fields must be an object"
        );
    }

    #[test]
    fn optional_u32_defaults_and_coerces() {
        let args = bag(json!({"maxResults": 25}));
        assert_eq!(optional_u32(&args, "maxResults").unwrap(), Some(25));
        assert_eq!(optional_u32(&bag(json!({})), "maxResults").unwrap(), None);
        assert!(optional_u32(&bag(json!({"maxResults": "25"})), "maxResults").is_err());
        assert!(optional_u32(&bag(json!({"maxResults": -1})), "maxResults").is_err());
    }

    #[test]
    fn flatten_passes_strings_through() {
        let flat = flatten_fields(&bag(json!({"summary": "New title"})));
        assert_eq!(flat["summary"], json!("New title"));
    }

    #[test]
    fn flatten_stringifies_nested_objects() {
        let flat = flatten_fields(&bag(json!({"priority": {"id": "1"}})));
        assert_eq!(flat["priority"], json!("{\"id\":\"1\"}"));
    }

    #[test]
    fn flatten_stringifies_scalars() {
        let flat = flatten_fields(&bag(json!({"storyPoints": 5, "flagged": true})));
        assert_eq!(flat["storyPoints"], json!("5"));
        assert_eq!(flat["flagged"], json!("true"));
    }
}
