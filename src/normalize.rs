//! Response normalization for the `list_databases` tool.
//!
//! The server does not return a plain JSON document. Depending on its state
//! and version the 2xx body is one of:
//!
//! - the literal sentinel [`NO_DATABASES_SENTINEL`], meaning "no results";
//! - a JSON array of database records;
//! - either of the above wrapped once more as a JSON string literal.
//!
//! One layer of string encoding is peeled off first, then the sentinel is
//! compared byte-for-byte, and only then is the structural parse attempted.
//! The sentinel is not valid JSON, so checking it after the parse would turn
//! every empty listing into a parse failure.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::models::DatabaseInfo;

/// Exact text the server sends when no vector databases exist.
pub const NO_DATABASES_SENTINEL: &str = "No vector databases are currently active";

/// Turn a raw `list_databases` response body into records, in server order.
///
/// `tool` only labels the error.
pub fn normalize(tool: &str, body: &[u8]) -> Result<Vec<DatabaseInfo>> {
    let text = std::str::from_utf8(body)
        .map_err(|e| parse_error(tool, body, format!("response is not valid UTF-8: {}", e)))?;

    let text = unwrap_json_string(text);
    if text == NO_DATABASES_SENTINEL {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Vec<DatabaseInfo>>(&text)
        .map_err(|e| parse_error(tool, body, format!("failed to parse database list: {}", e)))
}

/// If the whole body is a JSON string literal, return its decoded content.
fn unwrap_json_string(text: &str) -> Cow<'_, str> {
    match serde_json::from_str::<String>(text) {
        Ok(inner) => Cow::Owned(inner),
        Err(_) => Cow::Borrowed(text),
    }
}

fn parse_error(tool: &str, body: &[u8], reason: String) -> Error {
    Error::Parse {
        tool: tool.to_string(),
        raw: String::from_utf8_lossy(body).into_owned(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOOL: &str = "list_databases";

    fn record(name: &str, kind: &str, collection: &str, count: u64) -> DatabaseInfo {
        DatabaseInfo {
            name: name.into(),
            kind: kind.into(),
            collection: collection.into(),
            document_count: count,
        }
    }

    #[test]
    fn test_sentinel_is_empty_result() {
        let dbs = normalize(TOOL, NO_DATABASES_SENTINEL.as_bytes()).unwrap();
        assert!(dbs.is_empty());
    }

    #[test]
    fn test_string_encoded_sentinel_is_empty_result() {
        let body = serde_json::to_vec(NO_DATABASES_SENTINEL).unwrap();
        let dbs = normalize(TOOL, &body).unwrap();
        assert!(dbs.is_empty());
    }

    #[test]
    fn test_sentinel_near_misses_are_parse_errors() {
        for body in [
            "no vector databases are currently active",
            "No vector databases are currently active.",
            " No vector databases are currently active",
            "No vector databases are currently active\n",
            "No vector databases",
        ] {
            let err = normalize(TOOL, body.as_bytes()).unwrap_err();
            assert!(
                matches!(err, Error::Parse { .. }),
                "expected parse error for {:?}, got {:?}",
                body,
                err
            );
        }
    }

    #[test]
    fn test_plain_array() {
        let body = r#"[
            {"name":"docs","type":"milvus","collection":"c1","document_count":42},
            {"name":"wiki","type":"weaviate","collection":"Wiki","document_count":0}
        ]"#;
        let dbs = normalize(TOOL, body.as_bytes()).unwrap();
        assert_eq!(
            dbs,
            vec![
                record("docs", "milvus", "c1", 42),
                record("wiki", "weaviate", "Wiki", 0)
            ]
        );
    }

    #[test]
    fn test_string_encoded_array() {
        let body =
            r#""[{\"name\":\"docs\",\"type\":\"milvus\",\"collection\":\"c1\",\"document_count\":42}]""#;
        let dbs = normalize(TOOL, body.as_bytes()).unwrap();
        assert_eq!(dbs, vec![record("docs", "milvus", "c1", 42)]);
    }

    #[test]
    fn test_order_and_count_preserved() {
        let expected: Vec<DatabaseInfo> = (0..25)
            .rev()
            .map(|i| record(&format!("db{}", i), "milvus", &format!("col{}", i), i))
            .collect();
        let body = serde_json::to_vec(&expected).unwrap();
        assert_eq!(normalize(TOOL, &body).unwrap(), expected);
    }

    #[test]
    fn test_empty_array_is_empty_result() {
        assert!(normalize(TOOL, b"[]").unwrap().is_empty());
        assert!(normalize(TOOL, b"\"[]\"").unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_parse_error_with_raw_payload() {
        let err = normalize(TOOL, b"Available vector databases:\n[]").unwrap_err();
        match err {
            Error::Parse { tool, raw, .. } => {
                assert_eq!(tool, TOOL);
                assert_eq!(raw, "Available vector databases:\n[]");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        for body in [
            r#"{"name":"docs"}"#,
            r#"[{"name":"docs","type":"milvus","collection":"c1"}]"#,
            r#"[{"name":"docs","type":"milvus","collection":"c1","document_count":-1}]"#,
            "",
            "null",
        ] {
            assert!(
                matches!(normalize(TOOL, body.as_bytes()), Err(Error::Parse { .. })),
                "expected parse error for {:?}",
                body
            );
        }
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = normalize(TOOL, &[0xff, 0xfe, b'[', b']']).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
