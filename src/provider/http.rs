//! Shared HTTP client construction, auth headers, and JSON path access.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::error::{Result, ScoutError};

/// Build a reqwest client with a fixed per-request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(ScoutError::from_transport)
}

/// Build JSON headers, adding a Bearer token when one is configured.
pub fn bearer_headers(api_key: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        if let Ok(val) = HeaderValue::from_str(&format!("Bearer {key}")) {
            headers.insert(AUTHORIZATION, val);
        }
    }
    headers
}

/// One step on a JSON access path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
}

/// Render a path the way it appears in error messages, e.g. `choices[0].message.content`.
pub fn describe_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(i) => out.push_str(&format!("[{i}]")),
        }
    }
    out
}

/// Walk `path` through `value`, checking every hop, and return the string at the end.
pub fn string_at<'a>(value: &'a Value, path: &[PathSegment]) -> Result<&'a str> {
    let mut current = value;
    for (depth, segment) in path.iter().enumerate() {
        let next = match segment {
            PathSegment::Key(key) => current.get(*key),
            PathSegment::Index(i) => current.as_array().and_then(|items| items.get(*i)),
        };
        current = next.ok_or_else(|| {
            ScoutError::MalformedResponse(format!(
                "response is missing `{}` (expected `{}`)",
                describe_path(&path[..=depth]),
                describe_path(path)
            ))
        })?;
    }
    current.as_str().ok_or_else(|| {
        ScoutError::MalformedResponse(format!(
            "`{}` is not a string: {current}",
            describe_path(path)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::PathSegment::{Index, Key};
    use super::*;
    use serde_json::json;

    const CONTENT: &[PathSegment] = &[Key("choices"), Index(0), Key("message"), Key("content")];

    #[test]
    fn string_at_follows_nested_path() {
        let value = json!({ "choices": [{ "message": { "content": "hello" } }] });
        assert_eq!(string_at(&value, CONTENT).unwrap(), "hello");
    }

    #[test]
    fn string_at_names_the_first_missing_hop() {
        let value = json!({ "choices": [] });
        match string_at(&value, CONTENT) {
            Err(ScoutError::MalformedResponse(msg)) => {
                assert!(msg.contains("`choices[0]`"), "{msg}");
                assert!(msg.contains("choices[0].message.content"), "{msg}");
            }
            other => panic!("expected malformed response, got {other:?}"),
        }
    }

    #[test]
    fn string_at_rejects_non_string_leaf() {
        let value = json!({ "choices": [{ "message": { "content": null } }] });
        assert!(matches!(
            string_at(&value, CONTENT),
            Err(ScoutError::MalformedResponse(_))
        ));
    }

    #[test]
    fn bearer_headers_skip_missing_key() {
        assert!(bearer_headers(None).get(AUTHORIZATION).is_none());
        assert!(bearer_headers(Some("")).get(AUTHORIZATION).is_none());
        assert_eq!(
            bearer_headers(Some("abc")).get(AUTHORIZATION).unwrap(),
            "Bearer abc"
        );
    }
}
