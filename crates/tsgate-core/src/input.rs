//! Hook payload parsing.
//!
//! The host writes one JSON object to stdin:
//!
//! ```json
//! {"tool_input": {"file_path": "/abs/src/a.ts"}}
//! ```
//!
//! Missing or malformed input is never an error: it yields `None` and the
//! hook exits cleanly.

use std::io::Read;
use std::path::PathBuf;

use serde_json::Value;

/// Keys probed under `tool_input`, first present non-empty string wins.
pub const PATH_KEYS: [&str; 3] = ["file_path", "path", "notebook_path"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInvocation {
    pub file_path: PathBuf,
}

/// Read stdin to completion and parse it.
pub fn read_invocation(mut reader: impl Read) -> Option<HookInvocation> {
    let mut raw = String::new();
    if let Err(e) = reader.read_to_string(&mut raw) {
        tracing::warn!("could not read hook payload: {e}");
        return None;
    }
    parse_invocation(&raw)
}

pub fn parse_invocation(raw: &str) -> Option<HookInvocation> {
    if raw.trim().is_empty() {
        tracing::debug!("empty hook payload");
        return None;
    }

    let payload: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("ignoring malformed hook payload: {e}");
            return None;
        }
    };

    let Some(tool_input) = payload.get("tool_input").and_then(Value::as_object) else {
        tracing::debug!("hook payload has no tool_input object");
        return None;
    };

    PATH_KEYS
        .iter()
        .find_map(|key| {
            tool_input
                .get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(|path| HookInvocation {
            file_path: PathBuf::from(path),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(raw: &str) -> Option<PathBuf> {
        parse_invocation(raw).map(|inv| inv.file_path)
    }

    #[test]
    fn empty_input_is_no_invocation() {
        assert_eq!(path_of(""), None);
        assert_eq!(path_of("  \n"), None);
    }

    #[test]
    fn malformed_json_is_no_invocation() {
        assert_eq!(path_of("{not json"), None);
        assert_eq!(path_of("[1, 2]"), None);
    }

    #[test]
    fn file_path_key() {
        let raw = r#"{"tool_input": {"file_path": "/p/src/a.ts"}}"#;
        assert_eq!(path_of(raw), Some(PathBuf::from("/p/src/a.ts")));
    }

    #[test]
    fn keys_are_probed_in_priority_order() {
        let raw = r#"{"tool_input": {"notebook_path": "/n.ipynb", "path": "/b.ts", "file_path": "/a.ts"}}"#;
        assert_eq!(path_of(raw), Some(PathBuf::from("/a.ts")));

        let raw = r#"{"tool_input": {"notebook_path": "/n.ipynb", "path": "/b.ts"}}"#;
        assert_eq!(path_of(raw), Some(PathBuf::from("/b.ts")));

        let raw = r#"{"tool_input": {"notebook_path": "/n.ipynb"}}"#;
        assert_eq!(path_of(raw), Some(PathBuf::from("/n.ipynb")));
    }

    #[test]
    fn null_and_non_string_values_are_skipped() {
        let raw = r#"{"tool_input": {"file_path": null, "path": 3, "notebook_path": "/n.ts"}}"#;
        assert_eq!(path_of(raw), Some(PathBuf::from("/n.ts")));
    }

    #[test]
    fn missing_tool_input_is_no_invocation() {
        assert_eq!(path_of(r#"{"tool_name": "Edit"}"#), None);
        assert_eq!(path_of(r#"{"tool_input": {}}"#), None);
    }

    #[test]
    fn reads_from_any_reader() {
        let raw = br#"{"tool_input": {"path": "x.ts"}}"#;
        let inv = read_invocation(&raw[..]).unwrap();
        assert_eq!(inv.file_path, PathBuf::from("x.ts"));
    }
}
