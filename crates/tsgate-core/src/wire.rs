//! JSON protocol spoken with the compiler bridge script.
//!
//! These types mirror the compiler's own representation (string categories,
//! nested message chains, UTF-16 offsets). Nothing outside `engine` and
//! `classify` should depend on them.

use serde::{Deserialize, Serialize};

/// Written to the bridge's stdin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRequest {
    pub file: String,
    pub config_path: String,
    pub config_dir: String,
}

/// The single JSON document the bridge writes to stdout.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BridgeReply {
    Ok {
        typescript_version: String,
        diagnostics: Vec<RawDiagnostic>,
    },
    /// The compiler could not resolve the configuration (bad `extends`,
    /// unknown options, ...).
    ConfigError { diagnostics: Vec<RawDiagnostic> },
    /// The program was built but has no source unit for the target file.
    SourceMissing,
    TypescriptMissing { detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RawCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDiagnostic {
    /// Origin file as the compiler names it; `None` for global diagnostics.
    #[serde(default)]
    pub file: Option<String>,
    /// UTF-16 offset into the origin file.
    #[serde(default)]
    pub start: Option<u32>,
    pub category: RawCategory,
    pub code: u32,
    pub message_text: MessageText,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MessageText {
    Text(String),
    Chain(MessageChain),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageChain {
    pub message_text: String,
    #[serde(default)]
    pub next: Vec<MessageChain>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok_reply() {
        let json = r#"{
            "status": "ok",
            "typescriptVersion": "5.6.3",
            "diagnostics": [{
                "file": "/p/a.ts",
                "start": 6,
                "length": 1,
                "category": "error",
                "code": 2322,
                "messageText": "Type 'string' is not assignable to type 'number'."
            }]
        }"#;
        let BridgeReply::Ok {
            typescript_version,
            diagnostics,
        } = serde_json::from_str(json).unwrap()
        else {
            panic!("expected Ok")
        };
        assert_eq!(typescript_version, "5.6.3");
        assert_eq!(diagnostics[0].code, 2322);
        assert_eq!(diagnostics[0].category, RawCategory::Error);
        assert!(matches!(diagnostics[0].message_text, MessageText::Text(_)));
    }

    #[test]
    fn parse_chained_message() {
        let json = r#"{
            "file": null,
            "category": "suggestion",
            "code": 80001,
            "messageText": {
                "messageText": "outer",
                "category": 1,
                "code": 2322,
                "next": [{"messageText": "inner", "category": 1, "code": 2326}]
            }
        }"#;
        let diag: RawDiagnostic = serde_json::from_str(json).unwrap();
        assert_eq!(diag.file, None);
        assert_eq!(diag.start, None);
        let MessageText::Chain(chain) = diag.message_text else {
            panic!("expected Chain")
        };
        assert_eq!(chain.message_text, "outer");
        assert_eq!(chain.next[0].message_text, "inner");
        assert!(chain.next[0].next.is_empty());
    }

    #[test]
    fn parse_failure_replies() {
        let reply: BridgeReply = serde_json::from_str(r#"{"status": "sourceMissing"}"#).unwrap();
        assert!(matches!(reply, BridgeReply::SourceMissing));

        let reply: BridgeReply =
            serde_json::from_str(r#"{"status": "typescriptMissing", "detail": "Cannot find module"}"#)
                .unwrap();
        let BridgeReply::TypescriptMissing { detail } = reply else {
            panic!("expected TypescriptMissing")
        };
        assert_eq!(detail, "Cannot find module");
    }

    #[test]
    fn request_uses_camel_case() {
        let request = BridgeRequest {
            file: "/p/a.ts".into(),
            config_path: "/p/tsconfig.json".into(),
            config_dir: "/p".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["configPath"], "/p/tsconfig.json");
        assert_eq!(value["configDir"], "/p");
    }
}
