use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TsgateError {
    #[error("failed to read project config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("project config {path} must contain a JSON object")]
    ConfigNotObject { path: PathBuf },

    #[error("compiler rejected project config {path}:\n{messages}")]
    ConfigRejected { path: PathBuf, messages: String },

    #[error("{0} is not part of the compilation (check include/exclude and allowJs)")]
    SourceUnitMissing(PathBuf),

    #[error("typescript package not resolvable from {dir}: {detail}")]
    TypeScriptMissing { dir: PathBuf, detail: String },

    #[error("no JavaScript runtime found: install bun, node, or deno")]
    NoRuntime,

    #[error("requested runtime '{0}' is not on PATH")]
    RuntimeUnavailable(&'static str),

    #[error("compiler bridge failed: {0}")]
    BridgeFailed(String),

    #[error("unreadable compiler bridge reply: {source}\n  reply: {reply}")]
    BridgeProtocol {
        reply: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("type check exceeded {0}ms deadline")]
    Timeout(u64),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TsgateError>;
