use serde::Serialize;

use crate::classify::ValidationResult;
use crate::config::HookConfig;

/// Shown after an advisory report so the operator knows how to escalate.
pub const ADVISORY_NOTE: &str =
    "Type errors are advisory. Set TSGATE_BLOCK_ON_ERRORS=true to block on them.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoInput,
    FileMissing,
    NotCheckable,
    NoProjectConfig,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::NoInput => "no file path in hook input",
            SkipReason::FileMissing => "file does not exist",
            SkipReason::NotCheckable => "not a TypeScript file",
            SkipReason::NoProjectConfig => "no tsconfig.json found",
        }
    }
}

/// Terminal state of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Skipped(SkipReason),
    /// Infrastructure failure: bad config, missing source unit, bridge crash.
    Fatal,
    Clean,
    ErrorsAdvisory,
    ErrorsBlocking,
}

impl Outcome {
    /// Decide the outcome of a completed check.
    pub fn for_result(config: &HookConfig, result: &ValidationResult) -> Self {
        match (result.has_errors(), config.block_on_errors) {
            (false, _) => Outcome::Clean,
            (true, false) => Outcome::ErrorsAdvisory,
            (true, true) => Outcome::ErrorsBlocking,
        }
    }

    /// `0` success/skip, `1` infrastructure failure, `2` blocking type errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Skipped(_) | Outcome::Clean | Outcome::ErrorsAdvisory => 0,
            Outcome::Fatal => 1,
            Outcome::ErrorsBlocking => 2,
        }
    }
}
