//! JavaScript runtime detection for the compiler bridge.
//!
//! The TypeScript compiler only exists as a JavaScript package, so the
//! bridge script runs under whichever runtime is available.
//!
//! # Runtime priority
//! 1. bun  — fastest startup
//! 2. node — the reference runtime for `typescript`
//! 3. deno — Node compatibility layer, needs explicit permissions

use std::path::Path;

use tokio::process::Command;

use crate::config::RuntimeChoice;
use crate::error::{Result, TsgateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    Bun,
    Node,
    Deno,
}

impl Runtime {
    pub fn name(&self) -> &'static str {
        match self {
            Runtime::Bun => "bun",
            Runtime::Node => "node",
            Runtime::Deno => "deno",
        }
    }

    fn is_installed(&self) -> bool {
        which::which(self.name()).is_ok()
    }
}

/// Resolve the runtime to use for this invocation.
pub fn detect_runtime(choice: RuntimeChoice) -> Result<Runtime> {
    let forced = match choice {
        RuntimeChoice::Auto => None,
        RuntimeChoice::Bun => Some(Runtime::Bun),
        RuntimeChoice::Node => Some(Runtime::Node),
        RuntimeChoice::Deno => Some(Runtime::Deno),
    };

    if let Some(runtime) = forced {
        return if runtime.is_installed() {
            Ok(runtime)
        } else {
            Err(TsgateError::RuntimeUnavailable(runtime.name()))
        };
    }

    [Runtime::Bun, Runtime::Node, Runtime::Deno]
        .into_iter()
        .find(Runtime::is_installed)
        .ok_or(TsgateError::NoRuntime)
}

/// Command that executes `script` under `runtime`. The script reads its
/// request from stdin and writes one JSON reply to stdout.
pub fn build_command(runtime: Runtime, script: &Path) -> Command {
    match runtime {
        Runtime::Bun => {
            let mut cmd = Command::new("bun");
            cmd.arg("run").arg(script);
            cmd
        }
        Runtime::Node => {
            let mut cmd = Command::new("node");
            cmd.arg(script);
            cmd
        }
        Runtime::Deno => {
            let mut cmd = Command::new("deno");
            cmd.args(["run", "--allow-read", "--allow-env", "--allow-sys"])
                .arg(script);
            cmd
        }
    }
}
