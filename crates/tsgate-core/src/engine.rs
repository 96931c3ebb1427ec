use std::path::Path;

use crate::bridge::CompilerBridge;
use crate::classify::{self, LineIndex, ValidationResult};
use crate::config::HookConfig;
use crate::error::{Result, TsgateError};
use crate::paths;
use crate::project::ProjectConfig;
use crate::runtime;
use crate::wire::{BridgeReply, BridgeRequest, RawDiagnostic};

/// Type-check `file` against the project config at `config_path`.
///
/// The compiler resolves whatever `file` imports, but only diagnostics
/// whose origin is `file` itself are returned.
pub async fn check(file: &Path, config_path: &Path, config: &HookConfig) -> Result<ValidationResult> {
    let project = ProjectConfig::load(config_path)?;
    let runtime = runtime::detect_runtime(config.runtime)?;
    let bridge = CompilerBridge::new(runtime, config.timeout());
    check_project(&bridge, file, &project).await
}

pub async fn check_project(
    bridge: &CompilerBridge,
    file: &Path,
    project: &ProjectConfig,
) -> Result<ValidationResult> {
    tracing::debug!(
        "checking {} with {} ({} compiler options{})",
        file.display(),
        project.path.display(),
        project.compiler_options.len(),
        if project.extends.is_some() { ", extends" } else { "" }
    );

    let request = BridgeRequest {
        file: paths::compiler_form(file),
        config_path: paths::compiler_form(&project.path),
        config_dir: paths::compiler_form(&project.dir),
    };

    let diagnostics = match bridge.run(&request).await? {
        BridgeReply::Ok {
            typescript_version,
            diagnostics,
        } => {
            tracing::debug!(
                "typescript {typescript_version} reported {} diagnostics",
                diagnostics.len()
            );
            diagnostics
        }
        BridgeReply::ConfigError { diagnostics } => {
            let messages = diagnostics
                .iter()
                .map(|d| format!("TS{}: {}", d.code, classify::flatten_message(&d.message_text)))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(TsgateError::ConfigRejected {
                path: project.path.clone(),
                messages,
            });
        }
        BridgeReply::SourceMissing => {
            return Err(TsgateError::SourceUnitMissing(file.to_path_buf()));
        }
        BridgeReply::TypescriptMissing { detail } => {
            return Err(TsgateError::TypeScriptMissing {
                dir: project.dir.clone(),
                detail,
            });
        }
    };

    let own = retain_own(diagnostics, &request.file);
    let bytes = std::fs::read(file)?;
    let index = LineIndex::new(&String::from_utf8_lossy(&bytes));
    Ok(classify::classify(own, &index))
}

/// Keep only diagnostics that originate in `target`.
fn retain_own(diagnostics: Vec<RawDiagnostic>, target: &str) -> Vec<RawDiagnostic> {
    let total = diagnostics.len();
    let own: Vec<RawDiagnostic> = diagnostics
        .into_iter()
        .filter(|d| d.file.as_deref() == Some(target))
        .collect();
    if own.len() < total {
        tracing::debug!("discarded {} diagnostics from other files", total - own.len());
    }
    own
}
