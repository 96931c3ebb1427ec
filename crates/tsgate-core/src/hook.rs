//! The post-edit pipeline: input → locate → check → report → outcome.
//!
//! Nothing here exits the process; the binary maps the returned
//! [`Outcome`] to an exit code.

use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::classify::ValidationResult;
use crate::config::HookConfig;
use crate::engine;
use crate::error::Result;
use crate::input::HookInvocation;
use crate::locate;
use crate::paths;
use crate::policy::{Outcome, SkipReason, ADVISORY_NOTE};
use crate::report;

/// Everything one invocation produced.
#[derive(Debug, Clone)]
pub struct HookRun {
    pub outcome: Outcome,
    pub file: Option<PathBuf>,
    pub result: Option<ValidationResult>,
}

impl HookRun {
    fn skipped(reason: SkipReason, file: Option<PathBuf>) -> Self {
        match &file {
            Some(f) => tracing::debug!("skipping {}: {}", f.display(), reason.describe()),
            None => tracing::debug!("skipping: {}", reason.describe()),
        }
        Self {
            outcome: Outcome::Skipped(reason),
            file,
            result: None,
        }
    }
}

/// Run the hook, writing the human-readable report to `report_out`.
pub async fn run_hook(
    invocation: Option<HookInvocation>,
    config: &HookConfig,
    report_out: &mut impl Write,
) -> HookRun {
    run_hook_with(invocation, config, report_out, |file, config_path| async move {
        engine::check(&file, &config_path, config).await
    })
    .await
}

pub(crate) async fn run_hook_with<F, Fut>(
    invocation: Option<HookInvocation>,
    config: &HookConfig,
    report_out: &mut impl Write,
    check: F,
) -> HookRun
where
    F: FnOnce(PathBuf, PathBuf) -> Fut,
    Fut: Future<Output = Result<ValidationResult>>,
{
    let Some(invocation) = invocation else {
        return HookRun::skipped(SkipReason::NoInput, None);
    };

    let file = paths::resolve_target(&invocation.file_path, &config.project_root);
    if !paths::is_checkable(&file) {
        return HookRun::skipped(SkipReason::NotCheckable, Some(file));
    }
    if !file.is_file() {
        return HookRun::skipped(SkipReason::FileMissing, Some(file));
    }

    // Compare like with like: symlinked roots (e.g. /tmp on macOS) would
    // otherwise defeat the containment check.
    let root = canonical(&config.project_root);
    let file = canonical(&file);

    let Some(config_path) = locate::find_project_config(&file, &root) else {
        return HookRun::skipped(SkipReason::NoProjectConfig, Some(file));
    };

    let result = match check(file.clone(), config_path).await {
        Ok(result) => result,
        Err(e) => {
            if config.debug {
                tracing::error!("type check of {} failed: {e:?}", file.display());
            } else {
                tracing::error!("type check of {} failed: {e}", file.display());
            }
            return HookRun {
                outcome: Outcome::Fatal,
                file: Some(file),
                result: None,
            };
        }
    };

    let outcome = Outcome::for_result(config, &result);
    let shown = paths::display_relative(&file, &root);
    if let Err(e) = write_report(report_out, &shown, &result, outcome, config) {
        tracing::warn!("could not write report: {e}");
    }

    HookRun {
        outcome,
        file: Some(file),
        result: Some(result),
    }
}

fn write_report(
    out: &mut impl Write,
    shown: &str,
    result: &ValidationResult,
    outcome: Outcome,
    config: &HookConfig,
) -> std::io::Result<()> {
    report::render(out, shown, result, config.show_warnings)?;
    if outcome == Outcome::ErrorsAdvisory {
        writeln!(out, "{ADVISORY_NOTE}")?;
    }
    Ok(())
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
