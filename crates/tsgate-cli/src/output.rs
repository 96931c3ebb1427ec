use std::path::Path;

use serde::Serialize;
use tsgate_core::{Diagnostic, HookRun, Outcome};

/// Machine-readable form of one run, printed on stdout with `--json`.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub file: Option<&'a Path>,
    pub outcome: Outcome,
    pub exit_code: i32,
    pub errors: &'a [Diagnostic],
    pub warnings: &'a [Diagnostic],
}

impl<'a> JsonReport<'a> {
    pub fn new(run: &'a HookRun) -> Self {
        let (errors, warnings) = match &run.result {
            Some(result) => (result.errors.as_slice(), result.warnings.as_slice()),
            None => (&[][..], &[][..]),
        };
        Self {
            file: run.file.as_deref(),
            outcome: run.outcome,
            exit_code: run.outcome.exit_code(),
            errors,
            warnings,
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
