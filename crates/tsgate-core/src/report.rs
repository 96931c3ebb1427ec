use std::io::{self, Write};

use crate::classify::{Diagnostic, ValidationResult};

pub const BANNER: &str = "─── TypeScript check ───";

/// Render `result` for the operator. Layout is fixed:
///
/// ```text
/// ─── TypeScript check ───
/// File: src/a.ts
/// Errors (1):
///   1:7  TS2322  Type 'string' is not assignable to type 'number'.
/// Warnings (1):
///   3:7  TS6133  'y' is declared but its value is never read.
/// ```
pub fn render(
    out: &mut impl Write,
    file: &str,
    result: &ValidationResult,
    show_warnings: bool,
) -> io::Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "File: {file}")?;

    let warnings_visible = show_warnings && !result.warnings.is_empty();
    if result.errors.is_empty() && !warnings_visible {
        if result.warnings.is_empty() {
            writeln!(out, "✓ No errors or warnings")?;
        } else {
            writeln!(out, "✓ No errors ({} warnings hidden)", result.warnings.len())?;
        }
        return Ok(());
    }

    writeln!(out, "Errors ({}):", result.errors.len())?;
    for diag in &result.errors {
        render_line(out, diag)?;
    }

    if warnings_visible {
        writeln!(out, "Warnings ({}):", result.warnings.len())?;
        for diag in &result.warnings {
            render_line(out, diag)?;
        }
    }
    Ok(())
}

fn render_line(out: &mut impl Write, diag: &Diagnostic) -> io::Result<()> {
    let mut lines = diag.message.lines();
    let first = lines.next().unwrap_or_default();
    writeln!(
        out,
        "  {}:{}  TS{}  {}",
        diag.line, diag.column, diag.code, first
    )?;
    // Continuation lines of chained messages keep their own indentation.
    for rest in lines {
        writeln!(out, "      {rest}")?;
    }
    Ok(())
}
