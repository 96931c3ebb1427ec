use serde::Serialize;

use crate::wire::{MessageChain, MessageText, RawCategory, RawDiagnostic};

// ---------------------------------------------------------------------------
// Diagnostic / ValidationResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Error,
    Warning,
}

/// One compiler issue in the target file, free of compiler representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub code: u32,
    pub category: Category,
}

/// Both buckets keep the order the compiler emitted them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LineIndex
// ---------------------------------------------------------------------------

/// Line starts of a source text, in UTF-16 code units (the compiler's
/// offset unit).
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        // The compiler reads files with the BOM already stripped.
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut starts = vec![0];
        let mut offset = 0u32;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            offset += c.len_utf16() as u32;
            match c {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        offset += 1;
                    }
                    starts.push(offset);
                }
                '\n' | '\u{2028}' | '\u{2029}' => starts.push(offset),
                _ => {}
            }
        }
        Self { starts }
    }

    /// 1-based `(line, column)` of a UTF-16 offset.
    pub fn position(&self, offset: u32) -> (u32, u32) {
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        let column = offset - self.starts[line] + 1;
        (line as u32 + 1, column)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Split target-file diagnostics into errors and warnings.
///
/// Warning, suggestion and message categories all land in `warnings`;
/// nothing is dropped.
pub fn classify(raw: Vec<RawDiagnostic>, index: &LineIndex) -> ValidationResult {
    let mut result = ValidationResult::default();
    for diag in raw {
        let (line, column) = diag.start.map_or((1, 1), |start| index.position(start));
        let category = match diag.category {
            RawCategory::Error => Category::Error,
            RawCategory::Warning | RawCategory::Suggestion | RawCategory::Message => {
                Category::Warning
            }
        };
        let diagnostic = Diagnostic {
            line,
            column,
            message: flatten_message(&diag.message_text),
            code: diag.code,
            category,
        };
        match category {
            Category::Error => result.errors.push(diagnostic),
            Category::Warning => result.warnings.push(diagnostic),
        }
    }
    result
}

/// Join a message chain into newline-separated text, indenting each level
/// of elaboration by two spaces.
pub fn flatten_message(text: &MessageText) -> String {
    match text {
        MessageText::Text(s) => s.clone(),
        MessageText::Chain(chain) => {
            let mut out = String::new();
            push_chain(&mut out, chain, 0);
            out
        }
    }
}

fn push_chain(out: &mut String, chain: &MessageChain, depth: usize) {
    if depth > 0 {
        out.push('\n');
        out.push_str(&"  ".repeat(depth));
    }
    out.push_str(&chain.message_text);
    for next in &chain.next {
        push_chain(out, next, depth + 1);
    }
}
