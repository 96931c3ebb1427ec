use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Result, TsgateError};

/// A located `tsconfig.json`, read fresh on every invocation.
///
/// The compiler resolves the effective options itself; this parse only
/// rejects unreadable files before a runtime is spawned, and feeds the
/// debug log.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub path: PathBuf,
    /// Directory that relative paths inside the config resolve against.
    pub dir: PathBuf,
    /// Raw `compilerOptions` as written in this file (before `extends`).
    pub compiler_options: Map<String, Value>,
    pub extends: Option<Value>,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| TsgateError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let stripped = strip_jsonc(text);
        // The compiler reads a blank config as `{}`.
        let value: Value = if stripped.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(&stripped).map_err(|source| TsgateError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?
        };
        let Value::Object(mut root) = value else {
            return Err(TsgateError::ConfigNotObject {
                path: path.to_path_buf(),
            });
        };

        let compiler_options = match root.remove("compilerOptions") {
            Some(Value::Object(options)) => options,
            _ => Map::new(),
        };

        Ok(Self {
            path: path.to_path_buf(),
            dir: path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            compiler_options,
            extends: root.remove("extends"),
        })
    }
}

/// Reduce JSON-with-comments (the tsconfig dialect) to strict JSON.
///
/// Comments become whitespace (newlines are kept so parse errors still
/// point at the right line) and trailing commas before `}` / `]` are dropped.
pub fn strip_jsonc(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let chars: Vec<char> = text.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match (c, chars.get(i + 1)) {
            ('"', _) => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    out.push(' ');
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                out.extend([' ', ' ']);
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    out.push(if chars[i] == '\n' { '\n' } else { ' ' });
                    i += 1;
                }
                // Closing `*/`, if the comment was terminated.
                let remaining = (chars.len() - i).min(2);
                out.extend(std::iter::repeat(' ').take(remaining));
                i += remaining;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    drop_trailing_commas(&mut out);
    out.into_iter().collect()
}

fn drop_trailing_commas(chars: &mut [char]) {
    let mut in_string = false;
    let mut escaped = false;
    for i in 0..chars.len() {
        let c = chars[i];
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if matches!(next, Some('}') | Some(']')) {
                    chars[i] = ' ';
                }
            }
            _ => {}
        }
    }
}
