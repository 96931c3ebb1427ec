use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--project-root` flag / `CLAUDE_PROJECT_DIR` env var (passed in as `explicit`),
///    made absolute against `cwd` when relative
/// 2. `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match explicit {
        Some(p) if p.as_os_str().is_empty() => cwd,
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd,
    }
}
