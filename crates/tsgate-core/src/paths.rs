use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "tsconfig.json";

/// Extensions the compiler bridge is asked to check. Declaration files
/// (`.d.ts`, `.d.mts`, `.d.cts`) are covered by their last extension.
pub const CHECKABLE_EXTENSIONS: [&str; 4] = ["ts", "tsx", "mts", "cts"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn is_checkable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CHECKABLE_EXTENSIONS.contains(&ext))
}

/// Anchor a hook path to the project root when the host sent a relative one.
pub fn resolve_target(file: &Path, project_root: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        project_root.join(file)
    }
}

/// Render `path` relative to `root` when it lives inside it.
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map(|rel| rel.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

/// Comparable form of a path as the compiler spells it (forward slashes).
pub fn compiler_form(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
