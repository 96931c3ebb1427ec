use std::path::{Path, PathBuf};

use crate::paths::CONFIG_FILE;

/// Find the project config that owns `file`.
///
/// Walks upward from the file's directory while still inside
/// `project_root`, returning the first `tsconfig.json` seen. If the walk
/// finds nothing, falls back to `<project_root>/tsconfig.json`. Never
/// returns a config located above the root.
///
/// Both paths are compared component-wise, so callers should pass them in
/// the same form (both canonical, or both lexically absolute).
pub fn find_project_config(file: &Path, project_root: &Path) -> Option<PathBuf> {
    let mut dir = file.parent();
    while let Some(current) = dir {
        if !current.starts_with(project_root) {
            break;
        }
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!("found project config {}", candidate.display());
            return Some(candidate);
        }
        dir = current.parent();
    }

    let fallback = project_root.join(CONFIG_FILE);
    if fallback.is_file() {
        tracing::debug!("falling back to root config {}", fallback.display());
        return Some(fallback);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn nearest_config_wins() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("tsconfig.json"));
        touch(&root.join("packages/web/tsconfig.json"));
        let file = root.join("packages/web/src/deep/a.ts");

        assert_eq!(
            find_project_config(&file, root),
            Some(root.join("packages/web/tsconfig.json"))
        );
    }

    #[test]
    fn config_in_file_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("src/tsconfig.json"));

        assert_eq!(
            find_project_config(&root.join("src/a.ts"), root),
            Some(root.join("src/tsconfig.json"))
        );
    }

    #[test]
    fn falls_back_to_root_config() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("tsconfig.json"));

        assert_eq!(
            find_project_config(&root.join("src/lib/a.ts"), root),
            Some(root.join("tsconfig.json"))
        );
    }

    #[test]
    fn never_searches_above_root() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("tsconfig.json"));
        let root = dir.path().join("app");
        fs::create_dir_all(root.join("src")).unwrap();

        assert_eq!(find_project_config(&root.join("src/a.ts"), &root), None);
    }

    #[test]
    fn file_outside_root_only_sees_root_config() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("app");
        touch(&root.join("tsconfig.json"));
        touch(&dir.path().join("other/tsconfig.json"));

        assert_eq!(
            find_project_config(&dir.path().join("other/a.ts"), &root),
            Some(root.join("tsconfig.json"))
        );
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/tsconfig.json")).unwrap();

        assert_eq!(find_project_config(&root.join("src/a.ts"), root), None);
    }
}
