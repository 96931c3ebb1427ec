use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// RuntimeChoice
// ---------------------------------------------------------------------------

/// Which JavaScript runtime hosts the compiler bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeChoice {
    /// First of bun, node, deno found on `PATH`.
    #[default]
    Auto,
    Bun,
    Node,
    Deno,
}

// ---------------------------------------------------------------------------
// HookConfig
// ---------------------------------------------------------------------------

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Process-wide policy, built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    pub block_on_errors: bool,
    pub show_warnings: bool,
    pub debug: bool,
    /// Deadline for the compiler bridge. `0` disables it.
    pub timeout_ms: u64,
    pub project_root: PathBuf,
    pub runtime: RuntimeChoice,
}

impl HookConfig {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            block_on_errors: false,
            show_warnings: true,
            debug: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            project_root,
            runtime: RuntimeChoice::Auto,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_advisory() {
        let config = HookConfig::new(PathBuf::from("/proj"));
        assert!(!config.block_on_errors);
        assert!(config.show_warnings);
        assert!(!config.debug);
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.runtime, RuntimeChoice::Auto);
    }

    #[test]
    fn zero_timeout_disables_deadline() {
        let mut config = HookConfig::new(PathBuf::from("/proj"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        config.timeout_ms = 0;
        assert_eq!(config.timeout(), None);
    }
}
