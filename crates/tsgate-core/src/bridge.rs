use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Result, TsgateError};
use crate::runtime::{self, Runtime};
use crate::wire::{BridgeReply, BridgeRequest};

/// Script run under the JavaScript runtime. It owns every call into the
/// TypeScript compiler API.
pub const BRIDGE_SCRIPT: &str = include_str!("bridge/check.mjs");

// ─── CompilerBridge ───────────────────────────────────────────────────────

/// One-shot driver for the bridge script: write a request on stdin, read a
/// single JSON reply from stdout, kill the child if the deadline passes.
pub struct CompilerBridge {
    launch: Launch,
    timeout: Option<Duration>,
}

enum Launch {
    Runtime(Runtime),
    /// Arbitrary command standing in for the runtime. Used in unit tests to
    /// inject a process that emits a fixed reply.
    #[cfg(test)]
    Fixed { program: String, args: Vec<String> },
}

impl CompilerBridge {
    pub fn new(runtime: Runtime, timeout: Option<Duration>) -> Self {
        Self {
            launch: Launch::Runtime(runtime),
            timeout,
        }
    }

    #[cfg(test)]
    pub(crate) fn fixed(program: &str, args: &[&str], timeout: Option<Duration>) -> Self {
        Self {
            launch: Launch::Fixed {
                program: program.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
            },
            timeout,
        }
    }

    pub async fn run(&self, request: &BridgeRequest) -> Result<BridgeReply> {
        match &self.launch {
            Launch::Runtime(runtime) => {
                let script = materialize_script()?;
                tracing::debug!(
                    "running compiler bridge under {} ({})",
                    runtime.name(),
                    script.path().display()
                );
                let cmd = runtime::build_command(*runtime, script.path());
                // `script` must outlive the child.
                exchange(cmd, request, self.timeout).await
            }
            #[cfg(test)]
            Launch::Fixed { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                exchange(cmd, request, self.timeout).await
            }
        }
    }
}

fn materialize_script() -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("tsgate-bridge-")
        .suffix(".mjs")
        .tempfile()?;
    file.write_all(BRIDGE_SCRIPT.as_bytes())?;
    file.flush()?;
    Ok(file)
}

async fn exchange(
    mut cmd: Command,
    request: &BridgeRequest,
    timeout: Option<Duration>,
) -> Result<BridgeReply> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let payload = serde_json::to_vec(request)?;

    let conversation = async move {
        let mut child = cmd
            .spawn()
            .map_err(|e| TsgateError::BridgeFailed(format!("failed to spawn: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await?;
        }

        Ok::<_, TsgateError>(child.wait_with_output().await?)
    };

    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, conversation)
            .await
            .map_err(|_| TsgateError::Timeout(limit.as_millis() as u64))??,
        None => conversation.await?,
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        tracing::debug!("compiler bridge stderr:\n{}", stderr.trim_end());
    }

    // The reply is the last non-empty stdout line; runtimes may print
    // banners ahead of it.
    let Some(line) = stdout.lines().rev().map(str::trim).find(|l| !l.is_empty()) else {
        let status = match output.status.code() {
            Some(code) => format!("exited with code {code}"),
            None => "terminated by signal".to_string(),
        };
        let detail = if stderr.trim().is_empty() {
            status
        } else {
            format!("{status}\nstderr: {}", stderr.trim_end())
        };
        return Err(TsgateError::BridgeFailed(detail));
    };

    serde_json::from_str(line).map_err(|source| TsgateError::BridgeProtocol {
        reply: line.chars().take(500).collect(),
        source,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn request() -> BridgeRequest {
        BridgeRequest {
            file: "/p/a.ts".into(),
            config_path: "/p/tsconfig.json".into(),
            config_dir: "/p".into(),
        }
    }

    #[test]
    fn script_speaks_the_reply_protocol() {
        for status in ["\"ok\"", "\"configError\"", "\"sourceMissing\"", "\"typescriptMissing\""] {
            assert!(BRIDGE_SCRIPT.contains(status), "missing status {status}");
        }
    }

    #[tokio::test]
    async fn reads_reply_from_stdout() {
        let bridge = CompilerBridge::fixed(
            "sh",
            &[
                "-c",
                r#"cat >/dev/null; echo 'banner'; echo '{"status":"ok","typescriptVersion":"5.6.3","diagnostics":[]}'"#,
            ],
            Some(Duration::from_secs(5)),
        );
        let reply = bridge.run(&request()).await.unwrap();
        let BridgeReply::Ok {
            typescript_version,
            diagnostics,
        } = reply
        else {
            panic!("expected Ok")
        };
        assert_eq!(typescript_version, "5.6.3");
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn request_is_written_to_stdin() {
        // Echo the request's file back as the reply detail.
        let bridge = CompilerBridge::fixed(
            "sh",
            &[
                "-c",
                r#"read -r line; printf '{"status":"typescriptMissing","detail":%s}\n' "$(printf '%s' "$line" | sed 's/.*"file":\("[^"]*"\).*/\1/')""#,
            ],
            None,
        );
        let reply = bridge.run(&request()).await.unwrap();
        let BridgeReply::TypescriptMissing { detail } = reply else {
            panic!("expected TypescriptMissing")
        };
        assert_eq!(detail, "/p/a.ts");
    }

    #[tokio::test]
    async fn silent_failure_reports_stderr() {
        let bridge = CompilerBridge::fixed("sh", &["-c", "cat >/dev/null; echo boom >&2; exit 3"], None);
        let err = bridge.run(&request()).await.unwrap_err();
        let TsgateError::BridgeFailed(detail) = &err else {
            panic!("expected BridgeFailed, got {err:?}")
        };
        assert!(detail.contains("code 3"));
        assert!(detail.contains("boom"));
    }

    #[tokio::test]
    async fn garbage_reply_is_a_protocol_error() {
        let bridge = CompilerBridge::fixed("sh", &["-c", "cat >/dev/null; echo '{\"status\":\"nope\"}'"], None);
        let err = bridge.run(&request()).await.unwrap_err();
        assert!(matches!(err, TsgateError::BridgeProtocol { .. }));
    }

    #[tokio::test]
    async fn deadline_kills_slow_bridge() {
        let bridge = CompilerBridge::fixed("sh", &["-c", "sleep 5"], Some(Duration::from_millis(100)));
        let err = bridge.run(&request()).await.unwrap_err();
        assert!(matches!(err, TsgateError::Timeout(100)));
    }

    #[tokio::test]
    async fn missing_program_is_a_bridge_failure() {
        let bridge = CompilerBridge::fixed("tsgate-no-such-binary", &[], None);
        let err = bridge.run(&request()).await.unwrap_err();
        assert!(matches!(err, TsgateError::BridgeFailed(_)));
    }
}
