mod output;
mod root;

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use anyhow::Context;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use tsgate_core::config::DEFAULT_TIMEOUT_MS;
use tsgate_core::input::{self, HookInvocation};
use tsgate_core::{HookConfig, Outcome, RuntimeChoice};

#[derive(Parser)]
#[command(
    name = "tsgate",
    about = "Type-check the single TypeScript file an edit hook reports, using the project's tsconfig",
    version
)]
struct Cli {
    /// Check this file instead of reading a hook payload from stdin
    #[arg(long)]
    file: Option<PathBuf>,

    /// Project root bounding the tsconfig search (default: current directory)
    #[arg(long, env = "CLAUDE_PROJECT_DIR")]
    project_root: Option<PathBuf>,

    /// Exit 2 when type errors are found instead of only reporting them
    #[arg(
        long,
        env = "TSGATE_BLOCK_ON_ERRORS",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    block_on_errors: bool,

    /// Include warnings and suggestions in the report
    #[arg(
        long,
        env = "TSGATE_SHOW_WARNINGS",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "true",
        default_missing_value = "true"
    )]
    show_warnings: bool,

    /// Verbose logging of tsgate's own operation
    #[arg(
        long,
        env = "TSGATE_DEBUG",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    debug: bool,

    /// Deadline for the type check in milliseconds (0 = none)
    #[arg(long, env = "TSGATE_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// JavaScript runtime hosting the TypeScript compiler
    #[arg(long, env = "TSGATE_RUNTIME", value_enum, default_value_t = RuntimeArg::Auto)]
    runtime: RuntimeArg,

    /// Also print the result as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum RuntimeArg {
    Auto,
    Bun,
    Node,
    Deno,
}

impl Cli {
    fn hook_config(&self) -> HookConfig {
        HookConfig {
            block_on_errors: self.block_on_errors,
            show_warnings: self.show_warnings,
            debug: self.debug,
            timeout_ms: self.timeout_ms,
            project_root: root::resolve_root(self.project_root.as_deref()),
            runtime: match self.runtime {
                RuntimeArg::Auto => RuntimeChoice::Auto,
                RuntimeArg::Bun => RuntimeChoice::Bun,
                RuntimeArg::Node => RuntimeChoice::Node,
                RuntimeArg::Deno => RuntimeChoice::Deno,
            },
        }
    }
}

fn main() {
    // clap exits with 2 on usage errors, which the host reads as "blocked".
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    let default_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = cli.hook_config();
    tracing::debug!("{config:?}");

    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| execute(&cli, &config))) {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            if config.debug {
                tracing::error!("{e:?}");
            } else {
                // Print the full error chain (anyhow's alternate Display)
                tracing::error!("{e:#}");
            }
            Outcome::Fatal
        }
        Err(_) => {
            tracing::error!("tsgate panicked; treating as infrastructure failure");
            Outcome::Fatal
        }
    };

    std::process::exit(outcome.exit_code());
}

fn execute(cli: &Cli, config: &HookConfig) -> anyhow::Result<Outcome> {
    let invocation = match &cli.file {
        Some(path) => Some(HookInvocation {
            file_path: path.clone(),
        }),
        None => input::read_invocation(std::io::stdin().lock()),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let mut stderr = std::io::stderr();
    let run = runtime.block_on(tsgate_core::run_hook(invocation, config, &mut stderr));

    if cli.json {
        output::print_json(&output::JsonReport::new(&run)).context("failed to print JSON")?;
    }
    Ok(run.outcome)
}
