//! `tsgate-core` — single-file TypeScript diagnostics for post-edit hooks.
//!
//! # Architecture
//!
//! ```text
//! stdin JSON ──► input::read_invocation ──► HookInvocation
//!                                               │
//!                 locate::find_project_config ◄─┘   nearest tsconfig.json, never above root
//!                               │
//!                 engine::check ──► bridge (bun/node/deno + TypeScript API)
//!                               │      one-root program, target file's diagnostics only
//!                 classify      ──► ValidationResult { errors, warnings }
//!                               │
//!                 report::render ──► stderr
//!                               │
//!                 policy::Outcome ──► exit code 0 / 1 / 2
//! ```
//!
//! [`hook::run_hook`] wires the stages together.

pub mod bridge;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod hook;
pub mod input;
pub mod locate;
pub mod paths;
pub mod policy;
pub mod project;
pub mod report;
pub mod runtime;
pub mod wire;

pub use classify::{Category, Diagnostic, ValidationResult};
pub use config::{HookConfig, RuntimeChoice};
pub use error::{Result, TsgateError};
pub use hook::{run_hook, HookRun};
pub use policy::{Outcome, SkipReason};
