//! Tokenlint core library.
//!
//! This crate exposes programmatic APIs for governing design-token usage in
//! stylesheets: a line-oriented linter and a codemod that migrates legacy
//! token usage.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `walk`: Deterministic recursive file discovery.
//! - `exclusion`: Path exclusions, token-definition detection, comment tracking.
//! - `legacy`: Registry of retired class, variable, mixin and custom property names.
//! - `checks`: The lint rules and the `RuleSet` that evaluates them.
//! - `lint`: Lint runner producing a `LintResult`.
//! - `mapping`: Ordered rewrite table for the codemod.
//! - `fix`: Codemod runner with atomic writes.
//! - `models`: Result structs shared by runners and printers.
//! - `output`: Human/JSON printers for lint/fix/rules.
//! - `error`: Crate error type.
//! - `utils`: Supporting helpers.
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod fix;
pub mod legacy;
pub mod lint;
pub mod mapping;
pub mod models;
pub mod output;
pub mod utils;
pub mod walk;
