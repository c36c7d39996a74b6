//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tokenlint",
    version,
    about = "Design-token governance: lint and migrate stylesheets",
    long_about = "Tokenlint — find hardcoded design values and legacy token usage in stylesheets, and rewrite legacy usage to the current token system.\n\nConfiguration precedence: CLI > tokenlint.toml > defaults.",
    after_help = "Examples:\n  tokenlint lint\n  tokenlint lint --root packages/ui/src --output json\n  tokenlint fix --check --diff\n  tokenlint rules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, short, global = true, action = clap::ArgAction::SetTrue, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current tokenlint version.")]
    Version,
    /// Lint stylesheets against token-usage rules
    #[command(
        about = "Run lint checks",
        long_about = "Scan stylesheets under the target roots and report every token-usage violation. Exits 1 when any violation is found.",
        after_help = "Examples:\n  tokenlint lint\n  tokenlint lint --root apps/web/src --output json"
    )]
    Lint {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long = "root", help = "Target root relative to the repository root (repeatable)")]
        roots: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Rewrite legacy token usage in place
    #[command(
        about = "Apply the token migration codemod",
        long_about = "Rewrite legacy token names, spacing literals and raw z-index values to current tokens. When --check or --diff is set, nothing is written.",
        after_help = "Examples:\n  tokenlint fix\n  tokenlint fix --check\n  tokenlint fix --diff"
    )]
    Fix {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long = "root", help = "Target root relative to the repository root (repeatable)")]
        roots: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur (implies no writes)")]
        check: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show changed lines (implies no writes)")]
        diff: bool,
    },
    /// List lint rules
    #[command(
        about = "List lint rules",
        long_about = "Print every active lint rule with its description and fix hint."
    )]
    Rules {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
