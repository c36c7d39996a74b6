//! Tokenlint CLI binary entry point.
//! Delegates to library modules for lint/fix and prints results.

use clap::Parser;
use tokenlint::checks::RuleSet;
use tokenlint::cli::{Cli, Commands};
use tokenlint::config::{self, Effective};
use tokenlint::legacy::LegacyDefinitions;
use tokenlint::{fix, lint, output, utils};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tokenlint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .with_target(false)
        .without_time()
        .init();
}

/// Print `err` with the error prefix and exit with status 2.
fn fatal(err: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", utils::error_prefix(), err);
    std::process::exit(2);
}

fn resolve(
    repo_root: Option<&str>,
    roots: &[String],
    output: Option<&str>,
    check: Option<bool>,
    diff: Option<bool>,
) -> Effective {
    let eff = config::resolve_effective(repo_root, roots, output, check, diff)
        .unwrap_or_else(|e| fatal(e));
    // Friendly note if no tokenlint config was found
    if eff.config_path.is_none() && eff.output != "json" {
        eprintln!(
            "{} No tokenlint.toml found; using defaults.",
            utils::note_prefix()
        );
    }
    eff
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            repo_root,
            roots,
            output,
        } => {
            let eff = resolve(repo_root.as_deref(), &roots, output.as_deref(), None, None);
            if eff.output != "json" {
                eprintln!(
                    "{} Scanning {} root(s) for .{} files",
                    utils::info_prefix(),
                    eff.roots.len(),
                    eff.extensions.join("/.")
                );
            }
            let result = lint::run_lint(&eff).unwrap_or_else(|e| fatal(e));
            output::print_lint(&result, &eff.output);
            std::process::exit(result.exit_code());
        }
        Commands::Fix {
            repo_root,
            roots,
            output,
            check,
            diff,
        } => {
            let eff = resolve(
                repo_root.as_deref(),
                &roots,
                output.as_deref(),
                if check { Some(true) } else { None },
                if diff { Some(true) } else { None },
            );
            // Check and diff are previews: nothing is written
            let write = !(eff.check || eff.diff);
            output::print_fix_banner(&eff.output, write);
            let report = fix::run_fix(&eff, write).unwrap_or_else(|e| fatal(e));
            output::print_fix(&report, &eff.output, write, eff.diff);
            std::process::exit(report.exit_code(eff.check));
        }
        Commands::Rules { repo_root, output } => {
            let eff = resolve(repo_root.as_deref(), &[], output.as_deref(), None, None);
            let legacy = LegacyDefinitions::load(&eff.legacy);
            let rules = RuleSet::new(legacy, &eff.disabled_rules).unwrap_or_else(|e| fatal(e));
            output::print_rules(&rules, &eff.output);
        }
    }
}
