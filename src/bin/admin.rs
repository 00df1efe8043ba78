//! CLI administration tool for pxy-redirect.
//!
//! Resolves paths and inspects version rule tables offline, using the same
//! resolver the server runs.
//!
//! # Usage
//!
//! ```bash
//! # Show where short links would redirect
//! cargo run --bin admin -- resolve /13/wall /17/some-flag
//!
//! # Print the effective version rule table
//! cargo run --bin admin -- rules
//!
//! # Validate a rule file before deploying it
//! cargo run --bin admin -- check rules.toml
//! ```
//!
//! # Environment Variables
//!
//! - `VERSION_RULES_FILE` (optional): rule table used when `--rules`/`--file` is omitted
//! - `PUBLIC_SCHEME`, `PUBLIC_HOST` (optional): address echoed in error pages

use pxy_redirect::config::Config;
use pxy_redirect::domain::{PathResolver, Resolution, VersionRules};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

/// CLI tool for inspecting pxy-redirect resolution.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more request paths
    Resolve {
        /// Request paths, e.g. /13/wall
        #[arg(required = true)]
        paths: Vec<String>,

        /// Version rule file (defaults to VERSION_RULES_FILE, then built-in)
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Print the effective version rule table
    Rules {
        /// Version rule file (defaults to VERSION_RULES_FILE, then built-in)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Validate a version rule file
    Check {
        /// Rule file to validate
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Resolve { paths, rules } => {
            let rules = load_rules(&config, rules)?;
            resolve_paths(&config, rules, &paths)?;
        }
        Commands::Rules { file } => {
            let rules = load_rules(&config, file)?;
            print_rules(&rules);
        }
        Commands::Check { file } => check_rules(&file)?,
    }

    Ok(())
}

/// Loads the rule table from an explicit file, the environment, or the built-in set.
fn load_rules(config: &Config, file: Option<PathBuf>) -> Result<VersionRules> {
    match file {
        Some(path) => VersionRules::from_file(&path)
            .with_context(|| format!("Failed to load rule file {}", path.display())),
        None => config.version_rules(),
    }
}

/// Resolves each path and prints its redirect target or rejection.
///
/// # Output Format
///
/// ```text
/// /13/wall -> https://releases.llvm.org/13.0.0/tools/clang/docs/DiagnosticsReference.html#wall
/// /x/wall  !! invalid_version (400)
/// ```
///
/// Fails after printing every path if any of them was rejected.
fn resolve_paths(config: &Config, rules: VersionRules, paths: &[String]) -> Result<()> {
    let resolver = PathResolver::new(rules, config.public_base()?);
    let width = paths.iter().map(String::len).max().unwrap_or(0);

    let mut rejected = 0;
    for path in paths {
        match resolver.resolve(path) {
            Ok(Resolution::Redirect(target)) => {
                println!("{:<width$} {} {}", path.cyan(), "->".green(), target);
            }
            Ok(Resolution::Home) => {
                println!("{:<width$} {} home page", path.cyan(), "==".bright_blue());
            }
            Err(e) => {
                rejected += 1;
                println!(
                    "{:<width$} {} {} ({})",
                    path.cyan(),
                    "!!".red().bold(),
                    e.kind().code().red(),
                    e.http_status()
                );
            }
        }
    }

    if rejected > 0 {
        anyhow::bail!("{rejected} of {} paths rejected", paths.len());
    }

    Ok(())
}

/// Prints the rule table in match order.
///
/// # Output Format
///
/// ```text
/// Version rules (first match wins)
///
///   #   Major        Minor  Patch
///   1   == 17        0      1
///   2   >= 18        1      0
///   *   otherwise    0      0
/// ```
fn print_rules(rules: &VersionRules) {
    println!("{}", "Version rules (first match wins)".bright_blue().bold());
    println!();
    println!(
        "  {:<4}{:<13}{:<7}{}",
        "#".bright_white().bold(),
        "Major".bright_white().bold(),
        "Minor".bright_white().bold(),
        "Patch".bright_white().bold()
    );

    for (i, rule) in rules.rules().iter().enumerate() {
        println!(
            "  {:<4}{:<13}{:<7}{}",
            i + 1,
            rule.when.to_string().cyan(),
            rule.minor,
            rule.patch
        );
    }

    println!(
        "  {:<4}{:<13}{:<7}{}",
        "*",
        "otherwise".dimmed(),
        0,
        0
    );
}

/// Validates a rule file and prints its table.
fn check_rules(path: &Path) -> Result<()> {
    match VersionRules::from_file(path) {
        Ok(rules) => {
            println!(
                "{} {} ({} rules)",
                "OK".green().bold(),
                path.display(),
                rules.len()
            );
            println!();
            print_rules(&rules);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "INVALID".red().bold(), path.display());
            println!("  {}", e.to_string().red());
            anyhow::bail!("Rule file {} is invalid", path.display())
        }
    }
}
