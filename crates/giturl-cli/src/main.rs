//! giturl - git repository url normalizer
//!
//! Usage:
//!   giturl parse <url>              # Show the parsed fields
//!   giturl normalize <url>...       # Print canonical urls
//!   giturl remote [--dir <path>]    # Canonical url of the default remote
//!   giturl config [--strict]        # List git configuration

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use giturl_core::settings::Settings;
use giturl_core::url::{GitUrl, GrammarKind, ParsedUrl, classify, normalize};

#[derive(Parser)]
#[command(name = "giturl")]
#[command(about = "Parse and normalize git repository urls", long_about = None)]
struct Cli {
    /// Settings file (defaults to <config dir>/giturl/giturl.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a url is decomposed
    Parse {
        url: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the canonical form of one or more urls
    ///
    /// Exits non-zero if any url cannot be parsed; the others are still printed.
    Normalize {
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the canonical url of the repository's default remote
    Remote {
        /// Repository working tree (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List git configuration
    Config {
        /// Fail if git cannot be run instead of printing nothing
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "giturl_core=debug,giturl=debug,info"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Parse { url, format } => {
            let (kind, parsed) = classify(&url)?;
            match format {
                OutputFormat::Table => print_parsed_table(kind, &parsed),
                OutputFormat::Json => print_parsed_json(kind, &parsed)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Normalize { urls, format } => run_normalize(&urls, format),
        Commands::Remote { dir, format } => {
            let settings = load_settings(cli.config)?;
            run_remote(&settings, dir, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { strict } => {
            let settings = load_settings(cli.config)?;
            run_config(&settings, strict)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(&path),
        None => Settings::load_default(),
    }
}

fn run_normalize(urls: &[String], format: OutputFormat) -> Result<ExitCode> {
    let mut failed = false;
    let mut entries = Vec::new();

    for input in urls {
        match normalize(input) {
            Ok(url) => entries.push((input.as_str(), Some(url), None)),
            Err(err) => {
                failed = true;
                tracing::debug!(error = %err, "normalize failed");
                entries.push((input.as_str(), None, Some(err.to_string())));
            }
        }
    }

    match format {
        OutputFormat::Table => {
            for (input, url, error) in &entries {
                match (url, error) {
                    (Some(url), _) => print_git_url(url),
                    (None, Some(error)) => eprintln!("{}: {}", input, error),
                    (None, None) => {}
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = entries
                .iter()
                .map(|(input, url, error)| {
                    serde_json::json!({
                        "input": input,
                        "url": url.as_ref().map(|u| &u.url),
                        "revision": url.as_ref().and_then(|u| u.revision.as_ref()),
                        "error": error,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "schema_version": 1,
                "results": output,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_remote(settings: &Settings, dir: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let git = settings.git(Some(dir.clone()));
    let url = git
        .normalized_remote_url(None)
        .with_context(|| format!("Failed to read remote url of {}", dir.display()))?;
    let cache_dir = url.cache_dir(&settings.state_dir()?);

    match format {
        OutputFormat::Table => {
            print_git_url(&url);
            println!("Cache: {}", cache_dir.display());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "schema_version": 1,
                "url": url.url,
                "revision": url.revision,
                "cache_dir": cache_dir,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_config(settings: &Settings, strict: bool) -> Result<()> {
    let git = settings.git(None);
    let config = git
        .read_config(strict || settings.require_git)
        .context("Failed to read git configuration")?;
    for (key, value) in config.iter() {
        println!("{}={}", key, value);
    }
    Ok(())
}

fn print_git_url(url: &GitUrl) {
    match &url.revision {
        Some(rev) => println!("{}  (revision: {})", url.url, rev),
        None => println!("{}", url.url),
    }
}

fn print_parsed_table(kind: GrammarKind, parsed: &ParsedUrl) {
    let rows = [
        ("protocol", &parsed.protocol),
        ("user", &parsed.user),
        ("resource", &parsed.resource),
        ("port", &parsed.port),
        ("pathname", &parsed.pathname),
        ("name", &parsed.name),
        ("rev", &parsed.rev),
    ];
    println!("{:<10} {}", "grammar", kind);
    for (label, value) in rows {
        println!("{:<10} {}", label, value.as_deref().unwrap_or("-"));
    }
    println!("{:<10} {}", "format", parsed.format());
}

fn print_parsed_json(kind: GrammarKind, parsed: &ParsedUrl) -> Result<()> {
    let output = serde_json::json!({
        "schema_version": 1,
        "grammar": kind,
        "parsed": parsed,
        "format": parsed.format(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
