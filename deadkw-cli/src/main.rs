//! deadkw CLI - unused keyword and variable detector for keyword-driven
//! test suites.
//!
//! Scans a directory tree for test-definition files, collects the keywords
//! and variables they declare, and lists the ones no body line ever uses.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use deadkw_core::{
    init_structured_logging, load_config, log_error, log_info, print_json, print_plain, Deadkw,
    DeadkwConfig, OutputFormat, CONFIG_FILE, DEFAULT_FILE_TYPES,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Lists unused keywords and variables in the specified directory"
)]
pub struct Cli {
    /// The root directory to search. Defaults to the current directory.
    #[arg(long, default_value = "./")]
    directory: String,

    /// File name suffixes to scan. Defaults to .txt and .robot.
    #[arg(long, num_args = 1..)]
    file_types: Vec<String>,

    /// Directory names to skip while scanning
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Do not count indented `#` comment lines as usages
    #[arg(long)]
    skip_commented_usages: bool,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,
}

/// Effective settings after merging CLI flags over deadkw.toml.
#[derive(Debug, PartialEq, Eq)]
struct Settings {
    file_types: Vec<String>,
    exclude: Vec<String>,
    skip_commented_usages: bool,
    format: OutputFormat,
}

/// CLI flags win over the config file, which wins over built-in defaults.
fn resolve_settings(cli: &Cli, config: Option<DeadkwConfig>) -> Result<Settings> {
    let config = config.unwrap_or_default();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output_format()?.unwrap_or_default()
    };

    let file_types = if !cli.file_types.is_empty() {
        cli.file_types.clone()
    } else if let Some(types) = config.file_types {
        types
    } else {
        DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect()
    };

    let exclude = if !cli.exclude.is_empty() {
        cli.exclude.clone()
    } else {
        config.exclude.unwrap_or_default()
    };

    Ok(Settings {
        file_types,
        exclude,
        skip_commented_usages: cli.skip_commented_usages
            || config.skip_commented_usages.unwrap_or(false),
        format,
    })
}

fn main() -> Result<()> {
    // Initialize structured logging (JSON to stderr, respects RUST_LOG)
    init_structured_logging();

    let cli = Cli::parse();
    run(&cli).inspect_err(|e| log_error(&format!("{:#}", e)))
}

fn run(cli: &Cli) -> Result<()> {
    let root = Path::new(&cli.directory);

    let config = load_config(root)
        .with_context(|| format!("Failed to load config from: {}", cli.directory))?;
    if config.is_some() {
        log_info(&format!("using {}", root.join(CONFIG_FILE).display()));
    }
    let settings = resolve_settings(cli, config)?;

    let result = Deadkw::new(root)
        .file_types(settings.file_types)
        .exclude_dirs(settings.exclude)
        .skip_commented_usages(settings.skip_commented_usages)
        .analyze()
        .with_context(|| format!("Failed to analyze: {}", cli.directory))?;

    match settings.format {
        OutputFormat::Plain => print_plain(&result.unused),
        OutputFormat::Json => print_json(&result.unused),
    }

    Ok(())
}
