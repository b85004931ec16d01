//! bbdown CLI - convert BBCode to Markdown.
//!
//! Usage:
//!  bbdown [INPUT] [-o OUTPUT] [--id ID]       - Convert a file, or stdin when INPUT is omitted or "-"
//!  bbdown --list-rules                        - Print the rules in execution order
//!
//! Settings come from the embedded defaults, then `--config <PATH>`, then
//! any `--set key=value` overrides (e.g. `--set markdown.fence=~~~`).

mod settings;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use bbdown::{BBCodeConverter, ConverterOptions};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use settings::Loader;

/// Convert BBCode formatted text to Markdown.
#[derive(Parser)]
#[command(name = "bbdown", version, about)]
struct Cli {
    /// Input file; reads stdin when omitted or "-"
    #[arg(value_hint = clap::ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Write the Markdown to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Identifier reported in error messages (defaults to the input path)
    #[arg(long)]
    id: Option<String>,

    /// Path to a bbdown.toml configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override a configuration key, e.g. markdown.fence=~~~
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// List the conversion rules in execution order
    #[arg(long)]
    list_rules: bool,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, otherwise --verbose picks the level, defaulting to WARN
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = load_options(cli.config.as_deref(), &cli.overrides)?;
    let converter = BBCodeConverter::with_options(options);

    if cli.list_rules {
        let mut stdout = io::stdout().lock();
        for name in converter.rule_names() {
            writeln!(stdout, "{name}")?;
        }
        return Ok(());
    }

    let input = cli.input.filter(|path| path.as_os_str() != "-");
    let text = read_input(input.as_deref())?;
    let id = cli
        .id
        .or_else(|| input.as_ref().map(|path| path.display().to_string()));

    tracing::info!(id = id.as_deref().unwrap_or(bbdown::UNKNOWN_ID), "converting");
    let markdown = converter.to_markdown(Some(&text), id.as_deref())?;

    match cli.output {
        Some(path) => fs::write(&path, markdown)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout().lock().write_all(markdown.as_bytes())?,
    }

    Ok(())
}

fn load_options(config: Option<&Path>, overrides: &[String]) -> anyhow::Result<ConverterOptions> {
    let mut loader = Loader::new();

    if let Some(path) = config {
        loader = loader.with_file(path);
    }

    for entry in overrides {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("invalid --set value '{entry}', expected KEY=VALUE");
        };
        loader = loader.set_override(key.trim(), value)?;
    }

    let config = loader.build().context("failed to load configuration")?;
    Ok(config.markdown.into())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
