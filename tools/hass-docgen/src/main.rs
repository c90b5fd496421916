// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! hass-docgen CLI
//!
//! # Usage
//!
//! ```bash
//! # Print the guide to stdout
//! hass-docgen generate --catalog devices.yaml --mapping mapping.yaml
//!
//! # Write it next to the rest of the docs
//! hass-docgen generate --catalog devices.yaml --mapping mapping.yaml \
//!     -o docs/integration/home_assistant.md
//!
//! # Fail when the committed page is stale
//! hass-docgen check --catalog devices.yaml --mapping mapping.yaml \
//!     --current docs/integration/home_assistant.md
//! ```

use anyhow::{bail, Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use hass_docgen::{catalog, DocgenConfig, DocumentAssembler, EmptyBlockPolicy, Template};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "hass-docgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate the Home Assistant integration guide from the device catalog")]
struct Cli {
    /// Log level; RUST_LOG takes precedence
    #[arg(
        long,
        global = true,
        default_value = "info",
        value_parser = PossibleValuesParser::new(["trace", "debug", "info", "warn", "error"])
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the guide
    Generate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output Markdown file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Regenerate and compare with an existing guide
    Check {
        #[command(flatten)]
        inputs: InputArgs,

        /// Committed guide to compare against
        #[arg(long, value_name = "FILE")]
        current: PathBuf,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Device catalog (YAML sequence of {model, type})
    #[arg(long, value_name = "FILE")]
    catalog: PathBuf,

    /// Discovery mapping table (YAML mapping model -> entries)
    #[arg(long, value_name = "FILE")]
    mapping: PathBuf,

    /// Template file (bundled guide if omitted)
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Generator configuration (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output for devices without discovery entries
    #[arg(long, value_enum)]
    empty_blocks: Option<EmptyBlocksArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmptyBlocksArg {
    OpenUndefined,
    AlwaysClose,
    SkipEntirely,
}

impl From<EmptyBlocksArg> for EmptyBlockPolicy {
    fn from(arg: EmptyBlocksArg) -> Self {
        match arg {
            EmptyBlocksArg::OpenUndefined => Self::OpenUndefined,
            EmptyBlocksArg::AlwaysClose => Self::AlwaysClose,
            EmptyBlocksArg::SkipEntirely => Self::SkipEntirely,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cli.log_level)
            .with_context(|| format!("Invalid log level {:?}", cli.log_level))?,
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate { inputs, output } => cmd_generate(&inputs, output.as_deref()),
        Commands::Check { inputs, current } => cmd_check(&inputs, &current),
    }
}

fn render(inputs: &InputArgs) -> Result<String> {
    let mut config = match &inputs.config {
        Some(path) => DocgenConfig::from_file(path)?,
        None => DocgenConfig::default(),
    };
    if let Some(policy) = inputs.empty_blocks {
        config.empty_blocks = policy.into();
    }
    config.validate()?;

    let template = match &inputs.template {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            Template::new(text, config.placeholder.as_str())?
        }
        None => Template::builtin()?,
    };

    let devices = catalog::load_catalog(&inputs.catalog)?;
    let table = catalog::load_mapping_table(&inputs.mapping)?;

    let document = DocumentAssembler::from_config(&config)
        .assemble(&devices, &table, &template)
        .context("Failed to assemble guide")?;
    Ok(document)
}

fn cmd_generate(inputs: &InputArgs, output: Option<&Path>) -> Result<()> {
    let document = render(inputs)?;

    if let Some(out_path) = output {
        std::fs::write(out_path, &document)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        tracing::info!("[OK] Guide written to: {}", out_path.display());
    } else {
        print!("{document}");
    }

    Ok(())
}

fn cmd_check(inputs: &InputArgs, current: &Path) -> Result<()> {
    let document = render(inputs)?;
    let committed = std::fs::read_to_string(current)
        .with_context(|| format!("Failed to read {}", current.display()))?;

    if let Some(line) = first_difference_line(&committed, &document) {
        bail!(
            "{} is out of date (first difference at line {line}); rerun `hass-docgen generate`",
            current.display()
        );
    }

    println!("[OK] {} is up to date", current.display());
    Ok(())
}

/// 1-based line where `old` and `new` first differ, line endings included.
fn first_difference_line(old: &str, new: &str) -> Option<usize> {
    if old == new {
        return None;
    }

    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();
    let index = old_lines
        .iter()
        .zip(&new_lines)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| old_lines.len().min(new_lines.len()));
    Some(index + 1)
}
