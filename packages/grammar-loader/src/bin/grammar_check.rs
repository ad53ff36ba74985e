//! Grammar verification CLI
//!
//! # Usage
//!
//! ```bash
//! # Verify every bundled grammar
//! cargo run --bin grammar-check -- check
//!
//! # Verify selected grammars, JSON output for CI
//! cargo run --bin grammar-check -- check -g python -g rust --format json
//!
//! # Use a configuration file
//! cargo run --bin grammar-check -- check --config grammar-check.yaml
//! ```
//!
//! Exit codes: 0 all grammars loaded, 1 at least one failed, 2 bad
//! arguments or configuration.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use grammar_loader::{
    bundled, AbiRange, ConfigError, DescriptorSummary, GrammarArtifact, LoadError, LoadErrorKind,
    VerifierConfig,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grammar-check")]
#[command(about = "Verify that compiled tree-sitter grammars load into the runtime", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and verify grammars
    Check {
        /// Grammar to check (repeatable); defaults to the config list, then all bundled
        #[arg(short, long = "grammar")]
        grammars: Vec<String>,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List bundled grammars
    List,

    /// Print the ABI range of the linked runtime
    Abi,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Outcome {
    Pass {
        #[serde(flatten)]
        summary: DescriptorSummary,
    },
    Fail {
        grammar: String,
        kind: &'static str,
        message: String,
    },
}

impl Outcome {
    fn from_result(result: Result<DescriptorSummary, LoadError>) -> Self {
        match result {
            Ok(summary) => Outcome::Pass { summary },
            Err(e) => Outcome::Fail {
                grammar: e.grammar().to_string(),
                kind: match e.kind() {
                    LoadErrorKind::Broken => "broken",
                    LoadErrorKind::Incompatible => "incompatible",
                },
                message: e.to_string(),
            },
        }
    }

    fn passed(&self) -> bool {
        matches!(self, Outcome::Pass { .. })
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            grammars,
            config,
            format,
        } => match run_check(grammars, config, format) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::from(1),
            Err(e) => {
                eprintln!("❌ {}", e);
                ExitCode::from(2)
            }
        },
        Commands::List => {
            for artifact in bundled::artifacts() {
                println!("{:<12} {}", artifact.name(), artifact.extensions().join(", "));
            }
            ExitCode::SUCCESS
        }
        Commands::Abi => {
            println!("{}", AbiRange::host());
            ExitCode::SUCCESS
        }
    }
}

fn run_check(
    grammars: Vec<String>,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<bool, ConfigError> {
    let outcomes = check_grammars(grammars, config_path)?;
    println!("{}", render(&outcomes, format));
    Ok(outcomes.iter().all(Outcome::passed))
}

/// Resolve the grammar list (`-g` wins over the config file) and load each.
fn check_grammars(
    grammars: Vec<String>,
    config_path: Option<PathBuf>,
) -> Result<Vec<Outcome>, ConfigError> {
    let mut config = match config_path {
        Some(path) => VerifierConfig::from_yaml(path)?,
        None => VerifierConfig::default(),
    };
    if !grammars.is_empty() {
        config.grammars = grammars;
    }
    config.validate()?;

    let loader = config.loader()?;
    let artifacts: Vec<GrammarArtifact> = config.artifacts()?;

    Ok(artifacts
        .par_iter()
        .map(|artifact| Outcome::from_result(loader.load(artifact).map(|d| d.summary())))
        .collect())
}

fn render(outcomes: &[Outcome], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => outcomes
            .iter()
            .map(|outcome| match outcome {
                Outcome::Pass { summary } => format!(
                    "✅ {:<12} abi={} kinds={} fields={} root={}",
                    summary.name,
                    summary.abi_version,
                    summary.node_kind_count,
                    summary.field_count,
                    summary.root_kind
                ),
                Outcome::Fail { message, .. } => format!("❌ {}", message),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(outcomes)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
    }
}
