//! Command-line interface for accesscheck.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assistant::{OllamaAssistant, StubAssistant};
use crate::config::{self, EngineConfig};
use crate::model::Document;
use crate::pipeline::{self, CancelFlag, RunOptions, RunOutput};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default config file names to search for.
const DEFAULT_CONFIG_NAMES: &[&str] = &["accesscheck.yaml", ".accesscheck.yaml"];

/// WCAG 2.1 AA accessibility analysis and remediation for slide decks.
///
/// Accesscheck takes a normalized document model produced by a format
/// parser, runs rule-based accessibility checks, applies the safe automatic
/// fixes, and reports everything else for manual review.
#[derive(Parser)]
#[command(name = "accesscheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a document model and report WCAG 2.1 AA issues
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Create a starter configuration file
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the normalized document model (JSON)
    pub model: PathBuf,

    /// Path to a config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Apply safe automatic fixes (alt text, link text)
    #[arg(long)]
    pub fix: bool,

    /// Directory for the report and the fixed model file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip assistant calls and use deterministic fallbacks only
    #[arg(long)]
    pub offline: bool,

    /// Exit non-zero when the overall score falls below this value
    #[arg(long)]
    pub min_score: Option<i32>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "accesscheck.yaml")]
    pub output: PathBuf,
}

/// Embedded starter configuration.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Discover a config file in the current directory.
fn discover_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Load configuration from the given path, a discovered file, or defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let config = match explicit {
        Some(path) => EngineConfig::parse_file(path)?,
        None => match discover_config() {
            Some(path) => EngineConfig::parse_file(path)?,
            None => EngineConfig::default(),
        },
    };
    config::validate(&config)?;
    Ok(config)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if args.offline {
        config.assistant.enabled = false;
    }

    let content = match std::fs::read_to_string(&args.model) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: cannot read {:?}: {}", args.model, e);
            return Ok(EXIT_ERROR);
        }
    };
    let document: Document = match serde_json::from_str(&content) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: malformed document model: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let spinner = if args.format == "pretty" {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(format!("Analyzing {} pages...", document.pages.len()));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let options = RunOptions::now(args.fix);
    let cancel = CancelFlag::new();

    // The assistant is chosen once per run; with it disabled, the stub is
    // never actually called.
    let result = if config.assistant.enabled {
        let assistant = OllamaAssistant::new(&config.assistant);
        runtime.block_on(pipeline::run(document, &assistant, &config, &options, &cancel))
    } else {
        let assistant = StubAssistant::unavailable();
        runtime.block_on(pipeline::run(document, &assistant, &config, &options, &cancel))
    };

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: processing failed: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    match args.format.as_str() {
        "json" => println!("{}", report::to_json(&output.report)?),
        _ => report::write_pretty(&output.report),
    }

    if let Some(dir) = &args.output {
        write_outputs(dir, &args.model, &output, args.fix)?;
    }

    let score = output.report.executive_summary.overall_score;
    match args.min_score {
        Some(min) if score < min => {
            eprintln!("Score {} below required minimum {}", score, min);
            Ok(EXIT_FAILED)
        }
        _ => Ok(EXIT_SUCCESS),
    }
}

/// Write the report (and fixed model, when remediation ran) next to each
/// other in the output directory. The fixed model goes back to the format
/// parser for re-serialization.
fn write_outputs(
    dir: &Path,
    model_path: &Path,
    output: &RunOutput,
    fixed: bool,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    let stem = model_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());

    let report_path = dir.join(format!("{}_report.json", stem));
    std::fs::write(&report_path, report::to_json(&output.report)?)?;
    eprintln!("Report written to {}", report_path.display());

    if fixed {
        let model_out = dir.join(format!("{}_fixed.json", stem));
        std::fs::write(&model_out, serde_json::to_string_pretty(&output.document)?)?;
        eprintln!("Fixed model written to {}", model_out.display());
    }

    Ok(())
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE)?;

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to point at your Ollama server", args.output.display());
    println!(
        "  2. Run: accesscheck analyze deck.json --fix --config {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}
