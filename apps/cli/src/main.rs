use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use constraint_resolution::{
    ConstraintResolver, JsonlTracker, Resolution, ResolutionOutcome, ResolutionParams,
    ResolverConfig,
};
use grid_types::Grid;
use log::SetLoggerError;
use serde::Serialize;
use serde_json::{Value, json};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structure_identification::{StructureType, SubstitutionRule};

const CLI_VERSION: &str = "1.0";

#[derive(Parser)]
#[command(name = "substitute")]
#[command(about = "Find a structure in a grid and rewrite it", long_about = None)]
struct Cli {
    /// Wrap output in the JSON envelope
    #[arg(long, global = true)]
    json: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a grid against input/output structure descriptions
    Resolve(ResolveArgs),
    /// Show how descriptions are classified, without touching a grid
    Classify(ClassifyArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Resolve(_) => "resolve",
            Self::Classify(_) => "classify",
        }
    }
}

#[derive(Args)]
struct ResolveArgs {
    /// JSON array of rows; `-` reads stdin
    #[arg(long, value_name = "FILE")]
    grid: PathBuf,

    /// Description of the input structure
    #[arg(long)]
    input: String,

    /// Description of the output structure
    #[arg(long)]
    output: String,

    /// Zero every cell outside the rewritten structures
    #[arg(long)]
    clear_non_matching: bool,

    #[arg(long, default_value = "")]
    problem_id: String,

    /// Resolver config JSON
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Append unknown-structure events to this JSON-lines file
    #[arg(long, value_name = "FILE", env = "SUBSTITUTE_TRACKER_LOG")]
    tracker_log: Option<PathBuf>,
}

#[derive(Args)]
struct ClassifyArgs {
    #[arg(long)]
    input: String,

    #[arg(long, default_value = "")]
    output: String,
}

#[derive(Serialize)]
struct Classification {
    structure_type: StructureType,
    rule: SubstitutionRule,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.verbose, cli.json) {
        eprintln!("warning: logging disabled: {err}");
    }

    let command = cli.command.name();
    match run(cli.command) {
        Ok((data, text)) => {
            print_success(cli.json, command, data, &text);
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_error(cli.json, command, &err);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool, json_mode: bool) -> Result<(), SetLoggerError> {
    let level = match (verbose, json_mode) {
        (true, _) => LevelFilter::Debug,
        (false, true) => LevelFilter::Error,
        (false, false) => LevelFilter::Warn,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Never)
}

/// Returns the JSON payload and its plain-text rendering.
fn run(command: Commands) -> Result<(Value, String)> {
    match command {
        Commands::Resolve(args) => resolve(args),
        Commands::Classify(args) => {
            let resolver = ConstraintResolver::new();
            let (structure_type, rule) = resolver.classify(&args.input, &args.output);
            let text = format!(
                "structure: {} (confidence {:.2})\noperator: {}",
                structure_type.name(),
                structure_type.confidence,
                rule.operator
            );
            let data = serde_json::to_value(Classification {
                structure_type,
                rule,
            })?;
            Ok((data, text))
        }
    }
}

fn resolve(args: ResolveArgs) -> Result<(Value, String)> {
    let grid = read_grid(&args.grid)?;
    let mut resolver = ConstraintResolver::new();
    if let Some(path) = &args.config {
        let config = ResolverConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?;
        resolver = resolver.with_config(config);
    }
    if let Some(path) = &args.tracker_log {
        let tracker = JsonlTracker::new(path);
        log::debug!("unknown structures append to {}", tracker.path().display());
        resolver = resolver.with_tracker(Box::new(tracker));
    }

    let mut params =
        ResolutionParams::new(args.input, args.output).with_problem_id(args.problem_id);
    if args.clear_non_matching {
        params = params.clearing_non_matching();
    }

    let resolution = resolver.resolve(&grid, &params);
    let text = format!("{}\n{}", resolution.grid, summary(&resolution));
    Ok((serde_json::to_value(&resolution)?, text))
}

fn read_grid(path: &Path) -> Result<Grid> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading grid from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading grid {}", path.display()))?
    };
    serde_json::from_str(&raw).context("grid must be a non-empty JSON array of equal-length rows")
}

fn summary(resolution: &Resolution) -> String {
    let ty = resolution.structure_type.name();
    match &resolution.outcome {
        ResolutionOutcome::Applied {
            operator,
            instances,
            rewritten,
        } => format!("{ty}: {operator} rewrote {rewritten} of {instances} instance(s)"),
        ResolutionOutcome::Shortcut => format!("{ty}: answered by learned shortcut"),
        ResolutionOutcome::LegacyFallback { matches } => {
            format!("{ty}: legacy plus-to-cross fallback, {matches} match(es)")
        }
        ResolutionOutcome::Unrecognized { .. } => format!("{ty}: no structures recognized"),
    }
}

fn print_success(json_mode: bool, command: &str, data: Value, text: &str) {
    if json_mode {
        let response = json!({
            "status": "ok",
            "version": CLI_VERSION,
            "command": command,
            "data": data,
            "error": null
        });
        println!("{response:#}");
    } else {
        println!("{text}");
    }
}

fn print_error(json_mode: bool, command: &str, err: &anyhow::Error) {
    if json_mode {
        let response = json!({
            "status": "error",
            "version": CLI_VERSION,
            "command": command,
            "data": null,
            "error": { "message": format!("{err:#}") }
        });
        eprintln!("{response:#}");
    } else {
        eprintln!("Error: {err:#}");
    }
}
