use std::path::{Path, PathBuf};

use argschema_parser::{Parser as ArgParser, ParserConfig, load_schema};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status for schema, config and I/O failures.
const EXIT_FAILURE: i32 = 1;
/// Exit status for arguments rejected by the schema.
const EXIT_USAGE: i32 = 2;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argschema")]
#[command(about = "Check command schemas and validate argument lists against them")]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one or more schema files.
    Check(CheckArgs),
    /// Print the usage block of a schema.
    Help(HelpArgs),
    /// Parse arguments given after `--` against a schema.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Schema files (JSON or YAML).
    #[arg(required = true)]
    schemas: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Schema file (JSON or YAML).
    schema: PathBuf,
    /// Parser configuration file (YAML).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema file (JSON or YAML).
    schema: PathBuf,
    /// Parser configuration file (YAML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format for the parsed values.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to validate, e.g. `run --count=5`.
    #[arg(last = true)]
    args: Vec<String>,
}

enum Failure {
    /// Rendered usage block for rejected arguments.
    Usage(String),
    Fatal(String),
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check(args) => run_check(args).map_err(Failure::Fatal),
        Command::Help(args) => run_help(args).map_err(Failure::Fatal),
        Command::Parse(args) => run_parse(args),
    };

    match result {
        Ok(()) => {}
        Err(Failure::Usage(usage)) => {
            eprint!("{usage}");
            std::process::exit(EXIT_USAGE);
        }
        Err(Failure::Fatal(err)) => {
            eprintln!("error: {err}");
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let mut failures = Vec::new();
    for path in &args.schemas {
        if let Err(err) = load_schema(path) {
            failures.push(format!("{}: {err}", path.display()));
        }
    }

    if !failures.is_empty() {
        return Err(failures.join("\n"));
    }

    println!("Validated {} schema file(s).", args.schemas.len());
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let parser = load_parser(&args.schema, args.config.as_deref())?;
    print!("{}", parser.help());
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), Failure> {
    let parser = load_parser(&args.schema, args.config.as_deref()).map_err(Failure::Fatal)?;
    debug!(args = ?args.args, "Parsing arguments");

    let parsed = parser
        .parse(&args.args)
        .map_err(|err| Failure::Usage(err.usage().to_string()))?;

    let rendered = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&parsed)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(&parsed).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
    .map_err(Failure::Fatal)?;

    println!("{}", rendered.trim_end());
    Ok(())
}

fn load_parser(schema: &Path, config: Option<&Path>) -> Result<ArgParser, String> {
    let command = load_schema(schema)
        .map_err(|err| format!("Failed to load schema '{}': {err}", schema.display()))?;

    let config = match config {
        Some(path) => ParserConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ParserConfig::default(),
    };

    ArgParser::with_config(command, &config).map_err(|err| err.to_string())
}
