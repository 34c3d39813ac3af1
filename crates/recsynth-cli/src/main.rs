mod config;
mod registry;

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use recsynth_core::{Error as CoreError, SynthesisOptions, validate_options};
use recsynth_generate::output::csv::write_records_csv;
use recsynth_generate::{DatasetAssembler, GenerationError, NicknameLookup, StateNameLookup};
use registry::{RunContext, export_records, init_run_logging, start_run, write_report};
use thiserror::Error;
use uuid::Uuid;

use config::{ConfigError, OptionOverrides, resolve_options};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("invalid options: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "recsynth",
    version,
    about = "Synthetic patient records with controlled duplicates"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize a record set into a new run directory.
    Generate(GenerateArgs),
    /// Print the nicknames known for each name.
    Nicknames(NicknamesArgs),
    /// Print the full name for each state code.
    State(StateArgs),
    /// Print the JSON Schema of the synthesis options file.
    ConfigSchema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML file with synthesis options.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Number of base records.
    #[arg(long)]
    records: Option<usize>,
    /// Share of base records to duplicate, 0-100.
    #[arg(long)]
    percent: Option<f64>,
    /// Upper bound of copies per duplicated record.
    #[arg(long)]
    max_copies: Option<usize>,
    /// Field used to key the output rows.
    #[arg(long, value_name = "FIELD")]
    index_field: Option<String>,
    /// Let duplicates keep their source's study id.
    #[arg(long, conflicts_with = "no_duplicate_study_id")]
    allow_duplicate_identifier: bool,
    /// Give every duplicate a fresh study id.
    #[arg(long)]
    no_duplicate_study_id: bool,
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// Date treated as today (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    reference_date: Option<NaiveDate>,
    /// Nickname table to use instead of the built-in one.
    #[arg(long, value_name = "FILE")]
    nicknames: Option<PathBuf>,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Also copy records.csv to this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl GenerateArgs {
    fn overrides(&self) -> OptionOverrides {
        let allow_duplicate_identifier = if self.no_duplicate_study_id {
            Some(false)
        } else if self.allow_duplicate_identifier {
            Some(true)
        } else {
            None
        };

        OptionOverrides {
            num_records_desired: self.records,
            percent_records_to_duplicate: self.percent,
            max_number_copies_of_one_record: self.max_copies,
            index_field_name: self.index_field.clone(),
            allow_duplicate_identifier,
            seed: self.seed,
            reference_date: self.reference_date,
        }
    }
}

#[derive(Args, Debug)]
struct NicknamesArgs {
    /// Names to look up.
    #[arg(required = true)]
    names: Vec<String>,
    /// Nickname table to use instead of the built-in one.
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StateArgs {
    /// Postal codes to expand.
    #[arg(required = true)]
    codes: Vec<String>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Nicknames(args) => run_nicknames(args),
        Command::State(args) => run_state(args),
        Command::ConfigSchema => run_config_schema(),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let options = resolve_options(args.config.as_deref(), args.overrides())?;
    validate_options(&options)?;
    let nicknames = load_nicknames(args.nicknames.as_deref())?;

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        run_dir: args.run_dir,
        options: options.clone(),
        nicknames_file: args.nicknames,
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(event = "run_started", run_id = %run_id, run_dir = %run_paths.root.display());
    let timer = Instant::now();

    let result = DatasetAssembler::new(options)
        .with_nicknames(nicknames)
        .with_run_id(run_id.clone())
        .run()?;

    let bytes =
        write_records_csv(&run_paths.records_path, &result.records).map_err(GenerationError::from)?;
    tracing::info!(
        event = "records_written",
        path = %run_paths.records_path.display(),
        rows = result.records.len(),
        bytes
    );

    write_report(&run_paths, &result.report)?;
    tracing::info!(event = "report_written", path = %run_paths.report_path.display());

    if let Some(out) = &args.out {
        export_records(&run_paths, out)?;
        tracing::info!(event = "records_exported", path = %out.display());
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64
    );
    println!("{}", run_paths.root.display());
    Ok(())
}

fn run_nicknames(args: NicknamesArgs) -> Result<(), CliError> {
    let lookup = load_nicknames(args.file.as_deref())?;
    for name in &args.names {
        match lookup.get(name) {
            Some(nicknames) if !nicknames.is_empty() => {
                println!("{name}: {}", nicknames.join(", "))
            }
            _ => println!("{name}: no known nicknames"),
        }
    }
    Ok(())
}

fn run_state(args: StateArgs) -> Result<(), CliError> {
    let states = StateNameLookup::new();
    for code in &args.codes {
        println!("{code}: {}", states.full_name(code));
    }
    Ok(())
}

fn run_config_schema() -> Result<(), CliError> {
    let schema = schemars::schema_for!(SynthesisOptions);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn load_nicknames(path: Option<&std::path::Path>) -> Result<NicknameLookup, GenerationError> {
    match path {
        Some(path) => NicknameLookup::from_path(path),
        None => Ok(NicknameLookup::builtin()),
    }
}
