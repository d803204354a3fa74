//! CLI definition and dispatch.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::adapters::console_report::{ConsoleReport, DEFAULT_SHOWN_TRANSACTIONS};
use crate::adapters::csv_adapter::CsvBarSource;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::agent::{AgentConfig, TradingAgent};
use crate::domain::config_validation::validate_run_config;
use crate::domain::error::BarsimError;
use crate::domain::schema::{FieldSchema, DEFAULT_BASE_VOLUME_COLUMN, DEFAULT_QUOTE_VOLUME_COLUMN};
use crate::domain::simulation::{run_simulation, SimulationResult, DEFAULT_MAX_ITERATIONS};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_BUY_LEN: usize = 3;
pub const DEFAULT_SELL_LEN: usize = 2;
pub const DEFAULT_AMOUNT: f64 = 0.01;

#[derive(Parser, Debug)]
#[command(name = "barsim", about = "Replay historical bars through a rolling-average trader")]
pub struct Cli {
    /// Log verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a bar file and print the result
    Run(RunArgs),
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// CSV file of bars; overrides [data] path
    #[arg(short, long)]
    pub data: Option<PathBuf>,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub buy_len: Option<usize>,
    #[arg(long)]
    pub sell_len: Option<usize>,
    #[arg(long)]
    pub amount: Option<f64>,
    /// 0 replays the whole file
    #[arg(long)]
    pub max_iterations: Option<usize>,
    /// Number of transactions to list
    #[arg(long)]
    pub show: Option<usize>,
}

/// Everything a run needs, after config file and flags are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub data: PathBuf,
    pub schema: FieldSchema,
    pub agent: AgentConfig,
    pub max_iterations: Option<usize>,
    pub show: usize,
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);

    match cli.command {
        Command::Run(args) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            match execute(&args, &mut out) {
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => report_error(&e),
            }
        }
        Command::Validate { config } => run_validate(&config),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("warn,barsim={level}")))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn report_error(err: &BarsimError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, BarsimError> {
    info!(path = %path.display(), "loading config");
    let adapter = FileConfigAdapter::from_file(path)?;
    validate_run_config(&adapter)?;
    Ok(adapter)
}

/// Load, replay and report. The report goes to `out`.
pub fn execute(args: &RunArgs, out: &mut dyn Write) -> Result<SimulationResult, BarsimError> {
    let adapter = args.config.as_ref().map(load_config).transpose()?;
    let settings = resolve_settings(args, adapter.as_ref().map(|a| a as &dyn ConfigPort))?;

    let mut agent = TradingAgent::new(settings.agent.clone())?;
    info!(path = %settings.data.display(), "replaying bars");
    let mut source = CsvBarSource::open(&settings.data, settings.schema.clone())?;
    let result = run_simulation(&mut source, &mut agent, settings.max_iterations)?;

    ConsoleReport::new(out).write(&result, settings.show)?;
    Ok(result)
}

/// Merge flags over config values over built-in defaults.
pub fn resolve_settings(
    args: &RunArgs,
    config: Option<&dyn ConfigPort>,
) -> Result<RunSettings, BarsimError> {
    let data = match &args.data {
        Some(path) => path.clone(),
        None => config
            .and_then(|c| c.get_string("data", "path"))
            .map(PathBuf::from)
            .ok_or_else(|| BarsimError::ConfigMissing {
                section: "data".into(),
                key: "path".into(),
            })?,
    };

    let base = config
        .and_then(|c| c.get_string("data", "base_volume_column"))
        .unwrap_or_else(|| DEFAULT_BASE_VOLUME_COLUMN.to_string());
    let quote = config
        .and_then(|c| c.get_string("data", "quote_volume_column"))
        .unwrap_or_else(|| DEFAULT_QUOTE_VOLUME_COLUMN.to_string());

    let agent = AgentConfig {
        buy_len: match args.buy_len {
            Some(n) => n,
            None => config_usize(config, "agent", "buy_len", DEFAULT_BUY_LEN)?,
        },
        sell_len: match args.sell_len {
            Some(n) => n,
            None => config_usize(config, "agent", "sell_len", DEFAULT_SELL_LEN)?,
        },
        amount: args.amount.unwrap_or_else(|| {
            config.map_or(DEFAULT_AMOUNT, |c| c.get_double("agent", "amount", DEFAULT_AMOUNT))
        }),
    };

    let max_iterations = match args.max_iterations {
        Some(n) => n,
        None => config_usize(config, "simulation", "max_iterations", DEFAULT_MAX_ITERATIONS)?,
    };
    let show = match args.show {
        Some(n) => n,
        None => config_usize(
            config,
            "simulation",
            "show_transactions",
            DEFAULT_SHOWN_TRANSACTIONS,
        )?,
    };

    Ok(RunSettings {
        data,
        schema: FieldSchema::with_volume_columns(&base, &quote),
        agent,
        max_iterations: (max_iterations > 0).then_some(max_iterations),
        show,
    })
}

fn config_usize(
    config: Option<&dyn ConfigPort>,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, BarsimError> {
    let Some(config) = config else {
        return Ok(default);
    };
    let value = config.get_int(section, key, default as i64);
    usize::try_from(value)
        .map_err(|_| BarsimError::invalid(section, key, format!("{key} must be non-negative")))
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return report_error(&e),
    };

    // data path may be supplied on the command line later
    let args = RunArgs {
        data: Some(PathBuf::new()),
        ..RunArgs::default()
    };
    let settings = match resolve_settings(&args, Some(&adapter)) {
        Ok(s) => s,
        Err(e) => return report_error(&e),
    };
    if let Err(e) = settings.agent.validate() {
        return report_error(&e);
    }

    println!("Config validated successfully");
    match adapter.get_string("data", "path") {
        Some(path) => println!("  data: {path}"),
        None => println!("  data: (pass --data)"),
    }
    println!(
        "  agent: buy len {}, sell len {}, trade amount {}",
        settings.agent.buy_len, settings.agent.sell_len, settings.agent.amount
    );
    match settings.max_iterations {
        Some(n) => println!("  max iterations: {n}"),
        None => println!("  max iterations: unbounded"),
    }
    ExitCode::SUCCESS
}
