pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod input;
pub(crate) mod output;

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use jiff::Timestamp;
use metar_decoder::MetarDecoder;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{OutputFormat, Settings},
    error::ApplicationResult,
};

const DEFAULT_LOG_FILTER: &str = "warn";

/// Decodes a METAR or SPECI report from a Spanish airport into Spanish text.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The report. Several arguments are joined with spaces.
    #[clap(required_unless_present = "show_config")]
    report: Vec<String>,

    #[clap(long, short)]
    /// Print the decoded report as JSON
    json: bool,

    #[clap(long)]
    /// Reference instant for placing the report day, e.g. 2024-06-12T15:00:00Z
    now: Option<Timestamp>,

    #[clap(long, short)]
    /// Settings file to use instead of the one in the user config directory
    config: Option<PathBuf>,

    #[clap(long)]
    /// Print the effective settings as TOML and exit
    show_config: bool,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            settings
                .log_filter
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILTER),
        )
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli, settings: Settings) -> ApplicationResult<()> {
    let mut stdout = io::stdout().lock();
    if cli.show_config {
        write!(stdout, "{}", settings.to_toml()?)?;
        return Ok(());
    }

    let raw = cli.report.join(" ");
    let report = input::validate_report(&raw, &settings)?;

    let decoder = MetarDecoder::new(settings.airport_registry());
    debug!(airports = decoder.registry().len(), "Airport registry ready");
    let decoded = match cli.now {
        Some(now) => decoder.decode_at(report, now)?,
        None => decoder.decode(report)?,
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        settings.output
    };
    output::write_report(&mut stdout, &decoded, format)?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return e.exit_code();
        }
    };
    init_tracing(&settings);

    match run(cli, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_bad_input() => {
            eprintln!("{e}");
            e.exit_code()
        }
        Err(e) => {
            error!("{e}, {e:?}");
            eprintln!("Error interno al procesar el METAR");
            e.exit_code()
        }
    }
}
