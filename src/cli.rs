//! CLI definition and dispatch.

use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Level;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    configured_pair, configured_symbols, validate_session_config, validate_session_settings,
};
use crate::domain::error::PairviewError;
use crate::domain::pair_dataset::PairDatasetBuilder;
use crate::domain::selection::{SelectionController, View};
use crate::domain::session::{parse_log_level, SessionConfig};
use crate::domain::statistics::column_labels;
use crate::domain::ticker_store::TickerStore;
use crate::domain::tickers::TickerUniverse;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;

#[derive(Parser, Debug)]
#[command(name = "pairview", about = "Linked return-correlation view over ticker pairs")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print descriptive statistics for a ticker pair
    Stats {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker1: Option<String>,
        #[arg(long)]
        ticker2: Option<String>,
        /// Row indices to restrict the statistics to, e.g. 1,3
        #[arg(long, value_delimiter = ',')]
        select: Vec<usize>,
    },
    /// Write the joined pair rows as CSV to stdout
    Rows {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker1: Option<String>,
        #[arg(long)]
        ticker2: Option<String>,
        #[arg(long, value_delimiter = ',')]
        select: Vec<usize>,
    },
    /// List tickers available in the data directory
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let verbose = cli.verbose;
    match cli.command {
        Command::Stats {
            config,
            ticker1,
            ticker2,
            select,
        } => run_stats(&config, ticker1.as_deref(), ticker2.as_deref(), &select, verbose),
        Command::Rows {
            config,
            ticker1,
            ticker2,
            select,
        } => run_rows(&config, ticker1.as_deref(), ticker2.as_deref(), &select, verbose),
        Command::ListTickers { config } => run_list_tickers(&config, verbose),
        Command::Validate { config } => run_validate(&config, verbose),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PairviewError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Installs the stderr log subscriber. `-v` flags take precedence over the
/// configured level; the fallback is `warn`.
pub fn init_logging(verbose: u8, configured: Option<Level>) {
    let level = match verbose {
        0 => configured.unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

/// Resolves the session from config, with optional ticker overrides. With an
/// override the configured pair is not checked; `TickerUniverse::new` checks
/// the resolved one.
pub fn build_session_config(
    config: &dyn ConfigPort,
    ticker1: Option<&str>,
    ticker2: Option<&str>,
) -> Result<SessionConfig, PairviewError> {
    if ticker1.is_none() && ticker2.is_none() {
        validate_session_config(config)?;
    } else {
        validate_session_settings(config)?;
    }

    let data_dir = config
        .get_string("data", "dir")
        .map(|d| PathBuf::from(d.trim()))
        .ok_or_else(|| PairviewError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })?;

    let symbols = configured_symbols(config)?;
    let (default1, default2) = configured_pair(config);
    let universe = TickerUniverse::new(
        symbols,
        ticker1.unwrap_or(&default1),
        ticker2.unwrap_or(&default2),
    )?;

    let mut session = SessionConfig::new(data_dir, universe);
    session.precision = config.get_int("display", "precision", session.precision as i64) as usize;
    session.log_level = config
        .get_string("logging", "level")
        .as_deref()
        .and_then(parse_log_level);
    Ok(session)
}

pub fn open_controller<P: PricePort>(
    port: P,
    universe: TickerUniverse,
) -> Result<SelectionController<P>, PairviewError> {
    let builder = Arc::new(PairDatasetBuilder::new(TickerStore::new(port)));
    SelectionController::new(builder, universe)
}

/// Title lines followed by the statistics table.
pub fn render_stats(view: &View<'_>, precision: usize) -> String {
    let scope = match view.selection {
        Some(indices) => format!("{} of {} rows selected", indices.len(), view.dataset.len()),
        None => format!("all {} rows", view.dataset.len()),
    };
    format!(
        "{}\n{} | {}\n{}\n\n{:.*}",
        view.labels.correlation,
        view.labels.series1,
        view.labels.series2,
        scope,
        precision,
        view.stats
    )
}

/// Writes the view's active rows as CSV with a header row.
pub fn write_rows<W: Write>(view: &View<'_>, writer: W) -> Result<(), PairviewError> {
    let to_err = |e: csv::Error| PairviewError::DataSource {
        reason: format!("CSV write error: {}", e),
    };
    let mut wtr = csv::Writer::from_writer(writer);

    let [l1, l2, l3, l4] = column_labels(&view.labels.series1, &view.labels.series2);
    wtr.write_record(["date", l1.as_str(), l2.as_str(), l3.as_str(), l4.as_str()])
        .map_err(to_err)?;
    for row in &view.rows {
        wtr.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.price1.to_string(),
            row.price2.to_string(),
            row.return1.to_string(),
            row.return2.to_string(),
        ])
        .map_err(to_err)?;
    }
    wtr.flush()?;
    Ok(())
}

fn prepare(
    config_path: &PathBuf,
    ticker1: Option<&str>,
    ticker2: Option<&str>,
    verbose: u8,
) -> Result<SessionConfig, ExitCode> {
    let adapter = load_config(config_path)?;
    let session = build_session_config(&adapter, ticker1, ticker2).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    init_logging(verbose, session.log_level);
    Ok(session)
}

fn open_view(
    session: &SessionConfig,
    select: &[usize],
) -> Result<SelectionController<CsvAdapter>, PairviewError> {
    let port = CsvAdapter::new(session.data_dir.clone());
    let mut controller = open_controller(port, session.universe.clone())?;
    if !select.is_empty() {
        controller.set_row_selection(select)?;
    }
    Ok(controller)
}

fn run_stats(
    config_path: &PathBuf,
    ticker1: Option<&str>,
    ticker2: Option<&str>,
    select: &[usize],
    verbose: u8,
) -> ExitCode {
    let session = match prepare(config_path, ticker1, ticker2, verbose) {
        Ok(s) => s,
        Err(code) => return code,
    };
    eprintln!(
        "Loading {} and {} from {}",
        session.universe.ticker1,
        session.universe.ticker2,
        session.data_dir.display()
    );

    let controller = match open_view(&session, select) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print!("{}", render_stats(&controller.current_view(), session.precision));
    ExitCode::SUCCESS
}

fn run_rows(
    config_path: &PathBuf,
    ticker1: Option<&str>,
    ticker2: Option<&str>,
    select: &[usize],
    verbose: u8,
) -> ExitCode {
    let session = match prepare(config_path, ticker1, ticker2, verbose) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let controller = match open_view(&session, select) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let view = controller.current_view();
    match write_rows(&view, io::stdout().lock()) {
        Ok(()) => {
            eprintln!("{} rows written", view.rows.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list_tickers(config_path: &PathBuf, verbose: u8) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    init_logging(
        verbose,
        config
            .get_string("logging", "level")
            .as_deref()
            .and_then(parse_log_level),
    );

    let data_dir = match config.get_string("data", "dir") {
        Some(d) if !d.trim().is_empty() => PathBuf::from(d.trim()),
        _ => {
            let err = PairviewError::ConfigMissing {
                section: "data".into(),
                key: "dir".into(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let tickers = match CsvAdapter::new(data_dir.clone()).list_tickers() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if tickers.is_empty() {
        eprintln!("No tickers found in {}", data_dir.display());
    } else {
        for ticker in &tickers {
            println!("{}", ticker);
        }
        eprintln!("{} tickers found", tickers.len());
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf, verbose: u8) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let session = match prepare(config_path, None, None, verbose) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let universe = &session.universe;
    eprintln!("  data dir:  {}", session.data_dir.display());
    eprintln!("  symbols:   {}", universe.symbols.join(", "));
    eprintln!(
        "  ticker1:   {} (options: {})",
        universe.ticker1,
        universe.options_excluding(&universe.ticker2).join(", ")
    );
    eprintln!(
        "  ticker2:   {} (options: {})",
        universe.ticker2,
        universe.options_excluding(&universe.ticker1).join(", ")
    );
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
