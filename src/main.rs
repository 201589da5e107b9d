use chrono::{DateTime, Local};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

mod config;
mod display;
mod error;
mod notifier;
mod pomodoro;

use config::{Config, DEFAULT_CONFIG_FILE};
use display::terminal::TerminalDisplay;
use notifier::SystemNotifier;
use pomodoro::pomodoro::CycleState;
use pomodoro::scheduler::{CancelToken, PhaseScheduler};
use pomodoro::timer::TokioClock;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pomodoro timer that fills baskets of work intervals")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Append log output to this file instead of the default location
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn default_log_path() -> PathBuf {
    PathBuf::from(format!(
        "{}/.local/share/tomato_basket/tomato_basket.log",
        std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
    ))
}

fn log_writer(path: &Path) -> std::io::Result<BoxMakeWriter> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

fn init_logging(args: &Args) {
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let path = args.log.clone().unwrap_or_else(default_log_path);
    let (writer, file_error) = match log_writer(&path) {
        Ok(writer) => (writer, None),
        Err(e) => (BoxMakeWriter::new(std::io::stderr), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    if let Some(e) = file_error {
        warn!(path = %path.display(), error = %e, "cannot open log file, logging to stderr");
    }
}

fn print_summary(session_start: DateTime<Local>, state: CycleState, threshold: u32) {
    let minutes = (Local::now() - session_start).num_minutes();
    println!("\n\n--- Session Summary ---");
    println!("Started at: {}", session_start.format("%Y-%m-%d %H:%M:%S"));
    println!("Session duration: {} minutes", minutes);
    println!("Pomodoros started: {}", state.pomodoros_started(threshold));
    println!("Baskets earned: {}", state.baskets_earned);
    println!("-----------------------\n");
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args.config.display(), error = %e, "configuration rejected");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Ok(json) = serde_json::to_string(&config) {
        info!(config = %json, "configuration loaded");
    }

    let notifier = SystemNotifier::from_config(&config);
    let mut scheduler = match PhaseScheduler::new(
        config,
        TokioClock,
        notifier,
        TerminalDisplay::stdout(),
        TerminalDisplay::stdout(),
    ) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            error!(error = %e, "configuration rejected");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let session_start = Local::now();
    let cancel = CancelToken::new();

    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for interrupt");
            std::future::pending::<()>().await;
        }
    };

    // Ctrl-C drops the scheduler future at its current one-second sleep.
    tokio::select! {
        _ = scheduler.run(&cancel) => {}
        _ = interrupted => {
            info!("interrupted, stopping");
        }
    }

    print_summary(
        session_start,
        scheduler.state(),
        scheduler.config().pomodoros_before_long_break,
    );
    ExitCode::SUCCESS
}
