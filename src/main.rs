use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use termnote::core::config::{self, ResolvedConfig};
use termnote::core::state::App;
use termnote::core::vault::{NoteError, Vault};
use termnote::tui::{self, TerminalWidgets};

#[derive(Parser)]
#[command(name = "termnote", version, about = "Keyboard-driven markdown notes in the terminal")]
struct Args {
    /// Vault directory (overrides TERMNOTE_VAULT and the config file)
    #[arg(long, value_name = "DIR")]
    vault: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => {
            log::info!("termnote exiting cleanly");
            ExitCode::SUCCESS
        }
        Err(message) => {
            log::error!("{}", message);
            eprintln!("termnote: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let config = config::load_config(args.config.as_deref()).map_err(|e| e.to_string())?;
    let resolved = config::resolve(&config, args.vault.as_deref()).map_err(|e| e.to_string())?;
    log::info!("Using vault {}", resolved.vault_dir.display());

    let mut app = build_app(&resolved).map_err(|e| e.to_string())?;
    tui::run(&mut app).map_err(|e| e.to_string())
}

fn build_app(resolved: &ResolvedConfig) -> Result<App, NoteError> {
    let vault = Vault::open(&resolved.vault_dir)?;
    Ok(App::new(
        vault,
        resolved.editor.clone(),
        Box::new(TerminalWidgets::from_config(resolved)),
    ))
}

/// File logger under the platform cache dir; the terminal belongs to the UI.
fn init_logging(verbose: bool) {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("termnote")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Ok(log_file) = File::create(dir.join("termnote.log")) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
    log::info!("termnote {} starting up", env!("CARGO_PKG_VERSION"));
}
