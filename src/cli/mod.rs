use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{ConfigLoader, CONFIG_ENV};
use crate::manager::NotesManager;

pub mod commands;

use self::commands::Session;

#[derive(Parser, Debug)]
#[command(
    name = "smart-notes",
    version,
    about = "Interactive notes manager with reminders and keyword search"
)]
pub struct Cli {
    /// Override the config file location (takes precedence over SMART_NOTES_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Do not print the numbered menu before each prompt
    #[arg(long)]
    pub no_menu: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        env::set_var(CONFIG_ENV, path);
    }

    let loader = ConfigLoader::discover()?;
    loader.paths().ensure_directories()?;
    init_tracing(&cli.log_level)
        .with_context(|| format!("initialising logging at level {}", cli.log_level))?;
    let mut config = loader.load_or_init()?;
    if cli.no_menu {
        config.session.show_menu = false;
    }

    let mut manager = NotesManager::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&mut manager, &config, stdin.lock(), stdout.lock())
        .run()
        .context("running notes session")
}

fn init_tracing(level: &str) -> Result<()> {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_try_init(|| {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
        Ok(())
    })
    .map(|_| ())
}
