//! timepay library root.
//! Exposes the CLI parser, the high-level run() function, and the ledger
//! modules (models, stores, core services).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands::{self, AppContext};
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;
use utils::date::parse_date_key;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli).await,
        Commands::Config { .. } => commands::config::handle(&cli.command, &cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, &cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, &cfg),
        day_command => {
            let today = cli.today.as_deref().map(parse_date_key).transpose()?;
            let app = AppContext::open(cfg, today)?;

            match day_command {
                Commands::Schedule { .. } => commands::schedule::handle(day_command, &app).await,
                Commands::Done { .. } => commands::done::handle(day_command, &app).await,
                Commands::Remove { .. } => commands::remove::handle(day_command, &app).await,
                Commands::Note { .. } => commands::note::handle(day_command, &app).await,
                Commands::Show { .. } => commands::show::handle(day_command, &app).await,
                Commands::Stats { .. } => commands::stats::handle(day_command, &app).await,
                _ => Ok(()),
            }
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("timepay={}", cfg.log_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // test runs never read the user's config file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    init_tracing(&cfg);

    dispatch(&cli, cfg).await
}
