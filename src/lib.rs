//! tt library root.
//! Exposes the tracker core, its SQLite store, and the CLI dispatcher.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use ui::messages::warning;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Start { .. } => cli::commands::start::handle(cli, cfg),
        Commands::Pause => cli::commands::pause::handle(cli, cfg),
        Commands::Resume { .. } => cli::commands::resume::handle(cli, cfg),
        Commands::Stop => cli::commands::stop::handle(cli, cfg),
        Commands::Status { .. } => cli::commands::status::handle(cli, cfg),
        Commands::List { .. } => cli::commands::list::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cli, cfg),
        Commands::Db { .. } => cli::commands::db::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1. parse CLI
    let cli = Cli::parse();

    // 2. config file, then TT_* environment
    let mut cfg = Config::load()?;
    for w in cfg.apply_env(|key| std::env::var(key).ok()) {
        warning(w);
    }

    // 3. command-line overrides
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if cli.sync {
        cfg.allow_sync = true;
    }

    dispatch(&cli, &cfg)
}
