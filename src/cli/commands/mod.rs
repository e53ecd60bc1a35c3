//! One handler per subcommand. Handlers resolve the tracker, call core
//! operations and render the results; no state-machine logic lives here.

pub mod config;
pub mod db;
pub mod init;
pub mod list;
pub mod log;
pub mod pause;
pub mod resume;
pub mod start;
pub mod status;
pub mod stop;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::Tracker;
use crate::db::Store;
use crate::errors::AppResult;
use crate::utils::path::ensure_parent_dir;
use std::env;

/// Resolve the project and open a tracker on the configured database.
pub fn open_tracker(cli: &Cli, cfg: &Config) -> AppResult<Tracker> {
    let cwd = env::current_dir()?;
    let tracker_cfg = cfg.tracker_config(cli.project.as_deref(), &cwd)?;
    ensure_parent_dir(&tracker_cfg.database)?;
    Tracker::open(&tracker_cfg)
}

/// Open the store without binding to a project (log, db maintenance).
pub fn open_store(cfg: &Config) -> AppResult<Store> {
    let path = cfg.database_path();
    ensure_parent_dir(&path)?;
    let store = Store::open(&path)?;
    store.ensure_schema()?;
    Ok(store)
}
