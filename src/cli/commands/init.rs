use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// Writes the configuration file when missing and creates the database
/// schema at the configured (or `--db`) location.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = Config::config_file();

    if path.exists() {
        success(format!("Config file: {}", path.display()));
    } else {
        cfg.save_to(&path)?;
        success(format!("Created config file: {}", path.display()));
    }

    let store = super::open_store(cfg)?;
    if let Err(e) = store.log("init", &cfg.database, "Database initialized") {
        warning(format!("Failed to write internal log: {}", e));
    }
    store.close()?;

    success(format!("Database initialized at {}", cfg.database));
    if cli.project.is_some() {
        warning("--project has no effect on init; projects are created on first start.");
    }
    Ok(())
}
