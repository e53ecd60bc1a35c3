use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Pause = &cli.command {
        let tracker = super::open_tracker(cli, cfg)?;

        let paused = tracker.pause_active()?;
        if paused.is_empty() {
            info("There are no active tasks.");
        }
        for task in &paused {
            success(format!("Paused {}", task.name));
        }

        tracker.close()?;
    }
    Ok(())
}
