use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::{StartOutcome, Tracker};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success};

fn report(outcome: &StartOutcome) {
    match outcome {
        StartOutcome::Started(task) => success(format!("Started {}", task.name)),
        StartOutcome::AlreadyActive(_) => info("You are already working on that task."),
    }
}

/// Start `taskname`; when another task is running, offer to pause it first.
pub fn start_or_switch(tracker: &Tracker, taskname: Option<&str>, assume_yes: bool) -> AppResult<()> {
    match tracker.start(taskname) {
        Ok(outcome) => report(&outcome),
        Err(AppError::AnotherTaskActive { name, .. }) => {
            if !confirm(&format!("Do you want to pause {}?", name), assume_yes)? {
                info(format!("Still working on {}.", name));
                return Ok(());
            }
            for task in tracker.pause_active()? {
                success(format!("Paused {}", task.name));
            }
            report(&tracker.start(taskname)?);
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { taskname } = &cli.command {
        let tracker = super::open_tracker(cli, cfg)?;
        start_or_switch(&tracker, taskname.as_deref(), cli.yes)?;
        tracker.close()?;
    }
    Ok(())
}
