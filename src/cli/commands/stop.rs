use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::{StopReport, Tracker};
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};

/// Offer each paused task for resuming while nothing is running; every
/// task not resumed is finalized.
pub fn settle_paused(tracker: &Tracker, report: &StopReport, assume_yes: bool) -> AppResult<()> {
    let mut resumed = false;

    for task in &report.paused {
        if !resumed && confirm(&format!("Would you like to resume {}?", task.name), assume_yes)? {
            let t = tracker.resume(task.id)?;
            success(format!("Resumed {}", t.name));
            resumed = true;
            continue;
        }

        let t = tracker.finalize_paused(task.id)?;
        info(format!("Closed paused task {}", t.name));
    }

    Ok(())
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Stop = &cli.command {
        let tracker = super::open_tracker(cli, cfg)?;

        let report = tracker.stop()?;
        if report.is_empty() {
            info("There aren't any active or paused tasks.");
        }
        for stopped in &report.stopped {
            success(format!("{} completed in {}", stopped.task.name, stopped.elapsed));
        }
        settle_paused(&tracker, &report, cli.yes)?;

        tracker.close()?;
    }
    Ok(())
}
