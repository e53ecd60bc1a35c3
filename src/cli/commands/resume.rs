use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::Tracker;
use crate::errors::{AppError, AppResult};
use crate::models::Task;
use crate::ui::messages::{confirm, info, success};

/// Pick the paused task to resume: the one named, or the only one.
pub fn pick_paused(paused: &[Task], taskname: Option<&str>) -> AppResult<Task> {
    let candidates: Vec<&Task> = match taskname {
        Some(name) => paused.iter().filter(|t| t.name == name).collect(),
        None => paused.iter().collect(),
    };

    match candidates.as_slice() {
        [] => Err(AppError::InvalidState(match taskname {
            Some(name) => format!("no paused task named '{}'", name),
            None => "there are no paused tasks".to_string(),
        })),
        [one] => Ok((*one).clone()),
        many => {
            let names: Vec<&str> = many.iter().map(|t| t.name.as_str()).collect();
            if taskname.is_some() {
                // same name paused more than once: latest wins
                Ok((*many[many.len() - 1]).clone())
            } else {
                Err(AppError::InvalidState(format!(
                    "several tasks are paused, name one: {}",
                    names.join(", ")
                )))
            }
        }
    }
}

/// Resume `task`, offering to pause whatever is running first.
pub fn resume_or_switch(tracker: &Tracker, task: &Task, assume_yes: bool) -> AppResult<()> {
    match tracker.resume(task.id) {
        Ok(t) => success(format!("Resumed {}", t.name)),
        Err(AppError::AnotherTaskActive { name, .. }) => {
            if !confirm(&format!("Do you want to pause {}?", name), assume_yes)? {
                info(format!("Still working on {}.", name));
                return Ok(());
            }
            for paused in tracker.pause_active()? {
                success(format!("Paused {}", paused.name));
            }
            let t = tracker.resume(task.id)?;
            success(format!("Resumed {}", t.name));
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Resume { taskname } = &cli.command {
        let tracker = super::open_tracker(cli, cfg)?;

        let paused: Vec<Task> = tracker
            .status()?
            .into_iter()
            .filter(|s| s.paused)
            .map(|s| s.task)
            .collect();
        let task = pick_paused(&paused, taskname.as_deref())?;
        resume_or_switch(&tracker, &task, cli.yes)?;

        tracker.close()?;
    }
    Ok(())
}
