use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::ui::render::history_table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::List { taskname, json } = &cli.command {
        let tracker = super::open_tracker(cli, cfg)?;
        let history = tracker.history(taskname.as_deref())?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&history)?);
        } else if history.is_empty() {
            info(format!("No tasks recorded for {}.", tracker.project().name));
        } else {
            println!("📋 Tasks for {}:\n", tracker.project().name);
            print!("{}", history_table(&history));
        }

        tracker.close()?;
    }
    Ok(())
}
