use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { json } = &cli.command {
        let tracker = super::open_tracker(cli, cfg)?;
        let statuses = tracker.status()?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&statuses)?);
        } else if statuses.is_empty() {
            info("There are no active tasks.");
        } else {
            for st in &statuses {
                let bullet = if st.paused {
                    Colour::Yellow.paint("‖")
                } else {
                    Colour::Green.paint("▶")
                };
                println!("{} {}", bullet, st);
            }
        }

        tracker.close()?;
    }
    Ok(())
}
