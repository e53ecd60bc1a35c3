use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::ui::render::log_table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { limit } = &cli.command {
        let store = super::open_store(cfg)?;
        let entries = store.load_log(*limit)?;

        if entries.is_empty() {
            info("The internal log is empty.");
        } else {
            println!("📜 Internal log:\n");
            print!("{}", log_table(&entries));
        }

        store.close()?;
    }
    Ok(())
}
