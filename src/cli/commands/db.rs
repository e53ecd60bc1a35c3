use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};
use crate::ui::render::store_info;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Db { info: show_info, check } = &cli.command {
        let store = super::open_store(cfg)?;

        if !*show_info && !*check {
            info("Nothing to do: use --info or --check.");
        }

        if *show_info {
            print!("{}", store_info(&cfg.database, &store.info()?));
        }

        if *check {
            info("Running integrity check…");
            match store.integrity_check()? {
                None => success("Integrity check passed."),
                Some(problem) => error(format!("Integrity check failed: {}", problem)),
            }
        }

        store.close()?;
    }
    Ok(())
}
