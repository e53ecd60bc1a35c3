use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `config` subcommand. The access token is never echoed.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config } = &cli.command {
        if !*print_config {
            info(format!("Config file: {}", Config::config_file().display()));
            return Ok(());
        }

        let mut shown = cfg.clone();
        if shown.api_token.is_some() {
            shown.api_token = Some("********".to_string());
        }
        println!("📄 Current configuration:\n");
        print!("{}", shown.to_yaml()?);
    }
    Ok(())
}
