//! CLI module graph and command dispatch.

pub mod categories;
pub mod check;
pub mod command;
pub mod scan;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use command::{Cli, Commands};

/// Load the configuration named by `--config` (or the default file) and
/// apply `--exchange`.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(exchange) = cli.exchange {
        config.select_exchange(exchange.into());
    }
    Ok(config)
}

/// Run the selected subcommand.
pub async fn dispatch(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Scan(args) => scan::execute(args, config).await,
        Commands::Check(args) => check::execute(args, config).await,
        Commands::Categories => {
            categories::execute(config);
            Ok(())
        }
    }
}
