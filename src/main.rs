use clap::Parser;
use first_filings::adapter::inbound::cli::{self, command::Cli};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match cli::load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.logging.init() {
        eprintln!("Failed to initialise logging: {e}");
        std::process::exit(1);
    }
    info!(exchange = %config.exchange.exchange(), "first-filings starting");

    if let Err(e) = cli::dispatch(&cli.command, &config).await {
        error!(error = %e, "Fatal error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
