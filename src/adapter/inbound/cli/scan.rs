//! Handler for the `scan` command.

use chrono::Local;
use tracing::info;

use super::command::ScanArgs;
use crate::adapter::outbound::archive::JsonArchive;
use crate::application::ScanRequest;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::exchange::ExchangeFactory;

/// Execute the scan command: print the report, then archive it.
pub async fn execute(args: &ScanArgs, config: &Config) -> Result<()> {
    let request = request(args);
    let scanner = ExchangeFactory::create_scanner(config);
    let report = scanner.scan(&request).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if args.no_archive {
        info!("Archiving disabled");
        return Ok(());
    }
    JsonArchive::new(&config.output.archive).append(&report)?;
    Ok(())
}

fn request(args: &ScanArgs) -> ScanRequest {
    let reference_date = args.date.unwrap_or_else(|| Local::now().date_naive());
    ScanRequest {
        reference_date,
        period: args.period.into(),
        lookback_years: args.lookback_years,
        categories: (!args.categories.is_empty()).then(|| args.categories.clone()),
    }
}
