//! Handler for the `check` command.

use serde_json::json;

use super::command::CheckArgs;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::exchange::ExchangeFactory;

/// Execute the check command and print the verdict as JSON.
pub async fn execute(args: &CheckArgs, config: &Config) -> Result<()> {
    let analyzer = ExchangeFactory::create_analyzer(config);
    analyzer.categories().rule(&args.category)?;

    let is_first = analyzer
        .is_first_filing(&args.scrip, &args.category, args.date, args.lookback_years, None)
        .await;
    let filing = if args.enrich {
        analyzer.enrich_filing_data(&args.scrip, args.date, None).await
    } else {
        None
    };

    let payload = json!({
        "command": "check",
        "exchange": analyzer.exchange_name(),
        "scrip_code": args.scrip,
        "category": args.category,
        "date": args.date,
        "lookback_years": args.lookback_years,
        "is_first_filing": is_first,
        "failed_checks": analyzer.failed_checks(),
        "filing": filing,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
