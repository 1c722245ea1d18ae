//! Command-line interface definitions.
//!
//! Defines the CLI structure for the first-filings application using `clap`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::application::DEFAULT_LOOKBACK_YEARS;
use crate::domain::Period;
use crate::infrastructure::config::settings::Exchange;

/// Accepted `--date` formats.
const DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%Y-%m-%d"];

/// Detect first-ever corporate filings on Indian stock exchanges
#[derive(Parser, Debug)]
#[command(name = "first-filings")]
#[command(version)]
pub struct Cli {
    /// Configuration file [default: first-filings.toml if present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Exchange to query, overriding the configuration file
    #[arg(long, global = true, value_enum)]
    pub exchange: Option<ExchangeArg>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a period for first filings, print the report and archive it
    Scan(ScanArgs),

    /// Check whether one filing is the first of its category
    Check(CheckArgs),

    /// List the configured category labels
    Categories,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Reference date (DD-MM-YYYY or YYYY-MM-DD) [default: today]
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Period ending at the reference date
    #[arg(long, value_enum, default_value = "day")]
    pub period: PeriodArg,

    /// Years of history searched for earlier filings
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_YEARS)]
    pub lookback_years: u32,

    /// Scan only this category label (repeatable)
    #[arg(long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,

    /// Do not append the report to the archive
    #[arg(long)]
    pub no_archive: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Scrip code (BSE) or symbol (NSE)
    #[arg(long)]
    pub scrip: String,

    /// Category label
    #[arg(long, value_name = "LABEL")]
    pub category: String,

    /// Filing date (DD-MM-YYYY or YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Years of history searched for earlier filings
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_YEARS)]
    pub lookback_years: u32,

    /// Also resolve symbol, prices and market cap
    #[arg(long)]
    pub enrich: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExchangeArg {
    Bse,
    Nse,
}

impl From<ExchangeArg> for Exchange {
    fn from(arg: ExchangeArg) -> Self {
        match arg {
            ExchangeArg::Bse => Self::Bse,
            ExchangeArg::Nse => Self::Nse,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    /// The reference date only
    Day,
    /// Week to date
    Wtd,
    /// Month to date
    Mtd,
    /// Quarter to date
    Qtd,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Day => Self::Day,
            PeriodArg::Wtd => Self::Wtd,
            PeriodArg::Mtd => Self::Mtd,
            PeriodArg::Qtd => Self::Qtd,
        }
    }
}

/// Parse `DD-MM-YYYY` or `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw.trim(), fmt).ok())
        .ok_or_else(|| format!("invalid date {raw:?}, expected DD-MM-YYYY or YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_date_formats_parse() {
        let expected = NaiveDate::from_ymd_opt(2025, 2, 20);
        assert_eq!(parse_date("20-02-2025").ok(), expected);
        assert_eq!(parse_date("2025-02-20").ok(), expected);
        assert!(parse_date("02/20/2025").is_err());
    }

    #[test]
    fn scan_defaults() {
        let cli = Cli::try_parse_from(["first-filings", "scan"]).unwrap();
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.date, None);
        assert_eq!(args.period, PeriodArg::Day);
        assert_eq!(args.lookback_years, 15);
        assert!(args.categories.is_empty());
        assert!(!args.no_archive);
    }

    #[test]
    fn scan_with_repeated_categories_and_global_flags() {
        let cli = Cli::try_parse_from([
            "first-filings",
            "scan",
            "--period",
            "qtd",
            "--category",
            "PPT",
            "--category",
            "Press Release",
            "--exchange",
            "nse",
            "--config",
            "custom.toml",
            "--no-archive",
        ])
        .unwrap();

        assert_eq!(cli.exchange, Some(ExchangeArg::Nse));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(Period::from(args.period), Period::Qtd);
        assert_eq!(args.categories, ["PPT", "Press Release"]);
        assert!(args.no_archive);
    }

    #[test]
    fn check_requires_scrip_category_and_date() {
        assert!(Cli::try_parse_from(["first-filings", "check", "--scrip", "500001"]).is_err());

        let cli = Cli::try_parse_from([
            "first-filings",
            "check",
            "--scrip",
            "500001",
            "--category",
            "PPT",
            "--date",
            "01-01-2023",
            "--lookback-years",
            "2",
            "--enrich",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(args.lookback_years, 2);
        assert!(args.enrich);
    }
}
