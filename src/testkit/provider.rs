//! Scripted BSE and NSE transports.
//!
//! These stand in for the HTTP APIs so the real clients' pagination,
//! filtering and normalization run against canned payloads.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde_json::Value;

use crate::adapter::outbound::bse::dto::{
    BseAnnouncement, CurrentRate, PriceHistory, PriceSeries, QuoteHeader, ScripHeader, TradingInfo,
};
use crate::adapter::outbound::bse::BseApi;
use crate::adapter::outbound::nse::dto::{
    EquityQuote, HistoricalRow, NseAnnouncement, PriceInfo, QuoteInfo, SecurityInfo,
};
use crate::adapter::outbound::nse::NseApi;
use crate::error::{Error, Result};
use crate::port::{FeedQuery, Page, PageSource};

fn not_found<T>() -> Result<T> {
    Err(Error::status(404, "Not Found"))
}

/// A BSE record with subject, headline and `DT_TM`.
pub fn bse_record(scrip_code: &str, subject: &str, headline: &str, timestamp: &str) -> BseAnnouncement {
    BseAnnouncement {
        scrip_code: Some(scrip_code.to_string()),
        company_name: Some(format!("Company {scrip_code}")),
        subject: Some(subject.to_string()),
        headline: Some(headline.to_string()),
        timestamp: Some(timestamp.to_string()),
        ..Default::default()
    }
}

/// An NSE record with subject and `an_dt`.
pub fn nse_record(symbol: &str, subject: &str, announced_at: &str) -> NseAnnouncement {
    NseAnnouncement {
        symbol: Some(symbol.to_string()),
        company_name: Some(format!("{symbol} Limited")),
        subject: Some(subject.to_string()),
        announced_at: Some(announced_at.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// BSE
// ---------------------------------------------------------------------------

/// Announcement pages scripted per subcategory; enrichment endpoints answer
/// with whatever was configured, or 404 when nothing was.
#[derive(Default)]
pub struct ScriptedBseApi {
    pages: Mutex<HashMap<String, VecDeque<Result<Page<BseAnnouncement>>>>>,
    requested: Mutex<Vec<(String, u32)>>,
    scrip_filters: Mutex<Vec<Option<String>>>,
    header: Option<ScripHeader>,
    quote: Option<QuoteHeader>,
    trading: Option<TradingInfo>,
    history: Option<PriceHistory>,
}

impl ScriptedBseApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, subcategory: &str, records: Vec<BseAnnouncement>, total_count: Option<u64>) -> Self {
        self.pages
            .lock()
            .entry(subcategory.to_string())
            .or_default()
            .push_back(Ok(Page::new(records, total_count)));
        self
    }

    pub fn fail(self, subcategory: &str, error: Error) -> Self {
        self.pages
            .lock()
            .entry(subcategory.to_string())
            .or_default()
            .push_back(Err(error));
        self
    }

    pub fn header(mut self, symbol: &str, company_name: &str) -> Self {
        self.header = Some(ScripHeader {
            symbol: Some(symbol.to_string()),
            company_name: Some(company_name.to_string()),
        });
        self
    }

    pub fn quote(mut self, last_traded_price: Value) -> Self {
        self.quote = Some(QuoteHeader {
            current_rate: Some(CurrentRate {
                last_traded_price: Some(last_traded_price),
            }),
        });
        self
    }

    /// Market cap in crore, as BSE formats it.
    pub fn trading(mut self, market_cap_full: &str) -> Self {
        self.trading = Some(TradingInfo {
            market_cap_full: Some(market_cap_full.to_string()),
        });
        self
    }

    pub fn history(mut self, rows: Vec<Vec<Value>>) -> Self {
        self.history = Some(PriceHistory {
            data: Some(PriceSeries { data: rows }),
        });
        self
    }

    /// `(subcategory, page)` per announcement request, in order.
    pub fn requested(&self) -> Vec<(String, u32)> {
        self.requested.lock().clone()
    }

    pub fn scrip_filters(&self) -> Vec<Option<String>> {
        self.scrip_filters.lock().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedBseApi {
    type Record = BseAnnouncement;

    async fn fetch_page(&self, query: &FeedQuery<'_>, page_no: u32) -> Result<Page<BseAnnouncement>> {
        self.requested
            .lock()
            .push((query.subcategory.to_string(), page_no));
        self.scrip_filters
            .lock()
            .push(query.scrip_code.map(str::to_string));
        self.pages
            .lock()
            .get_mut(query.subcategory)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(Page::new(Vec::new(), None)))
    }
}

#[async_trait]
impl BseApi for ScriptedBseApi {
    async fn scrip_header(&self, _scrip_code: &str) -> Result<ScripHeader> {
        self.header.clone().map_or_else(not_found, Ok)
    }

    async fn quote(&self, _scrip_code: &str) -> Result<QuoteHeader> {
        self.quote.clone().map_or_else(not_found, Ok)
    }

    async fn trading_info(&self, _scrip_code: &str) -> Result<TradingInfo> {
        self.trading.clone().map_or_else(not_found, Ok)
    }

    async fn price_history(&self, _scrip_code: &str) -> Result<PriceHistory> {
        self.history.clone().map_or_else(not_found, Ok)
    }
}

// ---------------------------------------------------------------------------
// NSE
// ---------------------------------------------------------------------------

/// One scripted response per announcement request; quote and history
/// answer 404 unless configured.
#[derive(Default)]
pub struct ScriptedNseApi {
    responses: Mutex<VecDeque<Result<Vec<NseAnnouncement>>>>,
    scrip_filters: Mutex<Vec<Option<String>>>,
    quote: Option<EquityQuote>,
    closing_price: Option<Value>,
}

impl ScriptedNseApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, records: Vec<NseAnnouncement>) -> Self {
        self.responses.lock().push_back(Ok(records));
        self
    }

    pub fn fail(self, error: Error) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn quote(mut self, company_name: &str, last_price: Value, issued_size: Value) -> Self {
        self.quote = Some(EquityQuote {
            info: QuoteInfo {
                symbol: None,
                company_name: Some(company_name.to_string()),
            },
            price_info: PriceInfo {
                last_price: Some(last_price),
            },
            security_info: SecurityInfo {
                issued_size: Some(issued_size),
            },
        });
        self
    }

    /// Closing price returned for any date.
    pub fn history(mut self, closing_price: Value) -> Self {
        self.closing_price = Some(closing_price);
        self
    }

    pub fn call_count(&self) -> usize {
        self.scrip_filters.lock().len()
    }

    pub fn scrip_filters(&self) -> Vec<Option<String>> {
        self.scrip_filters.lock().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedNseApi {
    type Record = NseAnnouncement;

    async fn fetch_page(&self, query: &FeedQuery<'_>, _page_no: u32) -> Result<Page<NseAnnouncement>> {
        self.scrip_filters
            .lock()
            .push(query.scrip_code.map(str::to_string));
        let records = self.responses.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))?;
        Ok(Page::new(records, None))
    }
}

#[async_trait]
impl NseApi for ScriptedNseApi {
    async fn quote(&self, _symbol: &str) -> Result<EquityQuote> {
        self.quote.clone().map_or_else(not_found, Ok)
    }

    async fn historical(&self, _symbol: &str, date: NaiveDate) -> Result<Vec<HistoricalRow>> {
        let closing_price = self.closing_price.clone().ok_or_else(|| Error::status(404, "Not Found"))?;
        Ok(vec![HistoricalRow {
            closing_price: Some(closing_price),
            timestamp: Some(date.format("%Y-%m-%d").to_string()),
        }])
    }
}
