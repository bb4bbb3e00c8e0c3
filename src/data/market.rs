//! Daily closing prices from the Yahoo chart endpoint.
//!
//! One request per ticker for a trailing window of daily bars; only the
//! close column is consumed. A per-symbol failure yields an empty `Series`
//! for that symbol only, so one bad ticker never blanks the others.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::Series;
use crate::error::AppError;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

const USER_AGENT: &str = "Mozilla/5.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct MarketClient {
    client: Client,
}

impl MarketClient {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Daily closes for one symbol over the trailing `lookback_days` window.
    /// Any failure degrades to an empty series.
    pub fn fetch_daily_closes(&self, symbol: &str, lookback_days: i64) -> Series {
        self.try_fetch(symbol, lookback_days)
            .unwrap_or_else(|_| Series::empty())
    }

    /// Fetch several symbols. Each request is independent (separate map
    /// entry, no shared state), so they run in parallel.
    pub fn fetch_all(&self, symbols: &[&str], lookback_days: i64) -> HashMap<String, Series> {
        symbols
            .par_iter()
            .map(|symbol| {
                (
                    symbol.to_string(),
                    self.fetch_daily_closes(symbol, lookback_days),
                )
            })
            .collect()
    }

    fn try_fetch(&self, symbol: &str, lookback_days: i64) -> Result<Series, AppError> {
        let end = Utc::now().timestamp();
        let start = end - lookback_days * 86_400;
        let url = format!("{CHART_URL}/{symbol}");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("interval", "1d"),
                ("period1", &start.to_string()),
                ("period2", &end.to_string()),
            ])
            .send()
            .map_err(|e| AppError::new(4, format!("Market request for {symbol} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Market request for {symbol} failed with status {}.", resp.status()),
            ));
        }

        let body: ChartResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse chart response for {symbol}: {e}")))?;

        Ok(chart_to_series(body))
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Pair timestamps with closes, skipping null bars (holidays, halted
/// sessions) and anything non-finite.
fn chart_to_series(body: ChartResponse) -> Series {
    let Some(result) = body.chart.result.and_then(|r| r.into_iter().next()) else {
        return Series::empty();
    };
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Series::empty();
    };

    let mut points = Vec::with_capacity(result.timestamp.len());
    for (ts, close) in result.timestamp.iter().zip(quote.close.iter()) {
        let Some(close) = close.filter(|c| c.is_finite()) else {
            continue;
        };
        let Some(dt) = DateTime::from_timestamp(*ts, 0) else {
            continue;
        };
        points.push((dt.date_naive(), close));
    }
    Series::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_payload_parses_closes_and_skips_nulls() {
        let payload = r#"{"chart":{"result":[{
            "timestamp":[1749600000,1749686400,1749772800],
            "indicators":{"quote":[{"close":[601.36,null,603.75]}]}
        }]}}"#;
        let body: ChartResponse = serde_json::from_str(payload).unwrap();
        let series = chart_to_series(body);
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest(), Some(603.75));
    }

    #[test]
    fn missing_result_is_empty_series() {
        let payload = r#"{"chart":{"result":null}}"#;
        let body: ChartResponse = serde_json::from_str(payload).unwrap();
        assert!(chart_to_series(body).is_empty());
    }

    #[test]
    fn empty_quote_is_empty_series() {
        let payload = r#"{"chart":{"result":[{
            "timestamp":[],
            "indicators":{"quote":[]}
        }]}}"#;
        let body: ChartResponse = serde_json::from_str(payload).unwrap();
        assert!(chart_to_series(body).is_empty());
    }
}
