//! Data acquisition: FRED series, market tickers, and the TTL memo.
//!
//! `DataFeed` is the single entry point the render path uses. It owns the
//! HTTP clients and the cache, so repeated renders inside the TTL window do
//! not touch the network and the refresh key can invalidate everything at
//! once.

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::{DashConfig, Series, FRED_SERIES, MARKET_TICKERS};
use crate::error::AppError;

pub mod cache;
pub mod fred;
pub mod market;

pub use cache::TtlCache;
pub use fred::FredClient;
pub use market::MarketClient;

pub struct DataFeed {
    fred: FredClient,
    market: MarketClient,
    cache: TtlCache,
    lookback_days: i64,
}

impl DataFeed {
    pub fn from_env(config: &DashConfig) -> Result<Self, AppError> {
        Ok(Self {
            fred: FredClient::from_env()?,
            market: MarketClient::new()?,
            cache: TtlCache::new(Duration::from_secs(config.cache_ttl_secs)),
            lookback_days: config.lookback_days,
        })
    }

    /// Whether the FRED API key is configured (for the status banner).
    pub fn fred_key_configured(&self) -> bool {
        self.fred.api_key_configured()
    }

    /// The full identifier → series map for one render.
    ///
    /// Each identifier is memoized separately, so a refresh mid-window only
    /// refetches what the TTL has already expired. Fetch failures land in the
    /// map as empty series; the map always has all nine keys.
    pub fn snapshot(&mut self) -> HashMap<String, Series> {
        let mut data = HashMap::with_capacity(FRED_SERIES.len() + MARKET_TICKERS.len());

        for series_id in FRED_SERIES {
            let series = match self.cache.get(series_id) {
                Some(series) => series,
                None => {
                    let series = self.fred.fetch_series(series_id);
                    self.cache.put(series_id, series.clone());
                    series
                }
            };
            data.insert(series_id.to_string(), series);
        }

        let missing: Vec<&str> = MARKET_TICKERS
            .iter()
            .copied()
            .filter(|t| self.cache.get(t).is_none())
            .collect();
        let fetched = self.market.fetch_all(&missing, self.lookback_days);
        for (ticker, series) in fetched {
            self.cache.put(&ticker, series);
        }
        for ticker in MARKET_TICKERS {
            let series = self.cache.get(ticker).unwrap_or_else(Series::empty);
            data.insert(ticker.to_string(), series);
        }

        data
    }

    /// Manual refresh: drop the memo wholesale and refetch everything.
    pub fn refresh(&mut self) -> HashMap<String, Series> {
        self.cache.clear();
        self.snapshot()
    }
}
