//! FRED integration for the dashboard's macro series.
//!
//! Three fetch paths, tried in order until one yields observations:
//!
//! 1. the authenticated JSON observations API (only when a key is configured)
//! 2. the public `fredgraph.csv` download
//! 3. a third-party mirror CSV endpoint
//!
//! Every failure mode (transport, auth, malformed or empty payload) degrades
//! to an empty `Series` so the dashboard renders with blanks instead of
//! crashing.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::Series;
use crate::error::AppError;

const API_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const GRAPH_CSV_URL: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";
const MIRROR_CSV_URL: &str = "https://www.ivo-welch.info/cgi-bin/fredwrap";

const USER_AGENT: &str = "MacroRiskDashboard/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct FredClient {
    client: Client,
    api_key: Option<String>,
}

impl FredClient {
    /// Build a client from the environment.
    ///
    /// `FRED_API_KEY` is optional: its absence only removes the authenticated
    /// fetch path, it is not an error.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, api_key })
    }

    /// Whether the authenticated API path is available (for the banner).
    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch one series, walking the fallback chain. Never fails: any path
    /// that errors or comes back empty just hands off to the next one.
    pub fn fetch_series(&self, series_id: &str) -> Series {
        if let Some(key) = self.api_key.clone() {
            if let Ok(series) = self.fetch_via_api(series_id, &key) {
                if !series.is_empty() {
                    return series;
                }
            }
        }

        let graph_url = format!("{GRAPH_CSV_URL}?id={series_id}");
        if let Ok(series) = self.fetch_csv(&graph_url) {
            if !series.is_empty() {
                return series;
            }
        }

        let mirror_url = format!("{MIRROR_CSV_URL}?symbol={series_id}");
        if let Ok(series) = self.fetch_csv(&mirror_url) {
            if !series.is_empty() {
                return series;
            }
        }

        Series::empty()
    }

    fn fetch_via_api(&self, series_id: &str, api_key: &str) -> Result<Series, AppError> {
        let resp = self
            .client
            .get(API_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", api_key),
                ("file_type", "json"),
            ])
            .send()
            .map_err(|e| AppError::new(4, format!("FRED request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("FRED request failed with status {}.", resp.status()),
            ));
        }

        let body: ObservationsResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse FRED response: {e}")))?;

        Ok(observations_to_series(&body.observations))
    }

    fn fetch_csv(&self, url: &str) -> Result<Series, AppError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::new(4, format!("FRED CSV request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("FRED CSV request failed with status {}.", resp.status()),
            ));
        }

        let text = resp
            .text()
            .map_err(|e| AppError::new(4, format!("Failed to read FRED CSV body: {e}")))?;

        Ok(parse_fred_csv(&text))
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

fn observations_to_series(observations: &[Observation]) -> Series {
    let mut points = Vec::with_capacity(observations.len());
    for obs in observations {
        let Some(value) = parse_value(&obs.value) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d") else {
            continue;
        };
        points.push((date, value));
    }
    Series::new(points)
}

/// Parse FRED-style CSV: a header row (first column is the date), then
/// `DATE,VALUE` rows. Rows with a missing (`"."`) or unparseable value are
/// skipped; a payload without a date header parses to an empty series.
pub fn parse_fred_csv(text: &str) -> Series {
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        return Series::empty();
    };
    if !header.to_ascii_lowercase().contains("date") {
        return Series::empty();
    }

    let mut points = Vec::new();
    for line in lines {
        let mut cols = line.splitn(2, ',');
        let (Some(date_raw), Some(value_raw)) = (cols.next(), cols.next()) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(date_raw.trim(), "%Y-%m-%d") else {
            continue;
        };
        let Some(value) = parse_value(value_raw) else {
            continue;
        };
        points.push((date, value));
    }
    Series::new(points)
}

/// FRED uses `"."` for missing observations.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_handles_missing_marker() {
        assert_eq!(parse_value("4.25"), Some(4.25));
        assert_eq!(parse_value(" 4.25 "), Some(4.25));
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("n/a"), None);
    }

    #[test]
    fn parse_csv_skips_missing_and_malformed_rows() {
        let text = "DATE,BAMLH0A0HYM2\n\
                    2025-06-02,3.11\n\
                    2025-06-03,.\n\
                    not-a-date,4.00\n\
                    2025-06-04,3.25\n";
        let series = parse_fred_csv(text);
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest(), Some(3.25));
    }

    #[test]
    fn parse_csv_requires_date_header() {
        let text = "<html>gateway error</html>\n2025-06-02,3.11\n";
        assert!(parse_fred_csv(text).is_empty());
        assert!(parse_fred_csv("").is_empty());
    }

    #[test]
    fn parse_csv_sorts_out_of_order_rows() {
        let text = "observation_date,WALCL\n\
                    2025-06-11,6700000\n\
                    2025-06-04,6650000\n";
        let series = parse_fred_csv(text);
        assert_eq!(series.latest(), Some(6_700_000.0));
    }

    #[test]
    fn observations_parse_from_api_payload() {
        let payload = r#"{"observations":[
            {"date":"2025-06-02","value":"3.11"},
            {"date":"2025-06-03","value":"."},
            {"date":"2025-06-04","value":"3.25"}
        ]}"#;
        let body: ObservationsResponse = serde_json::from_str(payload).unwrap();
        let series = observations_to_series(&body.observations);
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest(), Some(3.25));
    }
}
