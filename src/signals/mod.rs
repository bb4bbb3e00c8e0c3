//! Signal engine: 4-week changes, threshold flags, score aggregation, regime.
//!
//! Everything here is a pure, stateless transformation of the acquisition
//! map. Retries and fallbacks live in `data`; a missing or short series shows
//! up here only as `None` and degrades to a caution flag, never an error.

use std::collections::HashMap;

use crate::domain::{
    DashConfig, Flag, FlagRule, MetricRow, Series, Trend, ValueFormat, METRICS, REGIME_BANDS,
};

/// Output of one dashboard computation: table rows plus the two scalars.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub rows: Vec<MetricRow>,
    pub total_score: u32,
    pub regime: &'static str,
}

/// Percent change over the last `window` observations.
///
/// `None` when the series has fewer than `window` points or the window's
/// first value is zero or non-finite.
pub fn pct_change_4w(series: &Series, window: usize) -> Option<f64> {
    if window < 2 || series.len() < window {
        return None;
    }
    let recent = series.tail(window);
    let (_, first) = recent[0];
    let (_, last) = recent[recent.len() - 1];
    if first == 0.0 || !first.is_finite() || !last.is_finite() {
        return None;
    }
    Some((last - first) / first * 100.0)
}

/// HY OAS level (percent): <4 green, 4–6 yellow, >6 red. Missing data is
/// treated as caution, not silently green.
pub fn flag_hy_oas(value: Option<f64>) -> Flag {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return Flag::Yellow;
    };
    if v < 4.0 {
        Flag::Green
    } else if v <= 6.0 {
        Flag::Yellow
    } else {
        Flag::Red
    }
}

/// VIX level: <20 green, 20–30 yellow, >30 red.
pub fn flag_vix(value: Option<f64>) -> Flag {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return Flag::Yellow;
    };
    if v < 20.0 {
        Flag::Green
    } else if v <= 30.0 {
        Flag::Yellow
    } else {
        Flag::Red
    }
}

/// 4-week percent change: >=-2% green, -6%..-2% yellow, <-6% red.
pub fn flag_etf_4w(pct: Option<f64>) -> Flag {
    let Some(p) = pct.filter(|p| p.is_finite()) else {
        return Flag::Yellow;
    };
    if p >= -2.0 {
        Flag::Green
    } else if p >= -6.0 {
        Flag::Yellow
    } else {
        Flag::Red
    }
}

/// Trend direction from the 4-week change: >+2% up, <-2% down, else flat.
pub fn trend_arrow(pct: Option<f64>) -> Trend {
    let Some(p) = pct.filter(|p| p.is_finite()) else {
        return Trend::NoData;
    };
    if p > 2.0 {
        Trend::Up
    } else if p < -2.0 {
        Trend::Down
    } else {
        Trend::Flat
    }
}

/// Map a total score to its regime label via the fixed ordered bands.
///
/// The bands are contiguous over the full score range, so the `"Unknown"`
/// fallback is unreachable in practice.
pub fn regime_label(score: u32) -> &'static str {
    for &(lo, hi, label) in &REGIME_BANDS {
        if score >= lo && score <= hi {
            return label;
        }
    }
    "Unknown"
}

/// Build the full dashboard from the acquisition map.
///
/// Iterates the static metric table in declaration order; each row degrades
/// independently when its series is missing or too short.
pub fn build_dashboard(data: &HashMap<String, Series>, config: &DashConfig) -> Dashboard {
    let mut rows = Vec::with_capacity(METRICS.len());
    let mut total_score = 0u32;

    for spec in &METRICS {
        let series = data.get(spec.key);
        let current = series.and_then(|s| s.latest()).filter(|v| v.is_finite());
        let pct_4w = series.and_then(|s| pct_change_4w(s, config.window));

        let flag = match spec.rule {
            FlagRule::HyOas => flag_hy_oas(current),
            FlagRule::Vix => flag_vix(current),
            FlagRule::Etf4w => flag_etf_4w(pct_4w),
        };
        total_score += flag.score();

        rows.push(MetricRow {
            section: spec.section,
            name: spec.display_name,
            current: fmt_current(current, spec.format),
            trend: trend_arrow(pct_4w),
            flag,
            notes: spec.note,
        });
    }

    Dashboard {
        rows,
        total_score,
        regime: regime_label(total_score),
    }
}

fn fmt_current(value: Option<f64>, format: ValueFormat) -> String {
    let Some(v) = value else {
        return "—".to_string();
    };
    match format {
        ValueFormat::TwoDecimals => format!("{v:.2}"),
        ValueFormat::Thousands => fmt_thousands(v),
    }
}

/// Zero-decimal rendering with thousands separators, e.g. `6,734,210`.
fn fmt_thousands(v: f64) -> String {
    let rounded = v.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    let first_group = digits.len() % 3;
    let first_group = if first_group == 0 { 3 } else { first_group };
    out.push_str(&digits[..first_group]);
    let mut rest = &digits[first_group..];
    while !rest.is_empty() {
        out.push(',');
        out.push_str(&rest[..3]);
        rest = &rest[3..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series_of(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| (start + chrono::Duration::days(i as i64), *v))
            .collect();
        Series::new(points)
    }

    /// 20 points rising linearly from 100 to 110.
    fn rising_20() -> Series {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + 10.0 * i as f64 / 19.0).collect();
        series_of(&values)
    }

    fn full_data(values_for_all: &[f64]) -> HashMap<String, Series> {
        let mut data = HashMap::new();
        for spec in &METRICS {
            data.insert(spec.key.to_string(), series_of(values_for_all));
        }
        data
    }

    #[test]
    fn pct_change_4w_on_exact_window() {
        let pct = pct_change_4w(&rising_20(), 20).unwrap();
        assert!((pct - 10.0).abs() < 1e-9, "expected 10.0, got {pct}");
    }

    #[test]
    fn pct_change_4w_short_series_is_none() {
        let values: Vec<f64> = (0..19).map(|i| 100.0 + i as f64).collect();
        assert_eq!(pct_change_4w(&series_of(&values), 20), None);
        assert_eq!(pct_change_4w(&Series::empty(), 20), None);
    }

    #[test]
    fn pct_change_4w_zero_base_is_none() {
        let mut values = vec![0.0];
        values.extend((1..20).map(|i| i as f64));
        assert_eq!(pct_change_4w(&series_of(&values), 20), None);
    }

    #[test]
    fn hy_oas_thresholds() {
        assert_eq!(flag_hy_oas(Some(3.9)), Flag::Green);
        assert_eq!(flag_hy_oas(Some(4.0)), Flag::Yellow);
        assert_eq!(flag_hy_oas(Some(6.0)), Flag::Yellow);
        assert_eq!(flag_hy_oas(Some(6.1)), Flag::Red);
        assert_eq!(flag_hy_oas(None), Flag::Yellow);
    }

    #[test]
    fn vix_thresholds() {
        assert_eq!(flag_vix(Some(19.9)), Flag::Green);
        assert_eq!(flag_vix(Some(20.0)), Flag::Yellow);
        assert_eq!(flag_vix(Some(30.0)), Flag::Yellow);
        assert_eq!(flag_vix(Some(30.1)), Flag::Red);
        assert_eq!(flag_vix(None), Flag::Yellow);
    }

    #[test]
    fn etf_4w_thresholds() {
        assert_eq!(flag_etf_4w(Some(-1.9)), Flag::Green);
        assert_eq!(flag_etf_4w(Some(-2.0)), Flag::Green);
        assert_eq!(flag_etf_4w(Some(-2.1)), Flag::Yellow);
        assert_eq!(flag_etf_4w(Some(-6.0)), Flag::Yellow);
        assert_eq!(flag_etf_4w(Some(-6.1)), Flag::Red);
        assert_eq!(flag_etf_4w(None), Flag::Yellow);
    }

    #[test]
    fn trend_arrow_directions() {
        assert_eq!(trend_arrow(Some(2.1)), Trend::Up);
        assert_eq!(trend_arrow(Some(-2.1)), Trend::Down);
        assert_eq!(trend_arrow(Some(0.0)), Trend::Flat);
        assert_eq!(trend_arrow(None), Trend::NoData);
    }

    #[test]
    fn regime_bands_partition_score_range() {
        for score in 0..=18u32 {
            let matches = REGIME_BANDS
                .iter()
                .filter(|(lo, hi, _)| score >= *lo && score <= *hi)
                .count();
            assert_eq!(matches, 1, "score {score} matched {matches} bands");
        }
        assert_eq!(regime_label(0), "Expansion");
        assert_eq!(regime_label(4), "Expansion");
        assert_eq!(regime_label(5), "Late Cycle");
        assert_eq!(regime_label(8), "Late Cycle");
        assert_eq!(regime_label(9), "Stress Building");
        assert_eq!(regime_label(14), "Stress Building");
        assert_eq!(regime_label(15), "Crisis");
        assert_eq!(regime_label(18), "Crisis");
    }

    #[test]
    fn all_missing_data_defaults_every_flag_to_yellow() {
        let data = HashMap::new();
        let dash = build_dashboard(&data, &DashConfig::default());
        assert_eq!(dash.rows.len(), 9);
        for row in &dash.rows {
            assert_eq!(row.flag, Flag::Yellow);
            assert_eq!(row.current, "—");
            assert_eq!(row.trend, Trend::NoData);
        }
        assert_eq!(dash.total_score, 9);
        assert_eq!(dash.regime, regime_label(9));
    }

    #[test]
    fn crisis_scenario_scores_eighteen() {
        // HY OAS at 7.0, VIX at 35, every ETF-style series down 7% over the window.
        let falling: Vec<f64> = (0..20).map(|i| 100.0 - 7.0 * i as f64 / 19.0).collect();
        let mut data = full_data(&falling);
        data.insert("BAMLH0A0HYM2".to_string(), series_of(&[7.0; 20]));
        data.insert("^VIX".to_string(), series_of(&[35.0; 20]));

        let dash = build_dashboard(&data, &DashConfig::default());
        for row in &dash.rows {
            assert_eq!(row.flag, Flag::Red, "expected Red for {}", row.name);
        }
        assert_eq!(dash.total_score, 18);
        assert_eq!(dash.regime, "Crisis");
    }

    #[test]
    fn rows_follow_metric_declaration_order() {
        let dash = build_dashboard(&HashMap::new(), &DashConfig::default());
        let names: Vec<&str> = dash.rows.iter().map(|r| r.name).collect();
        let expected: Vec<&str> = METRICS.iter().map(|m| m.display_name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn walcl_formats_with_thousands_separators() {
        let values = vec![6_734_210.4; 20];
        let mut data = HashMap::new();
        data.insert("WALCL".to_string(), series_of(&values));
        let dash = build_dashboard(&data, &DashConfig::default());
        let walcl = dash
            .rows
            .iter()
            .find(|r| r.name == "Fed Balance Sheet (WALCL)")
            .unwrap();
        assert_eq!(walcl.current, "6,734,210");
        assert_eq!(walcl.notes, "4W % chg");
    }

    #[test]
    fn fmt_thousands_edge_cases() {
        assert_eq!(fmt_thousands(0.0), "0");
        assert_eq!(fmt_thousands(999.0), "999");
        assert_eq!(fmt_thousands(1000.0), "1,000");
        assert_eq!(fmt_thousands(-12345.6), "-12,346");
    }

    #[test]
    fn two_decimal_formatting_for_prices() {
        let values = vec![78.125; 20];
        let mut data = HashMap::new();
        data.insert("HYG".to_string(), series_of(&values));
        let dash = build_dashboard(&data, &DashConfig::default());
        let hyg = dash.rows.iter().find(|r| r.name == "HYG").unwrap();
        assert_eq!(hyg.current, "78.13");
    }
}
