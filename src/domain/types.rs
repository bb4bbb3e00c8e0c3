//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory while building the dashboard
//! - rendered either as plain text (`report`) or in the TUI
//! - recomputed from scratch on every render (nothing is persisted)

use chrono::NaiveDate;

/// An ordered, date-indexed sequence of numeric observations for one symbol.
///
/// Invariant: observations are sorted ascending by date. A `Series` may be
/// empty (every fetch failure degrades to one) but is never "null" — the
/// dashboard renders blanks rather than crashing.
#[derive(Debug, Clone, Default)]
pub struct Series {
    points: Vec<(NaiveDate, f64)>,
}

impl Series {
    /// Build a series from unordered observations; sorts ascending by date.
    pub fn new(mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.sort_by_key(|(d, _)| *d);
        Self { points }
    }

    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observation value, if any.
    pub fn latest(&self) -> Option<f64> {
        self.points.last().map(|(_, v)| *v)
    }

    /// The last `n` observations (all of them if the series is shorter).
    pub fn tail(&self, n: usize) -> &[(NaiveDate, f64)] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }
}

/// Three-level metric classification. The numeric score is what the
/// aggregate sums: Green=0, Yellow=1, Red=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Flag {
    Green,
    Yellow,
    Red,
}

impl Flag {
    pub fn score(self) -> u32 {
        match self {
            Flag::Green => 0,
            Flag::Yellow => 1,
            Flag::Red => 2,
        }
    }

    /// Human-readable label for table output.
    pub fn label(self) -> &'static str {
        match self {
            Flag::Green => "Green",
            Flag::Yellow => "Yellow",
            Flag::Red => "Red",
        }
    }
}

/// Direction of the 4-week change.
///
/// `NoData` is deliberately distinct from `Flat`: a missing window must not
/// masquerade as a sideways market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
    NoData,
}

impl Trend {
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Flat => "→",
            Trend::NoData => "—",
        }
    }
}

/// Which threshold family classifies a metric.
///
/// The rule set is closed (three families), so a plain enum beats dynamic
/// dispatch here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagRule {
    /// Absolute level of a credit spread (percent): <4 green, 4–6 yellow, >6 red.
    HyOas,
    /// Absolute level of a volatility index: <20 green, 20–30 yellow, >30 red.
    Vix,
    /// 4-week percent change: >=-2 green, -6..-2 yellow, <-6 red.
    Etf4w,
}

/// How the current value is formatted in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Two decimal places (prices, spreads, index levels).
    TwoDecimals,
    /// Thousands separators, zero decimals (the Fed balance sheet, $M).
    Thousands,
}

/// Thematic table section, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    CreditRisk,
    Volatility,
    LiquidityDollar,
    RatesGrowth,
    TailRisk,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::CreditRisk,
        Section::Volatility,
        Section::LiquidityDollar,
        Section::RatesGrowth,
        Section::TailRisk,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Section::CreditRisk => "Credit Risk",
            Section::Volatility => "Volatility",
            Section::LiquidityDollar => "Liquidity/Dollar",
            Section::RatesGrowth => "Rates & Growth",
            Section::TailRisk => "Tail Risk",
        }
    }
}

/// Static configuration for one dashboard metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub section: Section,
    pub display_name: &'static str,
    /// FRED series id or market ticker; the key into the acquisition map.
    pub key: &'static str,
    pub rule: FlagRule,
    pub format: ValueFormat,
    pub note: &'static str,
}

/// One row of the rendered table. Derived entirely from a `Series` and a
/// `MetricSpec`; recomputed every run.
#[derive(Debug, Clone)]
pub struct MetricRow {
    pub section: Section,
    pub name: &'static str,
    pub current: String,
    pub trend: Trend,
    pub flag: Flag,
    pub notes: &'static str,
}

/// Run configuration derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashConfig {
    /// Trailing window of daily market history to request.
    pub lookback_days: i64,
    /// Observations in the "4-week" change window (~20 trading days).
    pub window: usize,
    /// Wall-clock memoization window for fetched series.
    pub cache_ttl_secs: u64,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            window: 20,
            cache_ttl_secs: 900,
        }
    }
}
