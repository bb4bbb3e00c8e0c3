//! Static metric and regime configuration.
//!
//! The metric table is a plain ordered list iterated once per render; the
//! rule set is closed, so no dynamic dispatch is involved.

use crate::domain::{FlagRule, MetricSpec, Section, ValueFormat};

/// FRED series fetched by the dashboard: HY OAS and the Fed balance sheet.
pub const FRED_SERIES: [&str; 2] = ["BAMLH0A0HYM2", "WALCL"];

/// Market tickers fetched by the dashboard (daily closes).
pub const MARKET_TICKERS: [&str; 7] = ["HYG", "JNK", "SPY", "XLF", "KRE", "UUP", "^VIX"];

/// The nine dashboard metrics, in fixed declaration (and display) order.
pub const METRICS: [MetricSpec; 9] = [
    MetricSpec {
        section: Section::CreditRisk,
        display_name: "HY OAS (BAML)",
        key: "BAMLH0A0HYM2",
        rule: FlagRule::HyOas,
        format: ValueFormat::TwoDecimals,
        note: "",
    },
    MetricSpec {
        section: Section::CreditRisk,
        display_name: "HYG",
        key: "HYG",
        rule: FlagRule::Etf4w,
        format: ValueFormat::TwoDecimals,
        note: "",
    },
    MetricSpec {
        section: Section::CreditRisk,
        display_name: "JNK",
        key: "JNK",
        rule: FlagRule::Etf4w,
        format: ValueFormat::TwoDecimals,
        note: "",
    },
    MetricSpec {
        section: Section::Volatility,
        display_name: "VIX",
        key: "^VIX",
        rule: FlagRule::Vix,
        format: ValueFormat::TwoDecimals,
        note: "",
    },
    MetricSpec {
        section: Section::LiquidityDollar,
        display_name: "Fed Balance Sheet (WALCL)",
        key: "WALCL",
        rule: FlagRule::Etf4w,
        format: ValueFormat::Thousands,
        note: "4W % chg",
    },
    MetricSpec {
        section: Section::LiquidityDollar,
        display_name: "UUP (Dollar)",
        key: "UUP",
        rule: FlagRule::Etf4w,
        format: ValueFormat::TwoDecimals,
        note: "",
    },
    MetricSpec {
        section: Section::RatesGrowth,
        display_name: "SPY",
        key: "SPY",
        rule: FlagRule::Etf4w,
        format: ValueFormat::TwoDecimals,
        note: "",
    },
    MetricSpec {
        section: Section::TailRisk,
        display_name: "XLF",
        key: "XLF",
        rule: FlagRule::Etf4w,
        format: ValueFormat::TwoDecimals,
        note: "",
    },
    MetricSpec {
        section: Section::TailRisk,
        display_name: "KRE",
        key: "KRE",
        rule: FlagRule::Etf4w,
        format: ValueFormat::TwoDecimals,
        note: "",
    },
];

/// Regime bands by total score: `(lo, hi, label)`, inclusive on both ends.
/// Contiguous over [0, 18] (the top band is open-ended in practice).
pub const REGIME_BANDS: [(u32, u32, &str); 4] = [
    (0, 4, "Expansion"),
    (5, 8, "Late Cycle"),
    (9, 14, "Stress Building"),
    (15, u32::MAX, "Crisis"),
];

/// Advisory description per metric, keyed by exact display name.
pub fn metric_description(display_name: &str) -> Option<&'static str> {
    let text = match display_name {
        "HY OAS (BAML)" => {
            "ICE BofA US High Yield Option-Adjusted Spread (BAMLH0A0HYM2). \
             Measures high-yield bond spread over Treasuries. Widening signals \
             credit stress and rising default risk; key for systemic risk."
        }
        "Fed Balance Sheet (WALCL)" => {
            "Federal Reserve total assets (WALCL). Reflects QE/QT and liquidity \
             provision. Shrinking can tighten financial conditions and amplify stress."
        }
        "HYG" => {
            "iShares iBoxx High Yield Corporate Bond ETF. Tracks high-yield bond \
             performance. Weakness signals credit repricing and risk-off sentiment; \
             credit risk indicator."
        }
        "JNK" => {
            "SPDR Bloomberg High Yield Bond ETF. Proxy for high-yield credit. \
             Declines indicate credit stress and flight to quality; systemic risk signal."
        }
        "SPY" => {
            "SPDR S&P 500 ETF. Broad US equity market proxy. Used as growth and \
             risk-on indicator; falls signal stress and regime shift."
        }
        "XLF" => {
            "Financial Select Sector SPDR. US financial sector equity proxy. Leading \
             indicator of systemic and tail risk in banking and financial conditions."
        }
        "KRE" => {
            "SPDR S&P Regional Banking ETF. Regional bank equity proxy. Sensitive to \
             funding and credit stress; tail risk and financial stability indicator."
        }
        "UUP (Dollar)" => {
            "Invesco DB US Dollar Index. US dollar strength versus major currencies. \
             Strong dollar can tighten global financial conditions and amplify EM stress."
        }
        "VIX" => {
            "CBOE Volatility Index. Options-implied S&P 500 volatility. Elevation \
             signals fear and stress; key gauge of market and macro risk."
        }
        _ => return None,
    };
    Some(text)
}
