//! Formatted terminal output for the one-shot report.
//!
//! We keep formatting code in one place so:
//! - the data/signal code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{MetricRow, Section};

/// Format the full dashboard: summary header, then the five sections.
pub fn format_dashboard(
    rows: &[MetricRow],
    total_score: u32,
    regime: &str,
    fred_key_configured: bool,
) -> String {
    let mut out = String::new();

    out.push_str("=== Macro Risk Dashboard ===\n");
    out.push_str(&format!("Total Risk Score: {total_score}\n"));
    out.push_str(&format!("Regime Label: {regime}\n"));
    if fred_key_configured {
        out.push_str("FRED API: configured\n");
    } else {
        out.push_str(
            "FRED API: not set — HY OAS & WALCL may be blank. \
             Set FRED_API_KEY in the environment or .env.\n",
        );
    }
    out.push('\n');

    for section in Section::ALL {
        out.push_str(&format!("{}\n", section.display_name()));
        out.push_str(&format_section_table(rows, section));
        out.push('\n');
    }

    out.trim_end().to_string()
}

fn format_section_table(rows: &[MetricRow], section: Section) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<26} {:>12} {:>9} {:<7} {:<10}\n",
        "Metric", "Current", "4W Trend", "Flag", "Notes"
    ));
    out.push_str(&format!(
        "{:-<26} {:-<12} {:-<9} {:-<7} {:-<10}\n",
        "", "", "", "", ""
    ));

    for row in rows.iter().filter(|r| r.section == section) {
        out.push_str(
            format!(
                "{:<26} {:>12} {:>9} {:<7} {:<10}",
                truncate(row.name, 26),
                row.current,
                row.trend.arrow(),
                row.flag.label(),
                row.notes,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
