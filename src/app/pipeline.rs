//! Shared "render pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch (memoized) -> signal engine -> rows + score + regime
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::collections::HashMap;

use crate::data::DataFeed;
use crate::domain::{DashConfig, MetricRow, Series};
use crate::signals;

/// All computed outputs of a single dashboard run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub data: HashMap<String, Series>,
    pub rows: Vec<MetricRow>,
    pub total_score: u32,
    pub regime: &'static str,
}

/// Fetch (or reuse memoized) data and run the signal engine.
pub fn run_dashboard(feed: &mut DataFeed, config: &DashConfig) -> RunOutput {
    let data = feed.snapshot();
    with_data(data, config)
}

/// Invalidate the memo, refetch, and recompute.
pub fn run_refreshed(feed: &mut DataFeed, config: &DashConfig) -> RunOutput {
    let data = feed.refresh();
    with_data(data, config)
}

fn with_data(data: HashMap<String, Series>, config: &DashConfig) -> RunOutput {
    let dash = signals::build_dashboard(&data, config);
    RunOutput {
        data,
        rows: dash.rows,
        total_score: dash.total_score,
        regime: dash.regime,
    }
}
