//! Dashboard payload assembly
//!
//! One artifact snapshot in, one complete view model out: normalized series
//! feed the hero summary facts and the chart specs, the merged perp snapshot
//! feeds the composite chart. Everything is recomputed from scratch per
//! load; there is no cache or incremental update.

use serde::Serialize;
use worker::console_log;

use crate::artifacts::ArtifactSnapshot;
use crate::charts::{
    ChartPayload, atr_chart, liquidations_chart, open_interest_chart, perp_snapshot_chart,
    signals_chart,
};
use crate::config::Config;
use crate::merge::{close_lookup, liquidation_lookups, merge_perp_snapshot};
use crate::series::{normalize, summarize, tail};
use crate::types::{Overview, SignalHighlights};

/// All chart payloads for the page
#[derive(Debug, Clone, Serialize)]
pub struct ChartBundle {
    pub atr: ChartPayload,
    pub open_interest: ChartPayload,
    pub liquidations: ChartPayload,
    pub perp_snapshot: ChartPayload,
    pub signals: ChartPayload,
}

/// Complete `/api/dashboard` payload
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPayload {
    pub generated_at: String,
    pub overview: Overview,
    pub charts: ChartBundle,
}

/// Run the normalize → merge → summarize pipeline over one snapshot
pub fn build_dashboard(config: &Config, snapshot: ArtifactSnapshot) -> DashboardPayload {
    let atr = normalize(snapshot.atr.series);
    let open_interest = normalize(snapshot.open_interest);
    let liquidations = normalize(snapshot.liquidations);
    let signals = snapshot.signals.map(normalize);

    let dropped = atr.dropped
        + open_interest.dropped
        + liquidations.dropped
        + signals.as_ref().map_or(0, |s| s.dropped);
    if dropped > 0 {
        console_log!("normalization dropped {} malformed rows", dropped);
    }

    let signal_rows = signals
        .map(|s| tail(s.rows, config.signal_window_days))
        .unwrap_or_default();

    let overview = Overview {
        atr: summarize(&atr.rows, |r| r.atr_pct),
        open_interest: summarize(&open_interest.rows, |r| r.open_interest_usd),
        signals: signal_rows.last().map(SignalHighlights::from_latest),
    };

    let close = close_lookup(&atr.rows);
    let (long_liq, short_liq) = liquidation_lookups(&liquidations.rows);
    let merged = merge_perp_snapshot(&open_interest.rows, &close, &long_liq, &short_liq);

    let liquidation_rows = tail(liquidations.rows, config.liquidation_window_days);

    let charts = ChartBundle {
        atr: ChartPayload::new(atr_chart(&atr.rows), "ATR metrics not available yet."),
        open_interest: ChartPayload::new(
            open_interest_chart(&open_interest.rows),
            "Open interest history not available yet.",
        ),
        liquidations: ChartPayload::new(
            liquidations_chart(&liquidation_rows),
            "Liquidation history not available yet.",
        ),
        perp_snapshot: ChartPayload::new(
            perp_snapshot_chart(&merged),
            "No overlapping dates between price and open interest data.",
        ),
        signals: ChartPayload::new(
            signals_chart(&signal_rows),
            "Signal data has not been generated yet.",
        ),
    };

    DashboardPayload {
        generated_at: chrono::Utc::now().to_rfc3339(),
        overview,
        charts,
    }
}
