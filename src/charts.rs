//! Declarative chart specifications
//!
//! Maps normalized/merged series to Chart.js configurations. The specs are
//! pure data: axis tick formats travel as hints (`"format": "percent"` etc.)
//! that the page script swaps for real formatter callbacks before handing
//! the spec to the graphing library. Empty input yields no spec; the payload
//! then carries a fallback message instead of an empty plot.

use serde::Serialize;
use serde_json::{Value, json};

use crate::types::{AtrRow, LiquidationRow, OpenInterestRow, PerpSnapshotRow, SignalRow};

const PURPLE: &str = "#7c5dff";
const PURPLE_FILL: &str = "rgba(124,93,255,0.25)";
const PURPLE_BAR: &str = "rgba(124,93,255,0.4)";
const CYAN: &str = "#4ad5ff";
const CYAN_BAR: &str = "rgba(74,213,255,0.4)";
const WHITE: &str = "#ffffff";
const ORANGE: &str = "#ffa726";
const ORANGE_FILL: &str = "rgba(255,167,38,0.1)";
const GREEN: &str = "#66bb6a";
const RED: &str = "#ef5350";
const PINK_BAR: &str = "rgba(255,119,146,0.45)";

/// USD to billions, applied at render time only
pub fn usd_to_billions(usd: f64) -> f64 {
    usd / 1.0e9
}

/// USD to millions, applied at render time only
pub fn usd_to_millions(usd: f64) -> f64 {
    usd / 1.0e6
}

/// One chart point; `r` carries scatter marker radius
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

impl ChartPoint {
    fn new(x: &str, y: f64) -> Self {
        Self {
            x: x.to_string(),
            y,
            r: None,
        }
    }
}

/// One Chart.js dataset
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub label: String,
    pub data: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_style: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
}

impl Dataset {
    fn line(label: &str, color: &'static str) -> Self {
        Self {
            kind: Some("line"),
            label: label.to_string(),
            border_color: Some(color),
            tension: Some(0.25),
            point_radius: Some(0),
            ..Self::default()
        }
    }

    fn bar(label: &str, color: &'static str) -> Self {
        Self {
            kind: Some("bar"),
            label: label.to_string(),
            background_color: Some(color),
            ..Self::default()
        }
    }
}

/// Chart data block (date-keyed datasets, no label axis)
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub datasets: Vec<Dataset>,
}

/// A complete declarative chart configuration
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub data: ChartData,
    pub options: Value,
}

/// Chart endpoint payload: a spec, or a fallback message for an empty view
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<ChartSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl ChartPayload {
    pub fn new(spec: Option<ChartSpec>, fallback: &str) -> Self {
        match spec {
            Some(spec) => Self {
                spec: Some(spec),
                fallback: None,
            },
            None => Self {
                spec: None,
                fallback: Some(fallback.to_string()),
            },
        }
    }
}

fn time_axis() -> Value {
    json!({
        "type": "time",
        "time": { "parser": "yyyy-MM-dd", "tooltipFormat": "yyyy-MM-dd" },
        "grid": { "color": "rgba(255,255,255,0.04)" },
    })
}

/// Value axis with a tick-format hint for the page script
fn value_axis(position: &str, format: &str, draw_grid: bool) -> Value {
    json!({
        "position": position,
        "ticks": { "format": format, "color": "#ccc" },
        "grid": if draw_grid {
            json!({ "color": "rgba(255,255,255,0.04)" })
        } else {
            json!({ "drawOnChartArea": false })
        },
    })
}

fn base_options(scales: Value) -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "interaction": { "mode": "index", "intersect": false },
        "scales": scales,
        "plugins": { "legend": { "labels": { "color": "#fff" } } },
    })
}

/// ATR% line with the close price on a second axis
pub fn atr_chart(rows: &[AtrRow]) -> Option<ChartSpec> {
    if rows.is_empty() {
        return None;
    }

    let atr = Dataset {
        background_color: Some(PURPLE_FILL),
        fill: Some(true),
        y_axis_id: Some("y"),
        data: rows
            .iter()
            .filter_map(|r| Some(ChartPoint::new(r.date.as_deref()?, r.atr_pct?)))
            .collect(),
        ..Dataset::line("ATR% (14)", PURPLE)
    };
    let close = Dataset {
        y_axis_id: Some("y1"),
        tension: Some(0.2),
        data: rows
            .iter()
            .filter_map(|r| Some(ChartPoint::new(r.date.as_deref()?, r.close?)))
            .collect(),
        ..Dataset::line("Close (USD)", CYAN)
    };

    Some(ChartSpec {
        kind: Some("line"),
        data: ChartData {
            datasets: vec![atr, close],
        },
        options: base_options(json!({
            "x": time_axis(),
            "y": value_axis("left", "percent", true),
            "y1": value_axis("right", "usd", false),
        })),
    })
}

/// Open interest line over perp volume bars, both in billions
pub fn open_interest_chart(rows: &[OpenInterestRow]) -> Option<ChartSpec> {
    if rows.is_empty() {
        return None;
    }

    let oi = Dataset {
        background_color: Some(CYAN),
        tension: Some(0.2),
        y_axis_id: Some("y"),
        data: rows
            .iter()
            .filter_map(|r| {
                Some(ChartPoint::new(
                    r.date.as_deref()?,
                    usd_to_billions(r.open_interest_usd?),
                ))
            })
            .collect(),
        ..Dataset::line("Open Interest (B USD)", CYAN)
    };
    let volume = Dataset {
        y_axis_id: Some("y1"),
        border_radius: Some(4),
        data: rows
            .iter()
            .filter_map(|r| {
                Some(ChartPoint::new(
                    r.date.as_deref()?,
                    usd_to_billions(r.perp_volume_usd?),
                ))
            })
            .collect(),
        ..Dataset::bar("Perp Volume (B USD)", PURPLE_BAR)
    };

    Some(ChartSpec {
        kind: Some("bar"),
        data: ChartData {
            datasets: vec![oi, volume],
        },
        options: base_options(json!({
            "x": time_axis(),
            "y": value_axis("left", "billions", true),
            "y1": value_axis("right", "billions", false),
        })),
    })
}

/// Stacked long/short liquidation bars in millions
pub fn liquidations_chart(rows: &[LiquidationRow]) -> Option<ChartSpec> {
    if rows.is_empty() {
        return None;
    }

    // Missing sides read as zero so quiet days still stack correctly
    let side = |label: &str, color, value: fn(&LiquidationRow) -> Option<f64>| Dataset {
        stack: Some("liq"),
        data: rows
            .iter()
            .filter_map(|r| {
                Some(ChartPoint::new(
                    r.date.as_deref()?,
                    usd_to_millions(value(r).unwrap_or(0.0)),
                ))
            })
            .collect(),
        ..Dataset::bar(label, color)
    };

    Some(ChartSpec {
        kind: Some("bar"),
        data: ChartData {
            datasets: vec![
                side("Long Liquidations (M USD)", CYAN_BAR, |r| {
                    r.long_liquidations_usd
                }),
                side("Short Liquidations (M USD)", PINK_BAR, |r| {
                    r.short_liquidations_usd
                }),
            ],
        },
        options: base_options(json!({
            "x": { "stacked": true, "type": "time",
                   "time": { "parser": "yyyy-MM-dd", "tooltipFormat": "yyyy-MM-dd" },
                   "grid": { "color": "rgba(255,255,255,0.04)" } },
            "y": { "stacked": true, "position": "left",
                   "ticks": { "format": "millions", "color": "#ccc" },
                   "grid": { "color": "rgba(255,255,255,0.04)" } },
        })),
    })
}

/// Composite snapshot: close price, open interest, stacked liquidations
pub fn perp_snapshot_chart(rows: &[PerpSnapshotRow]) -> Option<ChartSpec> {
    if rows.is_empty() {
        return None;
    }

    let close = Dataset {
        y_axis_id: Some("price"),
        data: rows
            .iter()
            .map(|r| ChartPoint::new(&r.date, r.close))
            .collect(),
        ..Dataset::line("Close (USD)", WHITE)
    };
    let oi = Dataset {
        y_axis_id: Some("oi"),
        data: rows
            .iter()
            .map(|r| ChartPoint::new(&r.date, usd_to_billions(r.open_interest_usd)))
            .collect(),
        ..Dataset::line("Open Interest (B USD)", CYAN)
    };
    let long_liq = Dataset {
        y_axis_id: Some("liq"),
        stack: Some("liq"),
        order: Some(3),
        data: rows
            .iter()
            .map(|r| ChartPoint::new(&r.date, usd_to_millions(r.long_liquidations_usd)))
            .collect(),
        ..Dataset::bar("Long Liq (M USD)", CYAN_BAR)
    };
    let short_liq = Dataset {
        y_axis_id: Some("liq"),
        stack: Some("liq"),
        order: Some(3),
        data: rows
            .iter()
            .map(|r| ChartPoint::new(&r.date, usd_to_millions(r.short_liquidations_usd)))
            .collect(),
        ..Dataset::bar("Short Liq (M USD)", PINK_BAR)
    };

    Some(ChartSpec {
        kind: None,
        data: ChartData {
            datasets: vec![close, oi, long_liq, short_liq],
        },
        options: base_options(json!({
            "x": time_axis(),
            "price": value_axis("left", "usd", true),
            "oi": value_axis("right", "billions", false),
            "liq": value_axis("right", "millions", false),
        })),
    })
}

/// Signal chart: price with moving averages, RSI oscillator, star overlays
pub fn signals_chart(rows: &[SignalRow]) -> Option<ChartSpec> {
    if rows.is_empty() {
        return None;
    }

    let close = Dataset {
        y_axis_id: Some("price"),
        data: rows
            .iter()
            .filter_map(|r| Some(ChartPoint::new(r.date.as_deref()?, r.close?)))
            .collect(),
        ..Dataset::line("Close (USD)", WHITE)
    };
    let ma20 = Dataset {
        y_axis_id: Some("price"),
        border_dash: Some(vec![4, 4]),
        tension: Some(0.2),
        data: rows
            .iter()
            .filter_map(|r| Some(ChartPoint::new(r.date.as_deref()?, r.ma_20?)))
            .collect(),
        ..Dataset::line("MA20", PURPLE)
    };
    let ma60 = Dataset {
        y_axis_id: Some("price"),
        border_dash: Some(vec![6, 4]),
        tension: Some(0.2),
        data: rows
            .iter()
            .filter_map(|r| Some(ChartPoint::new(r.date.as_deref()?, r.ma_60?)))
            .collect(),
        ..Dataset::line("MA60", CYAN)
    };
    let rsi = Dataset {
        y_axis_id: Some("osc"),
        background_color: Some(ORANGE_FILL),
        fill: Some(true),
        tension: Some(0.3),
        data: rows
            .iter()
            .filter_map(|r| Some(ChartPoint::new(r.date.as_deref()?, r.rsi14?)))
            .collect(),
        ..Dataset::line("RSI14", ORANGE)
    };

    // Star overlays sit on the price axis, marker size scaled by star count
    let stars = |label: &str, color, style, count: fn(&SignalRow) -> Option<u32>| Dataset {
        kind: Some("scatter"),
        label: label.to_string(),
        y_axis_id: Some("price"),
        background_color: Some(color),
        point_style: Some(style),
        show_line: Some(false),
        data: rows
            .iter()
            .filter_map(|r| {
                let n = count(r).filter(|&n| n > 0)?;
                Some(ChartPoint {
                    x: r.date.clone()?,
                    y: r.close?,
                    r: Some(4.0 + f64::from(n) * 1.5),
                })
            })
            .collect(),
        ..Dataset::default()
    };

    Some(ChartSpec {
        kind: None,
        data: ChartData {
            datasets: vec![
                close,
                ma20,
                ma60,
                rsi,
                stars("Buy Stars", GREEN, "triangle", |r| r.buy_stars),
                stars("Sell Stars", RED, "rectRot", |r| r.sell_stars),
            ],
        },
        options: base_options(json!({
            "x": time_axis(),
            "price": value_axis("left", "usd", true),
            "osc": { "position": "right", "suggestedMin": 0, "suggestedMax": 100,
                     "ticks": { "format": "plain", "color": "#ccc" },
                     "grid": { "drawOnChartArea": false } },
        })),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atr(date: &str) -> AtrRow {
        AtrRow {
            date: Some(date.to_string()),
            atr_pct: Some(2.1),
            close: Some(3000.0),
        }
    }

    #[test]
    fn test_unit_conversions() {
        assert!((usd_to_billions(2.5e9) - 2.5).abs() < f64::EPSILON);
        assert!((usd_to_millions(7.0e6) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input_yields_no_spec() {
        assert!(atr_chart(&[]).is_none());
        assert!(open_interest_chart(&[]).is_none());
        assert!(liquidations_chart(&[]).is_none());
        assert!(perp_snapshot_chart(&[]).is_none());
        assert!(signals_chart(&[]).is_none());
    }

    #[test]
    fn test_chart_payload_fallback() {
        let payload = ChartPayload::new(None, "signal data not generated yet");
        assert!(payload.spec.is_none());
        assert_eq!(payload.fallback.as_deref(), Some("signal data not generated yet"));

        let payload = ChartPayload::new(atr_chart(&[atr("2024-01-01")]), "unused");
        assert!(payload.spec.is_some());
        assert!(payload.fallback.is_none());
    }

    #[test]
    fn test_atr_spec_shape() {
        let spec = atr_chart(&[atr("2024-01-01"), atr("2024-01-02")]).expect("spec");
        let value = serde_json::to_value(&spec).expect("serializes");

        assert_eq!(value["type"], "line");
        let datasets = value["data"]["datasets"].as_array().expect("datasets");
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0]["yAxisID"], "y");
        assert_eq!(datasets[0]["data"][0]["x"], "2024-01-01");
        assert_eq!(datasets[0]["data"][0]["y"], 2.1);
        // camelCase keys for the graphing library
        assert!(datasets[0].get("borderColor").is_some());
        assert_eq!(value["options"]["scales"]["y"]["ticks"]["format"], "percent");
    }

    #[test]
    fn test_liquidations_zero_fill_missing_side() {
        let rows = vec![LiquidationRow {
            date: Some("2024-01-01".to_string()),
            long_liquidations_usd: Some(4.0e6),
            short_liquidations_usd: None,
        }];
        let spec = liquidations_chart(&rows).expect("spec");
        assert_eq!(spec.data.datasets[0].data[0].y, 4.0);
        assert_eq!(spec.data.datasets[1].data[0].y, 0.0);
    }

    #[test]
    fn test_signals_star_overlay_sizing() {
        let rows = vec![
            SignalRow {
                date: Some("2024-01-01".to_string()),
                close: Some(3000.0),
                buy_stars: Some(2),
                ..SignalRow::default()
            },
            SignalRow {
                date: Some("2024-01-02".to_string()),
                close: Some(3050.0),
                buy_stars: Some(0),
                ..SignalRow::default()
            },
        ];
        let spec = signals_chart(&rows).expect("spec");
        let buy = &spec.data.datasets[4];
        assert_eq!(buy.kind, Some("scatter"));
        // Zero-star days carry no marker
        assert_eq!(buy.data.len(), 1);
        assert_eq!(buy.data[0].r, Some(7.0));
    }
}
