//! Typed schemas for the pre-computed artifacts and derived records
//!
//! Every artifact is validated once at the load boundary. Per-row fields are
//! optional so a single malformed row never rejects the whole artifact; the
//! normalizer drops rows that fail the validity predicate afterwards.

use serde::{Deserialize, Deserializer, Serialize};

/// Accept any JSON value for a numeric field, coercing non-numbers to `None`
/// so the validity predicate can drop the row instead of the whole artifact
/// failing to parse.
fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<f64>, D::Error> {
    Ok(serde_json::Value::deserialize(de)?.as_f64())
}

/// Same coercion for small counters (star ratings)
fn lenient_u32<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<u32>, D::Error> {
    Ok(serde_json::Value::deserialize(de)?
        .as_u64()
        .and_then(|v| u32::try_from(v).ok()))
}

/// Same coercion for the date key: anything but a string becomes `None`
fn lenient_string<'de, D: Deserializer<'de>>(
    de: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(serde_json::Value::deserialize(de)?
        .as_str()
        .map(str::to_string))
}

/// `atr_metrics.json` top-level shape
///
/// The upstream `summary` block is intentionally not modeled: summary facts
/// are recomputed from the normalized series so the hero cards can never
/// disagree with the charts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtrMetrics {
    #[serde(default)]
    pub series: Vec<AtrRow>,
}

/// One day of ATR metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtrRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub atr_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close: Option<f64>,
}

/// One day of open interest history (`eth_open_interest_history.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenInterestRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub open_interest_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub perp_volume_usd: Option<f64>,
}

/// One day of liquidation history (`eth_liquidations_daily.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiquidationRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub long_liquidations_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub short_liquidations_usd: Option<f64>,
}

/// One day of trading signals (`signals_60d.json`, optional artifact)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ma_20: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ma_60: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rsi14: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub buy_stars: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub sell_stars: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume_ratio_ma20: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub atr_pct_14: Option<f64>,
}

/// Composite record produced by the cross-series merge
///
/// Driven by the open interest series; close price is required, liquidation
/// volumes default to zero for dates without liquidation data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerpSnapshotRow {
    pub date: String,
    pub close: f64,
    pub open_interest_usd: f64,
    pub long_liquidations_usd: f64,
    pub short_liquidations_usd: f64,
}

/// Headline facts derived from one normalized series
///
/// `None` is the "unknown" sentinel for an empty series; consumers must not
/// assume presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryFacts {
    pub latest_date: Option<String>,
    pub latest: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SummaryFacts {
    /// True when the underlying series was empty
    pub fn is_unknown(&self) -> bool {
        self.latest.is_none() && self.min.is_none() && self.max.is_none()
    }
}

/// Latest-signal highlights for the hero section
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignalHighlights {
    pub date: Option<String>,
    pub rsi14: Option<f64>,
    pub atr_pct_14: Option<f64>,
    pub buy_stars: u32,
    pub sell_stars: u32,
    pub volume_ratio_ma20: Option<f64>,
}

impl SignalHighlights {
    /// Highlights from the latest row of a normalized signal series
    pub fn from_latest(row: &SignalRow) -> Self {
        Self {
            date: row.date.clone(),
            rsi14: row.rsi14,
            atr_pct_14: row.atr_pct_14,
            buy_stars: row.buy_stars.unwrap_or(0),
            sell_stars: row.sell_stars.unwrap_or(0),
            volume_ratio_ma20: row.volume_ratio_ma20,
        }
    }
}

/// Hero-card payload for the overview section
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overview {
    pub atr: SummaryFacts,
    pub open_interest: SummaryFacts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signals: Option<SignalHighlights>,
}

/// Report text endpoint payload
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ReportResponse {
    pub fn available(text: String, date: Option<String>) -> Self {
        Self {
            available: true,
            text: Some(text),
            date,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            text: None,
            date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_row_still_deserializes() {
        // Wrong value type on one field must not reject the row outright;
        // the normalizer decides what to drop.
        let row: std::result::Result<AtrRow, _> =
            serde_json::from_str(r#"{"date":"2024-01-01","close":2950.0}"#);
        let row = row.expect("partial row should deserialize");
        assert_eq!(row.date.as_deref(), Some("2024-01-01"));
        assert!(row.atr_pct.is_none());
    }

    #[test]
    fn test_wrong_value_type_coerced_to_none() {
        let row: AtrRow =
            serde_json::from_str(r#"{"date":"2024-01-01","atr_pct":"high","close":2950.0}"#)
                .expect("row with wrong-typed field should deserialize");
        assert!(row.atr_pct.is_none());
        assert_eq!(row.close, Some(2950.0));

        let row: AtrRow = serde_json::from_str(r#"{"date":42,"atr_pct":1.2}"#)
            .expect("row with non-string date should deserialize");
        assert!(row.date.is_none());
    }

    #[test]
    fn test_atr_metrics_missing_series() {
        let metrics: AtrMetrics = serde_json::from_str("{}").expect("empty object");
        assert!(metrics.series.is_empty());
    }

    #[test]
    fn test_summary_facts_unknown() {
        assert!(SummaryFacts::default().is_unknown());
        let facts = SummaryFacts {
            latest: Some(1.5),
            ..SummaryFacts::default()
        };
        assert!(!facts.is_unknown());
    }

    #[test]
    fn test_signal_highlights_from_latest() {
        let row = SignalRow {
            date: Some("2024-03-01".to_string()),
            rsi14: Some(62.4),
            buy_stars: Some(2),
            sell_stars: None,
            ..SignalRow::default()
        };
        let highlights = SignalHighlights::from_latest(&row);
        assert_eq!(highlights.buy_stars, 2);
        assert_eq!(highlights.sell_stars, 0);
        assert_eq!(highlights.date.as_deref(), Some("2024-03-01"));
    }
}
