//! Series normalization and headline summaries
//!
//! Raw artifact rows become a `NormalizedSeries`: invalid rows dropped,
//! remainder sorted ascending by date, optionally cut to a trailing window.
//! Normalization is idempotent and empty input is never an error.

use chrono::NaiveDate;

use crate::types::{AtrRow, LiquidationRow, OpenInterestRow, SignalRow, SummaryFacts};

/// A row keyed by calendar day with a per-type validity predicate
pub trait DatedRow {
    /// Raw `YYYY-MM-DD` date key, if present
    fn date_str(&self) -> Option<&str>;

    /// Numeric fields the row must carry to be drawable
    fn has_required_values(&self) -> bool;

    /// Parsed date key; `None` for missing or unparseable dates
    fn date_key(&self) -> Option<NaiveDate> {
        self.date_str()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// A row is valid when its date parses and required values are present
    fn is_valid(&self) -> bool {
        self.date_key().is_some() && self.has_required_values()
    }
}

impl DatedRow for AtrRow {
    fn date_str(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn has_required_values(&self) -> bool {
        self.atr_pct.is_some() && self.close.is_some()
    }
}

impl DatedRow for OpenInterestRow {
    fn date_str(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn has_required_values(&self) -> bool {
        self.open_interest_usd.is_some()
    }
}

impl DatedRow for LiquidationRow {
    fn date_str(&self) -> Option<&str> {
        self.date.as_deref()
    }

    // Either side may be absent for a quiet day; zero-filling happens at
    // merge/render time, so the date alone qualifies the row.
    fn has_required_values(&self) -> bool {
        true
    }
}

impl DatedRow for SignalRow {
    fn date_str(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn has_required_values(&self) -> bool {
        self.close.is_some()
    }
}

/// A normalized series plus the number of rows dropped while building it
#[derive(Debug, Clone)]
pub struct Normalized<T> {
    pub rows: Vec<T>,
    pub dropped: usize,
}

impl<T> Normalized<T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Filter invalid rows and sort ascending by date
///
/// Invalid rows are silently dropped (no partial repair); the drop count is
/// reported for logging, not as an error.
pub fn normalize<T: DatedRow>(rows: Vec<T>) -> Normalized<T> {
    let total = rows.len();
    let mut rows: Vec<T> = rows.into_iter().filter(DatedRow::is_valid).collect();
    rows.sort_by_key(|r| r.date_key());
    let dropped = total - rows.len();
    Normalized { rows, dropped }
}

/// Keep only the trailing `k` rows of an already-sorted series
pub fn tail<T>(mut rows: Vec<T>, k: usize) -> Vec<T> {
    if rows.len() > k {
        rows.drain(..rows.len() - k);
    }
    rows
}

/// Derive headline facts: latest point plus min/max of one numeric field
///
/// An empty series yields all-`None` sentinels; callers must not assume
/// presence.
pub fn summarize<T, F>(rows: &[T], value: F) -> SummaryFacts
where
    T: DatedRow,
    F: Fn(&T) -> Option<f64>,
{
    let mut facts = SummaryFacts::default();

    for row in rows {
        if let Some(v) = value(row) {
            facts.min = Some(facts.min.map_or(v, |m: f64| m.min(v)));
            facts.max = Some(facts.max.map_or(v, |m: f64| m.max(v)));
        }
    }

    if let Some(last) = rows.last() {
        facts.latest_date = last.date_str().map(str::to_string);
        facts.latest = value(last);
    }

    facts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atr(date: &str, atr_pct: f64) -> AtrRow {
        AtrRow {
            date: Some(date.to_string()),
            atr_pct: Some(atr_pct),
            close: Some(3000.0),
        }
    }

    #[test]
    fn test_normalize_sorts_ascending_and_drops_invalid() {
        let rows = vec![
            atr("2024-01-03", 2.0),
            AtrRow {
                date: None,
                atr_pct: Some(9.0),
                close: Some(1.0),
            },
            atr("2024-01-01", 1.0),
            AtrRow {
                date: Some("2024-01-02".to_string()),
                atr_pct: None,
                close: Some(1.0),
            },
            atr("2024-01-02", 1.5),
        ];

        let normalized = normalize(rows);
        assert_eq!(normalized.dropped, 2);
        let dates: Vec<_> = normalized
            .rows
            .iter()
            .map(|r| r.date.clone().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert!(normalized.rows.iter().all(DatedRow::is_valid));
    }

    #[test]
    fn test_normalize_rejects_unparseable_date() {
        let rows = vec![atr("not-a-date", 1.0), atr("2024-13-40", 1.0)];
        let normalized = normalize(rows);
        assert!(normalized.is_empty());
        assert_eq!(normalized.dropped, 2);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let rows = vec![atr("2024-01-02", 2.0), atr("2024-01-01", 1.0)];
        let once = normalize(rows);
        let twice = normalize(once.rows.clone());
        assert_eq!(twice.dropped, 0);
        let dates_once: Vec<_> = once.rows.iter().map(|r| r.date.clone()).collect();
        let dates_twice: Vec<_> = twice.rows.iter().map(|r| r.date.clone()).collect();
        assert_eq!(dates_once, dates_twice);
    }

    #[test]
    fn test_normalize_empty_input() {
        let normalized = normalize(Vec::<AtrRow>::new());
        assert!(normalized.is_empty());
        assert_eq!(normalized.dropped, 0);
    }

    #[test]
    fn test_tail_window_keeps_last_k_by_date() {
        let rows: Vec<AtrRow> = (1..=9)
            .map(|d| atr(&format!("2024-01-0{d}"), f64::from(d)))
            .collect();
        let sorted = normalize(rows).rows;

        let windowed = tail(sorted, 3);
        let dates: Vec<_> = windowed.iter().map(|r| r.date.clone().unwrap()).collect();
        assert_eq!(dates, vec!["2024-01-07", "2024-01-08", "2024-01-09"]);
    }

    #[test]
    fn test_tail_window_larger_than_series() {
        let rows = vec![atr("2024-01-01", 1.0)];
        assert_eq!(tail(rows, 60).len(), 1);
    }

    #[test]
    fn test_summarize_min_max_latest() {
        let rows = normalize(vec![
            atr("2024-01-01", 1.5),
            atr("2024-01-02", 3.2),
            atr("2024-01-03", 0.8),
        ])
        .rows;

        let facts = summarize(&rows, |r| r.atr_pct);
        assert_eq!(facts.min, Some(0.8));
        assert_eq!(facts.max, Some(3.2));
        assert_eq!(facts.latest, Some(0.8));
        assert_eq!(facts.latest_date.as_deref(), Some("2024-01-03"));
    }

    #[test]
    fn test_summarize_empty_yields_unknown() {
        let facts = summarize(&Vec::<AtrRow>::new(), |r| r.atr_pct);
        assert!(facts.is_unknown());
        assert!(facts.latest_date.is_none());
    }

    #[test]
    fn test_liquidation_row_valid_with_date_only() {
        let row = LiquidationRow {
            date: Some("2024-01-01".to_string()),
            long_liquidations_usd: None,
            short_liquidations_usd: None,
        };
        assert!(row.is_valid());
    }
}
