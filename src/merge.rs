//! Cross-series date-keyed merge
//!
//! Joins the open interest series (driving) with close prices and
//! liquidation volumes into composite perp snapshot records. Lookup maps are
//! built once per auxiliary series, then the join streams over the driving
//! series in O(total records); output keeps the driving order untouched.

use std::collections::HashMap;

use crate::series::DatedRow;
use crate::types::{AtrRow, LiquidationRow, OpenInterestRow, PerpSnapshotRow};

/// How a missing auxiliary value for a driving date is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Missing value excludes the whole record from the merge output
    Required,
    /// Missing value defaults to zero
    Optional,
}

/// Date-keyed O(1) lookup for one auxiliary field
#[derive(Debug, Clone)]
pub struct DateLookup {
    map: HashMap<String, f64>,
    policy: FieldPolicy,
}

impl DateLookup {
    /// Build a lookup from (date, value) pairs; rows without a value are
    /// skipped so they read as "missing" during the join
    pub fn new<I>(entries: I, policy: FieldPolicy) -> Self
    where
        I: IntoIterator<Item = (String, Option<f64>)>,
    {
        let map = entries
            .into_iter()
            .filter_map(|(date, value)| value.map(|v| (date, v)))
            .collect();
        Self { map, policy }
    }

    /// Resolve the field for a date: `None` means the record must be
    /// excluded (required field missing); optional fields fall back to 0
    pub fn resolve(&self, date: &str) -> Option<f64> {
        match (self.map.get(date), self.policy) {
            (Some(v), _) => Some(*v),
            (None, FieldPolicy::Optional) => Some(0.0),
            (None, FieldPolicy::Required) => None,
        }
    }
}

/// Close-price lookup from the ATR series (REQUIRED for the snapshot)
pub fn close_lookup(rows: &[AtrRow]) -> DateLookup {
    DateLookup::new(
        rows.iter()
            .filter_map(|r| r.date.clone().map(|d| (d, r.close))),
        FieldPolicy::Required,
    )
}

/// Long/short liquidation lookups (OPTIONAL, default to zero)
pub fn liquidation_lookups(rows: &[LiquidationRow]) -> (DateLookup, DateLookup) {
    let long = DateLookup::new(
        rows.iter()
            .filter_map(|r| r.date.clone().map(|d| (d, r.long_liquidations_usd))),
        FieldPolicy::Optional,
    );
    let short = DateLookup::new(
        rows.iter()
            .filter_map(|r| r.date.clone().map(|d| (d, r.short_liquidations_usd))),
        FieldPolicy::Optional,
    );
    (long, short)
}

/// Merge the driving open interest series with auxiliary lookups
///
/// A snapshot exists for date D iff D is in the driving series and the close
/// price resolves for D. Output order matches the driving series; no
/// re-sorting afterwards.
pub fn merge_perp_snapshot(
    driving: &[OpenInterestRow],
    close: &DateLookup,
    long_liq: &DateLookup,
    short_liq: &DateLookup,
) -> Vec<PerpSnapshotRow> {
    driving
        .iter()
        .filter_map(|row| {
            let date = row.date_str()?;
            let open_interest_usd = row.open_interest_usd?;
            Some(PerpSnapshotRow {
                date: date.to_string(),
                close: close.resolve(date)?,
                open_interest_usd,
                long_liquidations_usd: long_liq.resolve(date)?,
                short_liquidations_usd: short_liq.resolve(date)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oi(date: &str, usd: f64) -> OpenInterestRow {
        OpenInterestRow {
            date: Some(date.to_string()),
            open_interest_usd: Some(usd),
            perp_volume_usd: None,
        }
    }

    fn atr_close(date: &str, close: f64) -> AtrRow {
        AtrRow {
            date: Some(date.to_string()),
            atr_pct: Some(1.0),
            close: Some(close),
        }
    }

    #[test]
    fn test_required_close_excludes_record() {
        // Second driving date has no close price and no liquidation data
        // exists at all.
        let driving = vec![oi("2024-01-01", 100.0), oi("2024-01-02", 200.0)];
        let close = close_lookup(&[atr_close("2024-01-01", 3000.0)]);
        let (long_liq, short_liq) = liquidation_lookups(&[]);

        let merged = merge_perp_snapshot(&driving, &close, &long_liq, &short_liq);
        assert_eq!(
            merged,
            vec![PerpSnapshotRow {
                date: "2024-01-01".to_string(),
                close: 3000.0,
                open_interest_usd: 100.0,
                long_liquidations_usd: 0.0,
                short_liquidations_usd: 0.0,
            }]
        );
    }

    #[test]
    fn test_optional_fields_default_to_zero() {
        let driving = vec![oi("2024-01-01", 100.0), oi("2024-01-02", 200.0)];
        let close = close_lookup(&[
            atr_close("2024-01-01", 3000.0),
            atr_close("2024-01-02", 3100.0),
        ]);
        let (long_liq, short_liq) = liquidation_lookups(&[LiquidationRow {
            date: Some("2024-01-02".to_string()),
            long_liquidations_usd: Some(5.0e6),
            short_liquidations_usd: None,
        }]);

        let merged = merge_perp_snapshot(&driving, &close, &long_liq, &short_liq);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].long_liquidations_usd, 0.0);
        assert_eq!(merged[1].long_liquidations_usd, 5.0e6);
        // A row present only on one side still zero-fills the other
        assert_eq!(merged[1].short_liquidations_usd, 0.0);
    }

    #[test]
    fn test_merge_preserves_driving_order_and_cardinality() {
        let driving: Vec<_> = (1..=5).map(|d| oi(&format!("2024-02-0{d}"), 10.0)).collect();
        let close = close_lookup(
            &(1..=5)
                .map(|d| atr_close(&format!("2024-02-0{d}"), 3000.0))
                .collect::<Vec<_>>(),
        );
        let (long_liq, short_liq) = liquidation_lookups(&[]);

        let merged = merge_perp_snapshot(&driving, &close, &long_liq, &short_liq);
        assert!(merged.len() <= driving.len());
        let dates: Vec<_> = merged.iter().map(|r| r.date.clone()).collect();
        let driving_dates: Vec<_> = driving.iter().filter_map(|r| r.date.clone()).collect();
        assert_eq!(dates, driving_dates);
    }

    #[test]
    fn test_aux_date_absent_from_driving_never_appears() {
        let driving = vec![oi("2024-01-02", 200.0)];
        let close = close_lookup(&[
            atr_close("2024-01-01", 2900.0),
            atr_close("2024-01-02", 3000.0),
        ]);
        let (long_liq, short_liq) = liquidation_lookups(&[]);

        let merged = merge_perp_snapshot(&driving, &close, &long_liq, &short_liq);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].date, "2024-01-02");
    }

    #[test]
    fn test_empty_driving_series() {
        let close = close_lookup(&[atr_close("2024-01-01", 3000.0)]);
        let (long_liq, short_liq) = liquidation_lookups(&[]);
        assert!(merge_perp_snapshot(&[], &close, &long_liq, &short_liq).is_empty());
    }
}
