//! Artifact host client
//!
//! Fetches the pre-computed JSON/Markdown artifacts from the static data
//! host. All fetches for a page view are issued concurrently; required
//! artifacts abort the load when they fail, optional ones degrade their
//! dependent view. No retries, no cancellation.

use serde::Deserialize;
use worker::console_log;

use crate::error::{DashboardError, Result};
use crate::types::{AtrMetrics, LiquidationRow, OpenInterestRow, SignalRow};

/// Required JSON artifacts
pub const ATR_METRICS: &str = "atr_metrics.json";
pub const OPEN_INTEREST_HISTORY: &str = "eth_open_interest_history.json";
pub const LIQUIDATIONS_DAILY: &str = "eth_liquidations_daily.json";
/// Optional JSON artifact
pub const SIGNALS_60D: &str = "signals_60d.json";
/// Narrative Markdown artifacts
pub const README_MD: &str = "README.md";
pub const MODEL_ANALYSIS_MD: &str = "model_analysis.md";

/// One full load of the raw artifacts backing a page view
#[derive(Debug, Default)]
pub struct ArtifactSnapshot {
    pub atr: AtrMetrics,
    pub open_interest: Vec<OpenInterestRow>,
    pub liquidations: Vec<LiquidationRow>,
    /// `None` when the optional signal artifact failed to load
    pub signals: Option<Vec<SignalRow>>,
}

/// HTTP client for the artifact host
pub struct ArtifactClient {
    base_url: String,
}

impl ArtifactClient {
    /// Create a client rooted at the artifact host base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.base_url)
    }

    /// Fetch and parse one JSON artifact
    pub async fn fetch_json<T: for<'de> Deserialize<'de>>(&self, resource: &str) -> Result<T> {
        let response = reqwest::Client::new()
            .get(self.url(resource))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DashboardError::retrieval(resource, e))?;

        let response = Self::check_status(resource, response)?;
        response
            .json()
            .await
            .map_err(|e| DashboardError::retrieval(resource, e))
    }

    /// Fetch one artifact as plain text (narrative Markdown)
    pub async fn fetch_text(&self, resource: &str) -> Result<String> {
        let response = reqwest::Client::new()
            .get(self.url(resource))
            .send()
            .await
            .map_err(|e| DashboardError::retrieval(resource, e))?;

        let response = Self::check_status(resource, response)?;
        response
            .text()
            .await
            .map_err(|e| DashboardError::retrieval(resource, e))
    }

    fn check_status(resource: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Fetch all chart artifacts concurrently and assemble a snapshot
    ///
    /// Required failures aggregate into one `RequiredArtifacts` error;
    /// a failed optional artifact only clears its slot.
    pub async fn load_snapshot(&self) -> Result<ArtifactSnapshot> {
        let (atr, open_interest, liquidations, signals) = futures::join!(
            self.fetch_json::<AtrMetrics>(ATR_METRICS),
            self.fetch_json::<Vec<OpenInterestRow>>(OPEN_INTEREST_HISTORY),
            self.fetch_json::<Vec<LiquidationRow>>(LIQUIDATIONS_DAILY),
            self.fetch_json::<Vec<SignalRow>>(SIGNALS_60D),
        );

        let required_errs = [
            atr.as_ref().err(),
            open_interest.as_ref().err(),
            liquidations.as_ref().err(),
        ];
        for err in required_errs.into_iter().flatten() {
            console_log!("artifact load failed: {}", err);
        }
        if let Err(e) = &signals {
            console_log!("optional artifact degraded: {}", e);
        }

        assemble_snapshot(atr, open_interest, liquidations, signals)
    }
}

/// Pure required/optional combinator over the four fetch outcomes
pub fn assemble_snapshot(
    atr: Result<AtrMetrics>,
    open_interest: Result<Vec<OpenInterestRow>>,
    liquidations: Result<Vec<LiquidationRow>>,
    signals: Result<Vec<SignalRow>>,
) -> Result<ArtifactSnapshot> {
    let mut failures = Vec::new();
    let mut fail = |resource: &str, err: &DashboardError| {
        failures.push(format!("{resource}: {err}"));
    };

    if let Err(e) = &atr {
        fail(ATR_METRICS, e);
    }
    if let Err(e) = &open_interest {
        fail(OPEN_INTEREST_HISTORY, e);
    }
    if let Err(e) = &liquidations {
        fail(LIQUIDATIONS_DAILY, e);
    }

    if !failures.is_empty() {
        return Err(DashboardError::RequiredArtifacts(failures));
    }

    Ok(ArtifactSnapshot {
        atr: atr.unwrap_or_default(),
        open_interest: open_interest.unwrap_or_default(),
        liquidations: liquidations.unwrap_or_default(),
        signals: signals.ok(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retrieval(resource: &str) -> DashboardError {
        DashboardError::retrieval(resource, "connection refused")
    }

    #[test]
    fn test_assemble_all_ok() {
        let snapshot = assemble_snapshot(
            Ok(AtrMetrics::default()),
            Ok(vec![OpenInterestRow::default()]),
            Ok(vec![]),
            Ok(vec![SignalRow::default()]),
        )
        .expect("all ok");
        assert_eq!(snapshot.open_interest.len(), 1);
        assert!(snapshot.signals.is_some());
    }

    #[test]
    fn test_assemble_optional_failure_degrades() {
        let snapshot = assemble_snapshot(
            Ok(AtrMetrics::default()),
            Ok(vec![]),
            Ok(vec![]),
            Err(retrieval(SIGNALS_60D)),
        )
        .expect("required artifacts all loaded");
        assert!(snapshot.signals.is_none());
    }

    #[test]
    fn test_assemble_required_failures_aggregate() {
        let result = assemble_snapshot(
            Err(retrieval(ATR_METRICS)),
            Ok(vec![]),
            Err(DashboardError::Status {
                resource: LIQUIDATIONS_DAILY.to_string(),
                status: 500,
            }),
            Ok(vec![]),
        );

        match result {
            Err(DashboardError::RequiredArtifacts(failures)) => {
                assert_eq!(failures.len(), 2);
                assert!(failures[0].contains(ATR_METRICS));
                assert!(failures[1].contains(LIQUIDATIONS_DAILY));
            }
            other => panic!("expected aggregate failure, got {other:?}"),
        }
    }

    #[test]
    fn test_client_url_trims_trailing_slash() {
        let client = ArtifactClient::new("https://example.com/data//");
        assert_eq!(
            client.url(ATR_METRICS),
            "https://example.com/data/atr_metrics.json"
        );
    }
}
