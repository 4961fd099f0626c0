//! ETH Perp Metrics Dashboard for Cloudflare Workers
//!
//! Serves a single-page dashboard over pre-computed market artifacts
//! (ATR metrics, open interest history, liquidation history, trading
//! signals, narrative reports) published by an upstream data pipeline.
//!
//! # Architecture
//! - Artifact client fetches the JSON/Markdown files in parallel
//! - Normalize → merge → summarize pipeline runs server-side per request
//! - Charts ship as declarative Chart.js specs; the page only instantiates
//!
//! All indicator computation happens upstream; this worker displays
//! already-computed numbers and degrades per-panel when data is missing.

// Clippy configuration for dashboard code patterns
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)] // Chart spec builders are long but flat
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns
#![allow(clippy::map_unwrap_or)] // Explicit error handling preference

mod artifacts;
mod charts;
mod config;
mod dashboard;
mod error;
mod merge;
mod report;
mod series;
mod types;
mod view;

use worker::{Context, Env, Request, Response, Router, console_log, event};

pub use artifacts::{ArtifactClient, ArtifactSnapshot};
pub use charts::{ChartPayload, ChartSpec};
pub use config::Config;
pub use error::DashboardError;
pub use types::*;
pub use view::{ChartBundle, DashboardPayload};

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "environment": config.environment,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        })
        // Dashboard UI
        .get("/", |_req, _ctx| {
            Response::from_html(dashboard::dashboard_html())
        })
        .get("/dashboard", |_req, _ctx| {
            Response::from_html(dashboard::dashboard_html())
        })
        // Overview facts + chart bundle from one artifact load
        .get_async("/api/dashboard", |_req, ctx| async move {
            match load_dashboard(&ctx.env).await {
                Ok(payload) => Response::from_json(&payload),
                Err(e) => Response::from_json(&serde_json::json!({
                    "error": true,
                    "message": format!("{e}"),
                })),
            }
        })
        // Narrative reports
        .get_async("/api/reports/readme", |_req, ctx| async move {
            let report = load_readme(&ctx.env).await;
            Response::from_json(&report)
        })
        .get_async("/api/reports/analysis", |_req, ctx| async move {
            let report = load_analysis(&ctx.env).await;
            Response::from_json(&report)
        })
        // Fallback
        .run(req, env)
        .await
}

/// Load all chart artifacts and build the dashboard payload
async fn load_dashboard(env: &Env) -> std::result::Result<DashboardPayload, DashboardError> {
    let config = Config::from_env(env)?;
    let client = ArtifactClient::new(config.artifact_base_url.clone());

    let snapshot = client.load_snapshot().await?;
    Ok(view::build_dashboard(&config, snapshot))
}

/// Fetch the project notes, served raw
async fn load_readme(env: &Env) -> ReportResponse {
    match text_artifact(env, artifacts::README_MD).await {
        Ok(text) => ReportResponse::available(text, None),
        Err(e) => {
            console_log!("readme unavailable: {}", e);
            ReportResponse::unavailable()
        }
    }
}

/// Fetch the daily analysis and cut it down to the model reply
async fn load_analysis(env: &Env) -> ReportResponse {
    match text_artifact(env, artifacts::MODEL_ANALYSIS_MD).await {
        Ok(text) => {
            let reply = report::extract_model_reply(&text);
            let reply = report::strip_heading_brackets(&reply);
            let date = report::report_date(&reply);
            ReportResponse::available(reply, date)
        }
        Err(e) => {
            console_log!("analysis unavailable: {}", e);
            ReportResponse::unavailable()
        }
    }
}

async fn text_artifact(env: &Env, resource: &str) -> std::result::Result<String, DashboardError> {
    let config = Config::from_env(env)?;
    let client = ArtifactClient::new(config.artifact_base_url);
    client.fetch_text(resource).await
}
