//! Dashboard module - ETH perp metrics web interface
//!
//! Provides the single-page dashboard for the pre-computed metrics.
//! Separated into HTML, CSS, and JS submodules for maintainability.
//!
//! # Architecture
//! - `html.rs`: Page structure and layout
//! - `css.rs`: Styling with CSS custom properties
//! - `js.rs`: API calls, chart instantiation, report rendering
//!
//! # Features
//! - Hero cards with latest ATR% / open interest facts
//! - ATR, open interest, liquidation, merged snapshot and signal charts
//! - Narrative README / daily analysis panels
//!
//! Chart drawing is delegated to Chart.js; Markdown rendering to marked.
//! Both load from CDN in the page head.

mod css;
mod html;
mod js;

/// Generate the complete dashboard HTML page
pub fn dashboard_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ETH Perp Metrics</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
    <script src="https://cdn.jsdelivr.net/npm/chartjs-adapter-date-fns@3"></script>
    <script src="https://cdn.jsdelivr.net/npm/marked@12/marked.min.js"></script>
    <style>
{css}
    </style>
</head>
<body>
{html}
    <script>
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        html = html::TEMPLATE,
        js = js::SCRIPT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_html_contains_chart_mounts() {
        let page = dashboard_html();
        for id in [
            "atrChart",
            "oiChart",
            "liqChart",
            "perpSnapshotChart",
            "signalsChart",
        ] {
            assert!(page.contains(id), "missing chart mount {id}");
        }
        assert!(page.contains("chart.js"));
    }
}
