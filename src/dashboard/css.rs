//! Dashboard CSS styles
//!
//! Contains all styling for the metrics dashboard UI.
//! Uses CSS custom properties (variables) for theming.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #58a6ff;
    --purple: #a371f7;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    padding: 20px;
    min-height: 100vh;
}

.container { max-width: 1200px; margin: 0 auto; }

/* Header */
header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h1 { font-size: 24px; font-weight: 600; }

.header-controls {
    display: flex;
    align-items: center;
    gap: 12px;
}

.refresh-time { font-size: 12px; color: var(--text-dim); }

/* Status Badge */
.status-badge {
    padding: 6px 12px;
    border-radius: 20px;
    font-size: 12px;
    font-weight: 600;
    text-transform: uppercase;
}

.status-ok { background: rgba(63, 185, 80, 0.2); color: var(--green); }
.status-error { background: rgba(248, 81, 73, 0.2); color: var(--red); }
.status-loading { background: rgba(139, 148, 158, 0.2); color: var(--text-dim); }

/* Error Banner */
.error-banner {
    background: rgba(248, 81, 73, 0.15);
    border: 1px solid var(--red);
    border-radius: 8px;
    color: var(--red);
    padding: 12px 16px;
    margin-bottom: 16px;
    font-size: 13px;
}

/* Buttons */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
    transition: all 0.2s;
}

.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-secondary { background: var(--border); color: var(--text); }
.btn-secondary:hover:not(:disabled) { background: #3d444d; }

/* Grid Layout */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 16px;
}

.wide { grid-column: 1 / -1; }

/* Cards */
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
}

.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
}

.card-title {
    font-size: 14px;
    color: var(--text-dim);
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.card-value { font-size: 28px; font-weight: 700; }

/* Metrics Grid */
.metrics {
    display: flex;
    flex-wrap: wrap;
    gap: 16px;
    margin-top: 12px;
}

.metric { flex: 1; min-width: 100px; }
.metric-label { font-size: 11px; color: var(--text-dim); text-transform: uppercase; }
.metric-value { font-size: 18px; font-weight: 600; margin-top: 2px; }

/* Signal Highlights */
.highlight-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(110px, 1fr));
    gap: 10px;
}

.highlight-card {
    background: rgba(255, 255, 255, 0.03);
    border-radius: 8px;
    padding: 12px;
    text-align: center;
    display: flex;
    flex-direction: column;
    gap: 4px;
}

.highlight-card span { font-size: 11px; color: var(--text-dim); text-transform: uppercase; }
.highlight-card strong { font-size: 18px; }
.highlight-card small { font-size: 11px; color: var(--text-dim); }

/* Charts */
.chart-box { position: relative; height: 340px; }

.chart-fallback {
    background: rgba(255, 255, 255, 0.03);
    border-radius: 8px;
    color: var(--text-dim);
    padding: 40px 16px;
    text-align: center;
    font-size: 13px;
}

.is-hidden { display: none; }

/* Reports */
.report { font-size: 14px; line-height: 1.7; }
.report h2, .report h3 { margin: 16px 0 8px; }
.report p, .report ul, .report ol { margin-bottom: 10px; }
.report li { margin-left: 20px; }
.report code {
    background: rgba(255, 255, 255, 0.06);
    border-radius: 4px;
    padding: 1px 5px;
    font-size: 13px;
}
.report a { color: var(--blue); }

/* Responsive */
@media (max-width: 600px) {
    .grid { grid-template-columns: 1fr; }
    header { flex-direction: column; gap: 12px; }
    .header-controls { flex-wrap: wrap; justify-content: center; }
    .chart-box { height: 260px; }
}
";
