//! Dashboard HTML template
//!
//! Contains the main page structure including:
//! - Header with refresh control
//! - Hero cards with latest ATR% and open interest facts
//! - Signal highlight cards
//! - Chart panels with per-chart fallback elements
//! - Narrative README and daily analysis panels

pub const TEMPLATE: &str = r#"
    <div class="container">
        <header>
            <div>
                <h1>📈 ETH Perp Metrics</h1>
                <span class="refresh-time" id="refreshTime">Loading...</span>
            </div>
            <div class="header-controls">
                <span class="status-badge status-loading" id="statusBadge">Loading</span>
                <button class="btn btn-secondary" onclick="refreshAll()" id="refreshBtn">🔄 Refresh</button>
            </div>
        </header>

        <div class="error-banner is-hidden" id="errorBanner"></div>

        <div class="grid">
            <!-- ATR Hero Card -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title">⚡ ATR% (14d)</span>
                </div>
                <div class="card-value" id="atrLatest">--%</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">As Of</div>
                        <div class="metric-value" id="atrDate">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Range</div>
                        <div class="metric-value" id="atrRange">--</div>
                    </div>
                </div>
            </div>

            <!-- Open Interest Hero Card -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title">💰 Open Interest</span>
                </div>
                <div class="card-value" id="oiLatest">$--</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">As Of</div>
                        <div class="metric-value" id="oiDate">--</div>
                    </div>
                </div>
            </div>

            <!-- Signal Highlights -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title">🎯 Latest Signals</span>
                </div>
                <div class="highlight-grid" id="signalHighlights">
                    <div class="highlight-card"><span>Signals</span><strong>--</strong><small>waiting for data</small></div>
                </div>
            </div>

            <!-- ATR Chart -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">ATR% vs Close Price</span>
                </div>
                <div class="chart-box"><canvas id="atrChart"></canvas></div>
                <div class="chart-fallback is-hidden" id="atrChartFallback"></div>
            </div>

            <!-- Open Interest Chart -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">Open Interest &amp; Perp Volume</span>
                </div>
                <div class="chart-box"><canvas id="oiChart"></canvas></div>
                <div class="chart-fallback is-hidden" id="oiChartFallback"></div>
            </div>

            <!-- Liquidations Chart -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">Daily Liquidations</span>
                </div>
                <div class="chart-box"><canvas id="liqChart"></canvas></div>
                <div class="chart-fallback is-hidden" id="liqChartFallback"></div>
            </div>

            <!-- Merged Snapshot Chart -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">Perp Market Snapshot</span>
                </div>
                <div class="chart-box"><canvas id="perpSnapshotChart"></canvas></div>
                <div class="chart-fallback is-hidden" id="perpSnapshotChartFallback"></div>
            </div>

            <!-- Signals Chart -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">60-Day Signal Overlay</span>
                </div>
                <div class="chart-box"><canvas id="signalsChart"></canvas></div>
                <div class="chart-fallback is-hidden" id="signalsChartFallback"></div>
            </div>

            <!-- Daily Analysis -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title" id="analysisTitle">🤖 Daily Analysis</span>
                </div>
                <article class="report" id="analysisContent"><p>Loading...</p></article>
            </div>

            <!-- Project Notes -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">📄 Notes</span>
                </div>
                <article class="report" id="readmeContent"><p>Loading...</p></article>
            </div>
        </div>
    </div>
"#;
