//! Dashboard JavaScript
//!
//! Client-side view glue for the metrics dashboard:
//! - One API call per page view for the overview + chart bundle
//! - Chart instantiation from the server's declarative specs
//! - Explicit chart registry: replaceChart destroys the prior widget for a
//!   mount point before creating the new one
//! - Report panels rendered from pre-processed Markdown
//!
//! All data shaping happens server-side; this script only displays.

pub const SCRIPT: &str = r#"
// ============================================================================
// Chart registry
// ============================================================================
const charts = new Map();

const tickFormats = {
    percent: (v) => v + '%',
    usd: (v) => '$' + Number(v).toLocaleString('en-US'),
    billions: (v) => Number(v).toFixed(1) + 'B',
    millions: (v) => Number(v).toFixed(0) + 'M',
    plain: (v) => '' + v
};

// The server ships tick formats as data hints; swap them for callbacks
// before Chart.js sees the spec.
function applyTickFormats(spec) {
    const scales = (spec.options && spec.options.scales) || {};
    for (const axis of Object.values(scales)) {
        const fmt = axis.ticks && axis.ticks.format;
        if (fmt && tickFormats[fmt]) {
            axis.ticks.callback = tickFormats[fmt];
            delete axis.ticks.format;
        }
    }
}

function replaceChart(id, payload) {
    const prior = charts.get(id);
    if (prior) {
        prior.destroy();
        charts.delete(id);
    }

    const canvas = document.getElementById(id);
    const fallbackEl = document.getElementById(id + 'Fallback');
    if (!canvas) return;

    if (!payload || !payload.spec) {
        canvas.parentElement.classList.add('is-hidden');
        if (fallbackEl) {
            fallbackEl.textContent = (payload && payload.fallback) || 'No data available.';
            fallbackEl.classList.remove('is-hidden');
        }
        return;
    }

    canvas.parentElement.classList.remove('is-hidden');
    if (fallbackEl) fallbackEl.classList.add('is-hidden');
    applyTickFormats(payload.spec);
    charts.set(id, new Chart(canvas, payload.spec));
}

// ============================================================================
// Formatting
// ============================================================================
const currencyCompact = new Intl.NumberFormat('en-US', {
    style: 'currency',
    currency: 'USD',
    notation: 'compact',
    maximumFractionDigits: 2
});
const percentFormatter = new Intl.NumberFormat('en-US', {
    minimumFractionDigits: 0,
    maximumFractionDigits: 2
});

function formatPct(value) {
    return value == null ? '--%' : percentFormatter.format(value) + '%';
}

// ============================================================================
// API
// ============================================================================
async function fetchJSON(endpoint) {
    try {
        const res = await fetch(endpoint);
        return await res.json();
    } catch (e) {
        console.error('Error fetching ' + endpoint + ':', e);
        return null;
    }
}

// ============================================================================
// UI updates
// ============================================================================
function setStatus(ok, message) {
    const badge = document.getElementById('statusBadge');
    const banner = document.getElementById('errorBanner');
    badge.textContent = ok ? 'Live' : 'Degraded';
    badge.className = 'status-badge ' + (ok ? 'status-ok' : 'status-error');
    if (ok) {
        banner.classList.add('is-hidden');
    } else {
        banner.textContent = message || 'Required data failed to load. Try again later.';
        banner.classList.remove('is-hidden');
    }
}

function updateHero(overview) {
    if (!overview) return;

    const atr = overview.atr || {};
    document.getElementById('atrLatest').textContent = formatPct(atr.latest);
    document.getElementById('atrDate').textContent = atr.latest_date || '--';
    document.getElementById('atrRange').textContent =
        atr.min != null && atr.max != null
            ? formatPct(atr.min) + ' - ' + formatPct(atr.max)
            : '--';

    const oi = overview.open_interest || {};
    document.getElementById('oiLatest').textContent =
        oi.latest != null ? currencyCompact.format(oi.latest) : '$--';
    document.getElementById('oiDate').textContent = oi.latest_date || '--';

    updateSignalHighlights(overview.signals);
}

function updateSignalHighlights(signals) {
    const grid = document.getElementById('signalHighlights');
    if (!signals) {
        grid.innerHTML =
            '<div class="highlight-card"><span>Signals</span><strong>--</strong>' +
            '<small>signal data not generated yet</small></div>';
        return;
    }

    const rows = [
        { label: 'RSI14', value: signals.rsi14 != null ? signals.rsi14 : '--', hint: 'overbought 70 / oversold 30' },
        { label: 'ATR%14', value: formatPct(signals.atr_pct_14), hint: 'volatility' },
        { label: 'Buy Stars', value: signals.buy_stars, hint: '0-3 stars' },
        { label: 'Sell Stars', value: signals.sell_stars, hint: '0-3 stars' },
        { label: 'Vol/MA20', value: signals.volume_ratio_ma20 != null ? signals.volume_ratio_ma20 : '--', hint: '>=1 volume support' }
    ];

    grid.innerHTML = rows
        .map((row) =>
            '<div class="highlight-card"><span>' + row.label + '</span><strong>' +
            row.value + '</strong><small>' + row.hint + '</small></div>')
        .join('');
}

function updateTimestamp() {
    document.getElementById('refreshTime').textContent =
        'Updated: ' + new Date().toLocaleTimeString();
}

// ============================================================================
// Reports
// ============================================================================
async function loadReport(endpoint, targetId, titleId) {
    const target = document.getElementById(targetId);
    const report = await fetchJSON(endpoint);

    if (!report || !report.available) {
        target.innerHTML = '<p>Report unavailable right now. Check back later.</p>';
        return;
    }

    target.innerHTML = marked.parse(report.text, { mangle: false, headerIds: false });
    if (titleId && report.date) {
        document.getElementById(titleId).textContent = '🤖 ' + report.date + ' Daily Analysis';
    }
}

// ============================================================================
// Main update
// ============================================================================
async function updateDashboard() {
    const data = await fetchJSON('/api/dashboard');
    updateTimestamp();

    if (!data || data.error) {
        setStatus(false, data && data.message);
        return;
    }

    setStatus(true);
    updateHero(data.overview);
    replaceChart('atrChart', data.charts.atr);
    replaceChart('oiChart', data.charts.open_interest);
    replaceChart('liqChart', data.charts.liquidations);
    replaceChart('perpSnapshotChart', data.charts.perp_snapshot);
    replaceChart('signalsChart', data.charts.signals);
}

async function refreshAll() {
    const btn = document.getElementById('refreshBtn');
    btn.disabled = true;
    btn.textContent = '⏳';

    await updateDashboard();

    btn.disabled = false;
    btn.textContent = '🔄 Refresh';
}

// ============================================================================
// Initialization
// ============================================================================
updateDashboard();
loadReport('/api/reports/analysis', 'analysisContent', 'analysisTitle');
loadReport('/api/reports/readme', 'readmeContent', null);
"#;
