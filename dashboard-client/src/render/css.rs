//! Dashboard CSS styles
//!
//! Light and dark palettes are CSS custom properties switched by the
//! `data-color-scheme` attribute on the root element.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root, [data-color-scheme='light'] {
    --bg: #f6f8fa;
    --card: #ffffff;
    --border: #d0d7de;
    --text: #1f2328;
    --text-dim: #656d76;
    --green: #1a7f37;
    --red: #cf222e;
    --blue: #0969da;
}

[data-color-scheme='dark'] {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #58a6ff;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
}

[hidden] { display: none !important; }

/* Header */
header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 16px 24px;
    border-bottom: 1px solid var(--border);
}

h1 { font-size: 22px; font-weight: 600; }
.user-email { font-size: 13px; color: var(--text-dim); }

/* Sidebar */
.sidebar {
    position: fixed;
    top: 0; left: 0; bottom: 0;
    width: 220px;
    background: var(--card);
    border-right: 1px solid var(--border);
    transform: translateX(-100%);
    transition: transform 0.2s;
    z-index: 999;
}
.sidebar.open { transform: none; }
.main-content.sidebar-open { margin-left: 220px; }
.nav-item { display: block; padding: 10px 20px; color: var(--text); text-decoration: none; }
.nav-item.active { color: var(--blue); font-weight: 600; }
.sidebar-overlay { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); z-index: 998; }

/* Sections */
.main-content { padding: 24px; }
.section { display: none; }
.section.active { display: block; }

/* Buttons */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
}
.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-primary { background: var(--blue); color: #fff; }
.btn-buy { background: var(--green); color: #fff; }
.btn-sell { background: var(--red); color: #fff; }

/* Grid and cards */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 16px;
}

.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
}

.card-title {
    font-size: 14px;
    color: var(--text-dim);
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.card-value { font-size: 28px; font-weight: 700; margin-top: 8px; }

.metrics { display: flex; flex-wrap: wrap; gap: 16px; margin-top: 12px; }
.metric { flex: 1; min-width: 80px; }
.metric-label { font-size: 11px; color: var(--text-dim); text-transform: uppercase; }
.metric-value { font-size: 18px; font-weight: 600; margin-top: 2px; }

.positive { color: var(--green); }
.negative { color: var(--red); }
.neutral { color: var(--text-dim); }

/* Ticker and watchlist */
.market-ticker { display: flex; gap: 24px; overflow-x: auto; padding: 8px 24px; border-bottom: 1px solid var(--border); }
.ticker-item { white-space: nowrap; font-size: 13px; }
.ticker-item span + span, .watchlist-item span + span { margin-left: 8px; }
.ticker-item-symbol, .watchlist-item-symbol { font-weight: 600; }
.watchlist-item { display: flex; justify-content: space-between; padding: 8px 0; border-bottom: 1px solid var(--border); }

/* Team and news */
.team-photo { width: 64px; height: 64px; border-radius: 50%; }
.team-name { font-weight: 600; margin-top: 8px; }
.team-role, .news-time { font-size: 12px; color: var(--text-dim); }
.expertise-tag { display: inline-block; font-size: 11px; padding: 2px 8px; margin: 4px 4px 0 0; border-radius: 10px; background: var(--bg); }
.news-item { margin-bottom: 12px; }
.news-item.clickable { cursor: pointer; }
.news-header { display: flex; justify-content: space-between; gap: 12px; }
.news-title { font-weight: 600; }
.news-sentiment { font-size: 11px; text-transform: uppercase; }
.news-sentiment.positive { color: var(--green); }
.news-sentiment.negative { color: var(--red); }

/* Forms */
.auth-container { max-width: 360px; margin: 80px auto; }
.auth-form, .trading-form { display: flex; flex-direction: column; gap: 10px; }
.auth-form input, .trading-form input, .trading-form select {
    padding: 8px;
    border: 1px solid var(--border);
    border-radius: 6px;
    background: var(--card);
    color: var(--text);
}
.auth-error, .error { color: var(--red); font-size: 13px; }
.trade-message { margin-top: 8px; font-size: 13px; }
.trade-message.success { color: var(--green); }
.trade-message.error { color: var(--red); }

/* Forecast and sentiment */
.forecast-chart { width: 100%; max-width: 640px; }
.forecast-table { margin: 12px auto; border-collapse: collapse; text-align: center; }
.forecast-table th, .forecast-table td { padding: 6px 10px; border-bottom: 1px solid var(--border); }

/* Chat */
.chatbot-modal { position: fixed; right: 20px; bottom: 20px; width: 340px; display: none; }
.chatbot-modal.open { display: block; }
.chat-message { margin: 6px 0; padding: 8px 12px; border-radius: 8px; }
.user-message { background: var(--blue); color: #fff; margin-left: 40px; }
.bot-message { background: var(--bg); margin-right: 40px; }
.typing { font-style: italic; color: var(--text-dim); }

/* Error notification */
.error-notification {
    position: fixed;
    top: 20px;
    right: 20px;
    background: #ff4757;
    color: white;
    padding: 15px;
    border-radius: 8px;
    z-index: 9999;
    max-width: 300px;
}

@media (max-width: 1024px) {
    .main-content.sidebar-open { margin-left: 0; }
}

@media (max-width: 600px) {
    .grid { grid-template-columns: 1fr; }
    header { flex-direction: column; gap: 12px; }
}
";
