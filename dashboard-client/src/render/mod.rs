//! Render layer - projects state into HTML
//!
//! Every widget is a pure function from a snapshot to an HTML fragment, and a
//! re-render replaces the widget's whole subtree. `Page` keeps the last
//! fragment per widget so a change to one collection only re-renders the
//! widgets that read it.
//!
//! # Architecture
//! - `widgets.rs`: portfolio card, ticker, watchlist, team grid, news feed
//! - `forms.rs`: auth forms, trade form, chat transcript
//! - `panels.rs`: forecast chart/table and sentiment report
//! - `animate.rs`: ease-out counters for the portfolio figures
//! - `css.rs`: styling
//! - `format.rs`: currency/percent formatting and HTML escaping

pub mod animate;
mod css;
pub mod format;
pub mod forms;
pub mod panels;
pub mod widgets;

use std::time::Duration;

use tokio::time::Instant;

use animate::Counter;
use format::html_escape;
use widgets::PortfolioFigures;

use crate::auth::AuthGate;
use crate::chat::ChatSession;
use crate::config::Config;
use crate::panels::{ForecastView, SentimentView};
use crate::shell::{Notification, Section, ShellState};
use crate::state::AppState;
use crate::trading::TradeMessage;
use crate::types::{Collection, PortfolioSnapshot};

#[derive(Debug, Clone, Default)]
struct Fragments {
    ticker: String,
    watchlist: String,
    trade_form: String,
    team: String,
    news: String,
}

#[derive(Debug, Clone)]
struct PortfolioCounters {
    total_value: Counter,
    daily_change: Counter,
    total_return: Counter,
}

impl PortfolioCounters {
    fn new(duration: Duration) -> Self {
        Self {
            total_value: Counter::new(0.0, duration),
            daily_change: Counter::new(0.0, duration),
            total_return: Counter::new(0.0, duration),
        }
    }

    fn retarget(&mut self, portfolio: &PortfolioSnapshot) {
        self.total_value.retarget(portfolio.total_value);
        self.daily_change.retarget(portfolio.daily_change);
        self.total_return.retarget(portfolio.total_return);
    }

    fn shown(&self) -> PortfolioFigures {
        PortfolioFigures {
            total_value: self.total_value.value(),
            daily_change: self.daily_change.value(),
            total_return: self.total_return.value(),
        }
    }

    fn is_settled(&self) -> bool {
        self.total_value.is_settled()
            && self.daily_change.is_settled()
            && self.total_return.is_settled()
    }
}

/// Full view model of the dashboard page
pub struct Page {
    pub shell: ShellState,
    pub gate: AuthGate,
    pub chat: ChatSession,
    pub trade_message: Option<TradeMessage>,
    pub forecast: Option<ForecastView>,
    pub sentiment: Option<SentimentView>,
    trade_message_ttl: Duration,
    portfolio: PortfolioSnapshot,
    counters: PortfolioCounters,
    fragments: Fragments,
}

impl Page {
    pub fn new(config: &Config) -> Self {
        let mut page = Self {
            shell: ShellState::default(),
            gate: AuthGate::default(),
            chat: ChatSession::default(),
            trade_message: None,
            forecast: None,
            sentiment: None,
            trade_message_ttl: config.trade_message_ttl(),
            portfolio: PortfolioSnapshot::default(),
            counters: PortfolioCounters::new(config.counter_animation()),
            fragments: Fragments::default(),
        };
        page.refresh_all(&AppState::default());
        page
    }

    /// Re-render the widgets that read `changed`
    pub fn refresh(&mut self, changed: Collection, state: &AppState) {
        match changed {
            Collection::Portfolio => {
                self.portfolio = state.portfolio.clone();
                self.counters.retarget(&self.portfolio);
            }
            Collection::Market => {
                self.fragments.ticker = widgets::market_ticker(&state.market);
                self.fragments.watchlist = widgets::watchlist(&state.market);
                self.fragments.trade_form = forms::trade_form(&state.market);
            }
            Collection::Team => self.fragments.team = widgets::team_grid(&state.team),
            Collection::News => self.fragments.news = widgets::news_feed(&state.news),
        }
    }

    pub fn refresh_all(&mut self, state: &AppState) {
        for collection in [
            Collection::Portfolio,
            Collection::Market,
            Collection::Team,
            Collection::News,
        ] {
            self.refresh(collection, state);
        }
    }

    /// Counters are still moving; the page should be rendered again soon
    pub fn is_animating(&self) -> bool {
        !self.counters.is_settled()
    }

    /// When the next visible transient message expires
    pub fn next_expiry(&self) -> Option<Instant> {
        let notification = self.shell.notification().map(Notification::expires_at);
        let trade = self
            .trade_message
            .as_ref()
            .filter(|m| m.is_visible(self.trade_message_ttl))
            .map(|m| m.expires_at(self.trade_message_ttl));
        notification.into_iter().chain(trade).min()
    }

    fn section(&self, section: Section, body: &str) -> String {
        let active = if self.shell.section == section { " active" } else { "" };
        format!(
            r#"<section id="{id}" class="section{active}">
            <h2>{title}</h2>
            {body}
        </section>"#,
            id = section.id(),
            title = section.title(),
        )
    }

    fn nav(&self) -> String {
        Section::ALL
            .iter()
            .map(|s| {
                let active = if self.shell.section == *s { " active" } else { "" };
                format!(
                    r##"<a href="#{id}" class="nav-item{active}" data-section="{id}">{title}</a>"##,
                    id = s.id(),
                    title = s.title()
                )
            })
            .collect::<Vec<_>>()
            .join("\n            ")
    }

    fn app_body(&self) -> String {
        let portfolio = widgets::portfolio_card(&self.portfolio, self.counters.shown());
        let dashboard = format!(
            r#"<div class="grid">
            {portfolio}
            <div class="card"><span class="card-title">Watchlist</span><div id="watchlist">{watchlist}</div></div>
        </div>"#,
            watchlist = self.fragments.watchlist,
        );
        let trading = format!(
            "{}\n{}",
            self.fragments.trade_form,
            forms::trade_message(self.trade_message.as_ref(), self.trade_message_ttl)
        );

        [
            self.section(Section::Dashboard, &dashboard),
            self.section(Section::Analytics, &portfolio),
            self.section(Section::Trading, &trading),
            self.section(
                Section::News,
                &format!(r#"<div id="newsFeed">{}</div>"#, self.fragments.news),
            ),
            self.section(
                Section::Team,
                &format!(r#"<div id="teamGrid" class="grid">{}</div>"#, self.fragments.team),
            ),
            self.section(Section::Forecast, &panels::forecast_panel(self.forecast.as_ref())),
            self.section(
                Section::Sentiment,
                &panels::sentiment_panel(self.sentiment.as_ref()),
            ),
        ]
        .join("\n        ")
    }

    /// Render the whole page
    pub fn html(&self) -> String {
        let signed_in = self.gate.is_authenticated();
        let auth_hidden = if signed_in { " hidden" } else { "" };
        let app_hidden = if signed_in { "" } else { " hidden" };
        let email = self
            .gate
            .user_email
            .as_deref()
            .map(|e| {
                format!(
                    r#"<span class="user-email" id="userEmail">{}</span>"#,
                    html_escape(e)
                )
            })
            .unwrap_or_default();
        let sidebar = if self.shell.sidebar_open { " open" } else { "" };
        let pushed = if self.shell.sidebar_open && !self.shell.is_narrow() {
            " sidebar-open"
        } else {
            ""
        };
        let overlay = if self.shell.sidebar_open && self.shell.is_narrow() {
            r#"<div class="sidebar-overlay"></div>"#
        } else {
            ""
        };
        let chat_open = if self.shell.chat_open { " open" } else { "" };
        let notification = self
            .shell
            .notification()
            .map(|n| {
                format!(
                    r#"<div class="error-notification">{}</div>"#,
                    html_escape(&n.message)
                )
            })
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html lang="en" data-color-scheme="{theme}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Portfolio Dashboard</title>
    <style>
{css}
    </style>
</head>
<body>
    <div id="authRoot"{auth_hidden}>
    {auth}
    </div>
    <div id="appContainer"{app_hidden}>
        <header>
            <h1>Portfolio Dashboard</h1>
            {email}
        </header>
        <div class="market-ticker" id="marketTicker">{ticker}</div>
        <nav class="sidebar{sidebar}" id="sidebar">
            {nav}
        </nav>
        {overlay}
        <main class="main-content{pushed}" id="mainContent">
        {body}
        </main>
        <div class="chatbot-modal{chat_open}" id="chatbotModal">
            <div id="chatMessages">{chat}</div>
        </div>
    </div>
    {notification}
</body>
</html>"#,
            theme = self.shell.theme.as_str(),
            css = css::STYLES,
            auth = forms::auth_view(&self.gate),
            ticker = self.fragments.ticker,
            nav = self.nav(),
            body = self.app_body(),
            chat = forms::chat_transcript(&self.chat),
        )
    }
}
