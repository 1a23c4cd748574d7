//! Data widgets: portfolio card, market ticker, watchlist, team grid, news feed
//!
//! Each function renders one widget's full subtree from the current snapshot.

use std::fmt::Write;

use super::format::{change_class, html_escape, signed_percent, signed_usd, usd};
use crate::types::{MarketQuote, NewsArticle, PortfolioSnapshot, TeamMember};

/// Number of quotes shown in the watchlist
pub const WATCHLIST_LEN: usize = 6;

/// Counter values currently on screen for the portfolio card
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PortfolioFigures {
    pub total_value: f64,
    pub daily_change: f64,
    pub total_return: f64,
}

impl From<&PortfolioSnapshot> for PortfolioFigures {
    fn from(p: &PortfolioSnapshot) -> Self {
        Self {
            total_value: p.total_value,
            daily_change: p.daily_change,
            total_return: p.total_return,
        }
    }
}

pub fn portfolio_card(portfolio: &PortfolioSnapshot, shown: PortfolioFigures) -> String {
    let mut allocation = String::new();
    for (label, pct) in portfolio.allocation.slices() {
        let _ = write!(
            allocation,
            r#"
                    <div class="metric">
                        <div class="metric-label">{label}</div>
                        <div class="metric-value">{pct:.1}%</div>
                    </div>"#
        );
    }

    format!(
        r#"<div class="card" id="portfolioCard">
                <div class="card-header">
                    <span class="card-title">Portfolio Value</span>
                </div>
                <div class="card-value" id="portfolioValue">{value}</div>
                <div class="portfolio-change {daily_class}" id="portfolioChange">
                    <span class="change-amount">{daily}</span>
                    <span class="change-percent">({daily_pct})</span>
                </div>
                <div class="total-return {return_class}">
                    Total return <span id="totalReturn">{total_return}</span>
                    <span class="change-percent">({return_pct})</span>
                </div>
                <div class="metrics allocation">{allocation}
                </div>
            </div>"#,
        value = usd(shown.total_value),
        daily_class = change_class(portfolio.daily_change),
        daily = signed_usd(shown.daily_change),
        daily_pct = signed_percent(portfolio.daily_change_percent),
        return_class = change_class(portfolio.total_return),
        total_return = usd(shown.total_return),
        return_pct = signed_percent(portfolio.total_return_percent),
    )
}

fn quote_row(quote: &MarketQuote, item_class: &str) -> String {
    format!(
        r#"<div class="{item_class}">
                    <span class="{item_class}-symbol">{symbol}</span>
                    <span class="{item_class}-price">${price:.2}</span>
                    <span class="{item_class}-change {class}">{change:+.2} ({pct})</span>
                </div>"#,
        symbol = html_escape(&quote.symbol),
        price = quote.price,
        class = change_class(quote.change),
        change = quote.change,
        pct = signed_percent(quote.change_percent),
    )
}

/// Every quote, in API order
pub fn market_ticker(market: &[MarketQuote]) -> String {
    if market.is_empty() {
        return r#"<div class="ticker-error">No market data available</div>"#.to_string();
    }
    market
        .iter()
        .map(|q| quote_row(q, "ticker-item"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The first six quotes, in API order
pub fn watchlist(market: &[MarketQuote]) -> String {
    if market.is_empty() {
        return r#"<div class="watchlist-error">No market data available</div>"#.to_string();
    }
    market
        .iter()
        .take(WATCHLIST_LEN)
        .map(|q| quote_row(q, "watchlist-item"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn team_grid(team: &[TeamMember]) -> String {
    team.iter()
        .map(|member| {
            let tags: String = member
                .expertise
                .iter()
                .map(|skill| {
                    format!(
                        r#"<span class="expertise-tag">{}</span>"#,
                        html_escape(skill)
                    )
                })
                .collect();
            format!(
                r#"<div class="card team-card">
                    <img src="{image}" alt="{name}" class="team-photo">
                    <div class="team-name">{name}</div>
                    <div class="team-role">{role}</div>
                    <div class="team-description">{description}</div>
                    <div class="team-expertise">{tags}</div>
                    <a href="{linkedin}" target="_blank" class="linkedin-link">LinkedIn</a>
                </div>"#,
                image = html_escape(&member.image),
                name = html_escape(&member.name),
                role = html_escape(&member.role),
                description = html_escape(&member.description),
                linkedin = html_escape(&member.linkedin),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// News cards; an article without a url links to `#` and is not clickable
pub fn news_feed(news: &[NewsArticle]) -> String {
    news.iter()
        .enumerate()
        .map(|(index, article)| {
            let (href, clickable) = match article.url.as_deref() {
                Some(url) if !url.is_empty() && url != "#" => (html_escape(url), " clickable"),
                _ => ("#".to_string(), ""),
            };
            format!(
                r#"<div class="card news-item{clickable}" data-url="{href}" data-index="{index}">
                    <div class="news-header">
                        <div>
                            <div class="news-title">{title}</div>
                            <div class="news-time">{time}</div>
                        </div>
                        <span class="news-sentiment {sentiment}">{sentiment}</span>
                    </div>
                    <div class="news-summary">{summary}</div>
                </div>"#,
                title = html_escape(&article.title),
                time = html_escape(&article.time),
                sentiment = html_escape(&article.sentiment),
                summary = html_escape(&article.summary),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    #[test]
    fn test_portfolio_card_uses_shown_figures() {
        let portfolio = fallback::portfolio();
        let html = portfolio_card(
            &portfolio,
            PortfolioFigures {
                total_value: 1000.0,
                ..PortfolioFigures::from(&portfolio)
            },
        );
        assert!(html.contains(r#"id="portfolioValue">$1,000.00<"#));
        assert!(html.contains("+$2,840.25"));
        assert!(html.contains("(+2.32%)"));
        assert!(html.contains("$25,420.50"));
        assert!(html.contains("65.2%"));
        assert!(html.contains("Crypto"));
    }

    #[test]
    fn test_ticker_has_all_and_watchlist_first_six() {
        let mut market = fallback::market_quotes();
        market.push(MarketQuote::new("ETH-USD", 3000.0, -5.0, -0.2));

        let ticker = market_ticker(&market);
        let watch = watchlist(&market);

        assert_eq!(ticker.matches(r#"class="ticker-item""#).count(), 7);
        assert_eq!(watch.matches(r#"class="watchlist-item""#).count(), 6);
        assert!(ticker.contains("ETH-USD"));
        assert!(!watch.contains("ETH-USD"));
        let aapl = watch.find("AAPL").expect("AAPL shown");
        let btc = watch.find("BTC-USD").expect("BTC shown");
        assert!(aapl < btc);
        assert!(watch.contains("-1.23 (-0.85%)"));
        assert!(watch.contains("+2.34 (+1.21%)"));
    }

    #[test]
    fn test_empty_market_placeholder() {
        assert!(market_ticker(&[]).contains("No market data available"));
        assert!(watchlist(&[]).contains("No market data available"));
    }

    #[test]
    fn test_news_without_url_is_not_clickable() {
        let news = vec![
            NewsArticle {
                title: "<b>Rates</b>".into(),
                summary: "Fed holds".into(),
                time: "1h ago".into(),
                sentiment: "neutral".into(),
                url: None,
            },
            NewsArticle {
                title: "Rally".into(),
                summary: "Up".into(),
                time: String::new(),
                sentiment: "positive".into(),
                url: Some("https://news.example.com/a?b=1&c=2".into()),
            },
        ];
        let html = news_feed(&news);
        assert!(html.contains(r##"class="card news-item" data-url="#""##));
        assert!(html.contains(
            r#"news-item clickable" data-url="https://news.example.com/a?b=1&amp;c=2""#
        ));
        assert!(html.contains("&lt;b&gt;Rates&lt;/b&gt;"));
    }

    #[test]
    fn test_team_grid_escapes_fields() {
        let team = vec![TeamMember {
            name: "Ada \"The Quant\"".into(),
            role: "Risk".into(),
            description: "Models & more".into(),
            image: "ada.png".into(),
            linkedin: "https://linkedin.com/in/ada".into(),
            expertise: vec!["VaR".into(), "Options".into()],
        }];
        let html = team_grid(&team);
        assert!(html.contains("Ada &quot;The Quant&quot;"));
        assert!(html.contains("Models &amp; more"));
        assert_eq!(html.matches("expertise-tag").count(), 2);
    }
}
