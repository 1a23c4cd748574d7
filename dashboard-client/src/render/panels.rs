//! Forecast and sentiment panel output

use std::fmt::Write;

use super::format::html_escape;
use crate::panels::{ForecastView, SentimentView};
use crate::types::{Candle, SentimentReport};

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 320.0;
const CHART_PADDING: f64 = 32.0;

/// Candlestick chart as inline SVG; green bodies close above open
pub fn candlestick_svg(ticker: &str, candles: &[Candle]) -> String {
    let title = format!("{} Forecasted Candlestick Chart", html_escape(ticker));
    if candles.is_empty() {
        return format!(r#"<div class="forecast-chart"><h4>{title}</h4></div>"#);
    }

    let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let span = if high > low { high - low } else { 1.0 };
    let plot_h = CHART_HEIGHT - 2.0 * CHART_PADDING;
    let y = |v: f64| CHART_PADDING + (high - v) / span * plot_h;

    let slot = (CHART_WIDTH - 2.0 * CHART_PADDING) / candles.len() as f64;
    let body_w = (slot * 0.6).max(1.0);

    let mut svg = format!(
        r#"<svg class="forecast-chart" viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" role="img" aria-label="{title}">
    <title>{title}</title>"#
    );
    for (i, c) in candles.iter().enumerate() {
        let cx = CHART_PADDING + slot * (i as f64 + 0.5);
        let color = if c.close >= c.open { "green" } else { "red" };
        let top = y(c.open.max(c.close));
        let body_h = (y(c.open.min(c.close)) - top).max(1.0);
        let _ = write!(
            svg,
            r#"
    <g class="candle" data-date="{date}">
        <line x1="{cx:.1}" y1="{wick_top:.1}" x2="{cx:.1}" y2="{wick_bottom:.1}" stroke="{color}"/>
        <rect x="{x:.1}" y="{top:.1}" width="{body_w:.1}" height="{body_h:.1}" fill="{color}"/>
    </g>"#,
            date = html_escape(&c.date),
            wick_top = y(c.high),
            wick_bottom = y(c.low),
            x = cx - body_w / 2.0,
        );
    }
    svg.push_str("\n</svg>");
    svg
}

/// Forecast table, one row per candle, prices to 2 decimals
pub fn forecast_table(ticker: &str, rows: &[Candle]) -> String {
    let mut html = format!(
        "<h4>{} Forecast (next days)</h4>\n<table class=\"forecast-table\">\n<tr><th>Date</th><th>Open</th><th>High</th><th>Low</th><th>Close</th></tr>",
        html_escape(ticker)
    );
    for c in rows {
        let _ = write!(
            html,
            "\n<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
            html_escape(&c.date),
            c.open,
            c.high,
            c.low,
            c.close
        );
    }
    html.push_str("\n</table>");
    html
}

pub fn forecast_panel(view: Option<&ForecastView>) -> String {
    match view {
        None => String::new(),
        Some(ForecastView::Chart {
            ticker,
            candles,
            table,
        }) => format!(
            "{}\n<div id=\"forecastResult\">{}</div>",
            candlestick_svg(ticker, candles),
            forecast_table(ticker, table)
        ),
        Some(other) => format!(
            r#"<div id="forecastResult">{}</div>"#,
            html_escape(&other.message().unwrap_or_default())
        ),
    }
}

fn sentiment_report(report: &SentimentReport) -> String {
    let counts = report.sentiment_counts;
    let suggestion = &report.allocation_suggestion;
    let headlines: String = report
        .headlines
        .iter()
        .map(|h| {
            format!(
                "<li>[{} | {:.2}] {}</li>",
                html_escape(&h.label.to_uppercase()),
                h.score,
                html_escape(&h.text)
            )
        })
        .collect();

    format!(
        r#"<strong>{ticker} Sentiment:</strong>
        <ul>
            <li>Positive: {positive} | Neutral: {neutral} | Negative: {negative}</li>
        </ul>
        <div>Average Sentiment Score: <b>{avg:.2}</b></div>
        <div>Allocation Suggestion: <b>{strategy}</b>
            <ul>
                <li>Stocks: {stocks}%</li>
                <li>Bonds: {bonds}%</li>
                <li>Cash: {cash}%</li>
            </ul>
            <em>{description}</em>
        </div>
        <div>News Headlines:</div>
        <ul>{headlines}</ul>"#,
        ticker = html_escape(&report.ticker),
        positive = counts.positive,
        neutral = counts.neutral,
        negative = counts.negative,
        avg = report.average_score,
        strategy = html_escape(&suggestion.strategy),
        stocks = suggestion.allocation.stocks,
        bonds = suggestion.allocation.bonds,
        cash = suggestion.allocation.cash,
        description = html_escape(&suggestion.description),
    )
}

pub fn sentiment_panel(view: Option<&SentimentView>) -> String {
    let inner = match view {
        None => return String::new(),
        Some(SentimentView::NoData { ticker, message }) => format!(
            "No sentiment data found for <b>{}</b>: {}",
            html_escape(ticker),
            html_escape(message)
        ),
        Some(SentimentView::Report(report)) => sentiment_report(report),
        Some(SentimentView::Error(e)) => format!(
            r#"<span class="error">Error analyzing sentiment: {}</span>"#,
            html_escape(e)
        ),
    };
    format!(r#"<div id="sentimentResult">{inner}</div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AllocationSuggestion, ScoredHeadline, SentimentCounts, SuggestedAllocation};

    fn candle(date: &str, open: f64, close: f64) -> Candle {
        Candle {
            date: date.into(),
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
        }
    }

    #[test]
    fn test_forecast_table_rows_in_order() {
        let rows = [candle("2025-03-01", 10.0, 11.5), candle("2025-03-02", 11.0, 10.5)];
        let html = forecast_table("AAPL", &rows);
        assert!(html.contains("AAPL Forecast (next days)"));
        assert!(html.contains(
            "<td>2025-03-01</td><td>10.00</td><td>12.50</td><td>9.00</td><td>11.50</td>"
        ));
        let first = html.find("2025-03-01").expect("first row");
        let second = html.find("2025-03-02").expect("second row");
        assert!(first < second);
    }

    #[test]
    fn test_candlestick_colors() {
        let svg = candlestick_svg("AAPL", &[candle("d1", 1.0, 2.0), candle("d2", 2.0, 1.0)]);
        assert_eq!(svg.matches(r#"<g class="candle""#).count(), 2);
        assert!(svg.contains(r#"fill="green""#));
        assert!(svg.contains(r#"fill="red""#));
        assert!(svg.contains("AAPL Forecasted Candlestick Chart"));
    }

    #[test]
    fn test_forecast_panel_messages() {
        let html = forecast_panel(Some(&ForecastView::Failed("Unknown error".into())));
        assert!(html.contains("Failed: Unknown error"));
        assert!(forecast_panel(None).is_empty());
    }

    #[test]
    fn test_sentiment_report_panel() {
        let report = SentimentReport {
            success: true,
            message: None,
            ticker: "TSLA".into(),
            sentiment_counts: SentimentCounts {
                positive: 3,
                neutral: 1,
                negative: 1,
            },
            average_score: 0.4567,
            allocation_suggestion: AllocationSuggestion {
                strategy: "Growth".into(),
                allocation: SuggestedAllocation {
                    stocks: 70.0,
                    bonds: 20.0,
                    cash: 10.0,
                },
                description: "Lean in".into(),
            },
            headlines: vec![ScoredHeadline {
                text: "EV demand <up>".into(),
                label: "positive".into(),
                score: 0.912,
            }],
        };
        let html = sentiment_panel(Some(&SentimentView::Report(Box::new(report))));
        assert!(html.contains("Positive: 3 | Neutral: 1 | Negative: 1"));
        assert!(html.contains("<b>0.46</b>"));
        assert!(html.contains("Stocks: 70%"));
        assert!(html.contains("<li>[POSITIVE | 0.91] EV demand &lt;up&gt;</li>"));
    }

    #[test]
    fn test_sentiment_no_data_and_error() {
        let html = sentiment_panel(Some(&SentimentView::NoData {
            ticker: "XYZ".into(),
            message: "no headlines".into(),
        }));
        assert!(html.contains("No sentiment data found for <b>XYZ</b>: no headlines"));

        let html = sentiment_panel(Some(&SentimentView::Error("API Error: 500".into())));
        assert!(html.contains("Error analyzing sentiment: API Error: 500"));
    }
}
