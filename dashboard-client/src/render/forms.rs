//! Interactive views: auth forms, trade form, chat transcript

use std::fmt::Write;

use super::format::html_escape;
use crate::auth::{AuthForm, AuthGate};
use crate::chat::ChatSession;
use crate::trading::TradeMessage;
use crate::types::MarketQuote;

fn error_line(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="auth-error">{}</div>"#, html_escape(e)))
        .unwrap_or_default()
}

fn hidden(is_hidden: bool) -> &'static str {
    if is_hidden { " hidden" } else { "" }
}

/// Login and signup forms; only the active one is visible
pub fn auth_view(gate: &AuthGate) -> String {
    format!(
        r##"<div id="authContainer" class="auth-container">
        <form id="loginForm" class="auth-form"{login_hidden}>
            <h2>Sign in</h2>
            <input type="email" name="email" placeholder="Email" required>
            <input type="password" name="password" placeholder="Password" required>
            {login_error}
            <button type="submit" class="btn btn-primary">Login</button>
            <a href="#signup" id="showSignup">Create an account</a>
        </form>
        <form id="signupForm" class="auth-form"{signup_hidden}>
            <h2>Create account</h2>
            <input type="email" name="email" placeholder="Email" required>
            <input type="password" name="password" placeholder="Password" required>
            {signup_error}
            <button type="submit" class="btn btn-primary">Sign up</button>
            <a href="#login" id="showLogin">Already have an account?</a>
        </form>
    </div>"##,
        login_hidden = hidden(gate.form != AuthForm::Login),
        login_error = error_line(gate.login_error.as_deref()),
        signup_hidden = hidden(gate.form != AuthForm::Signup),
        signup_error = error_line(gate.signup_error.as_deref()),
    )
}

/// Symbol selector as `SYM - $price`; buttons disabled without quotes
pub fn trade_form(market: &[MarketQuote]) -> String {
    let (options, disabled) = if market.is_empty() {
        ("<option>No stocks available</option>".to_string(), " disabled")
    } else {
        let mut options = String::new();
        for quote in market {
            let symbol = html_escape(&quote.symbol);
            let _ = write!(
                options,
                r#"<option value="{symbol}">{symbol} - ${:.2}</option>"#,
                quote.price
            );
        }
        (options, "")
    };

    format!(
        r#"<form id="trading-form" class="trading-form">
                <select id="trade-symbol">{options}</select>
                <input type="number" id="trade-quantity" min="1" step="1" placeholder="Quantity">
                <button type="button" id="buy-btn" class="btn btn-buy"{disabled}>Buy</button>
                <button type="button" id="sell-btn" class="btn btn-sell"{disabled}>Sell</button>
            </form>"#
    )
}

/// The trade message, or nothing once it has expired
pub fn trade_message(message: Option<&TradeMessage>, ttl: std::time::Duration) -> String {
    match message {
        Some(m) if m.is_visible(ttl) => format!(
            r#"<div id="trade-message" class="trade-message {}">{}</div>"#,
            if m.is_error { "error" } else { "success" },
            html_escape(&m.text)
        ),
        _ => String::new(),
    }
}

pub fn chat_transcript(chat: &ChatSession) -> String {
    let mut html = String::new();
    for message in &chat.messages {
        let _ = writeln!(
            html,
            r#"<div class="chat-message {}" data-id="{}"><p>{}</p></div>"#,
            message.sender.css_class(),
            message.id,
            html_escape(&message.text)
        );
    }
    if chat.thinking {
        html.push_str(
            r#"<div class="chat-message bot-message typing"><p>AI is thinking...</p></div>"#,
        );
    }
    html
}
