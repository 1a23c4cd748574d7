//! Headless terminal front-end for the dashboard
//!
//! Reads commands from stdin, keeps the rendered page in `DASHBOARD_OUTPUT`
//! up to date, and shuts down cleanly on Ctrl+C / SIGTERM.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::Instant;
use tracing::{error, info, warn};

use dashboard_client::auth::AuthSession;
use dashboard_client::logging::init_logging;
use dashboard_client::panels::{ForecastView, SentimentView, sentiment_ticker};
use dashboard_client::shell::{Section, Shortcut};
use dashboard_client::trading::TradeMessage;
use dashboard_client::{Config, Dashboard, DashboardError, Page, RestIdentity, TradeAction};

/// Re-render cadence while counters are animating
const ANIMATION_FRAME: Duration = Duration::from_millis(100);

const HELP: &str = "commands: login EMAIL PASSWORD | signup EMAIL PASSWORD | logout | \
buy SYM QTY | sell SYM QTY | chat TEXT | forecast SYM DAYS CUR | sentiment SYM | \
refresh | theme | sidebar | nav SECTION | key CTRL-KEY | show login|signup | help | quit";

#[derive(Debug, PartialEq)]
enum Command {
    Login {
        email: String,
        password: String,
    },
    Signup {
        email: String,
        password: String,
    },
    Logout,
    Trade {
        action: TradeAction,
        symbol: String,
        quantity: String,
    },
    Chat(String),
    Forecast {
        ticker: String,
        days: String,
        currency: String,
    },
    Sentiment(String),
    Refresh,
    Theme,
    Sidebar,
    Navigate(Section),
    Shortcut(Shortcut),
    ShowSignup,
    ShowLogin,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();
    let arg = |i: usize| args.get(i).map(|s| (*s).to_string()).unwrap_or_default();

    let command = match word.to_ascii_lowercase().as_str() {
        "login" | "signup" if args.len() < 2 => {
            return Err(format!("usage: {word} EMAIL PASSWORD"));
        }
        "login" => Command::Login {
            email: arg(0),
            password: arg(1),
        },
        "signup" => Command::Signup {
            email: arg(0),
            password: arg(1),
        },
        "logout" => Command::Logout,
        "buy" | "sell" => Command::Trade {
            action: word.parse()?,
            symbol: arg(0).to_uppercase(),
            quantity: arg(1),
        },
        "chat" => Command::Chat(rest.to_string()),
        "forecast" => Command::Forecast {
            ticker: arg(0),
            days: arg(1),
            currency: args
                .get(2)
                .map_or_else(|| "USD".to_string(), |c| (*c).to_string()),
        },
        "sentiment" => Command::Sentiment(rest.to_string()),
        "refresh" => Command::Refresh,
        "theme" => Command::Theme,
        "sidebar" => Command::Sidebar,
        "nav" => Command::Navigate(rest.parse()?),
        "key" => {
            let key = rest
                .strip_prefix("ctrl-")
                .or_else(|| rest.strip_prefix("Ctrl+"))
                .unwrap_or(rest);
            let shortcut =
                Shortcut::from_ctrl_key(key).ok_or_else(|| format!("unbound key: {rest}"))?;
            Command::Shortcut(shortcut)
        }
        "show" if rest == "signup" => Command::ShowSignup,
        "show" if rest == "login" => Command::ShowLogin,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} ({HELP})")),
    };
    Ok(Some(command))
}

struct Frontend {
    config: Config,
    session: AuthSession,
    dashboard: Dashboard,
    page: Page,
}

impl Frontend {
    fn require_sign_in(&self) -> Result<(), DashboardError> {
        if self.page.gate.is_authenticated() {
            Ok(())
        } else {
            Err(DashboardError::NotSignedIn)
        }
    }

    /// Run one command; errors are printed next to its output
    async fn run(&mut self, command: Command) {
        if let Err(e) = self.dispatch(command).await {
            println!("error: {e}");
        }
    }

    async fn dispatch(&mut self, command: Command) -> Result<(), DashboardError> {
        match command {
            Command::Login { email, password } => {
                self.page
                    .gate
                    .submit_login(&self.session, &email, &password)
                    .await;
                if let Some(e) = &self.page.gate.login_error {
                    println!("login failed: {e}");
                }
            }
            Command::Signup { email, password } => {
                self.page
                    .gate
                    .submit_signup(&self.session, &email, &password)
                    .await;
                if let Some(e) = &self.page.gate.signup_error {
                    println!("signup failed: {e}");
                }
            }
            Command::Logout => self.page.gate.logout(&self.session).await,
            Command::Trade {
                action,
                symbol,
                quantity,
            } => {
                self.require_sign_in()?;
                let result = self.dashboard.trade(action, &symbol, &quantity).await;
                let message = TradeMessage::from_result(&result);
                println!("{}", message.text);
                self.page.trade_message = Some(message);
            }
            Command::Chat(text) => {
                self.require_sign_in()?;
                let Some(message) = self.page.chat.begin(&text) else {
                    return Ok(());
                };
                println!("AI is thinking...");
                self.write_page().await;
                let reply = self.dashboard.ask(&message).await;
                println!("bot: {}", self.page.chat.finish(reply).text);
            }
            Command::Forecast {
                ticker,
                days,
                currency,
            } => {
                self.require_sign_in()?;
                println!("Generating forecast...");
                let view = self.dashboard.forecast(&ticker, &days, &currency).await;
                match &view {
                    ForecastView::Chart { table, .. } => {
                        for c in table {
                            println!(
                                "{}  O {:.2}  H {:.2}  L {:.2}  C {:.2}",
                                c.date, c.open, c.high, c.low, c.close
                            );
                        }
                    }
                    other => println!("{}", other.message().unwrap_or_default()),
                }
                self.page.forecast = Some(view);
            }
            Command::Sentiment(input) => {
                self.require_sign_in()?;
                let Some(ticker) = sentiment_ticker(&input) else {
                    return Ok(());
                };
                println!("Analyzing sentiment for {ticker}...");
                self.page.sentiment = self.dashboard.sentiment(&input).await;
                match &self.page.sentiment {
                    Some(SentimentView::Report(r)) => println!(
                        "{}: +{} ={} -{} avg {:.2} -> {}",
                        r.ticker,
                        r.sentiment_counts.positive,
                        r.sentiment_counts.neutral,
                        r.sentiment_counts.negative,
                        r.average_score,
                        r.allocation_suggestion.strategy
                    ),
                    Some(SentimentView::NoData { ticker, message }) => {
                        println!("No sentiment data found for {ticker}: {message}");
                    }
                    Some(SentimentView::Error(e)) => println!("Error analyzing sentiment: {e}"),
                    None => {}
                }
            }
            Command::Refresh => {
                self.require_sign_in()?;
                match self.dashboard.refresh_market_now().await {
                    Ok(stored) => println!("{}", refresh_summary(stored)),
                    Err(e) => {
                        let message = format!("Failed to refresh market data: {e}");
                        println!("{message}");
                        self.page.shell.show_error(message);
                    }
                }
            }
            Command::Theme => println!("theme: {}", self.page.shell.toggle_theme().as_str()),
            Command::Sidebar => self.page.shell.toggle_sidebar(),
            Command::Navigate(section) => self.page.shell.navigate(section),
            Command::Shortcut(shortcut) => self.page.shell.handle_shortcut(shortcut),
            Command::ShowSignup => self.page.gate.show_signup(),
            Command::ShowLogin => self.page.gate.show_login(),
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
        Ok(())
    }

    async fn write_page(&self) {
        if let Err(e) = tokio::fs::write(&self.config.output_path, self.page.html()).await {
            warn!("Failed to write {}: {e}", self.config.output_path);
        }
    }
}

fn refresh_summary(stored: usize) -> String {
    if stored == 0 {
        "No market data received; quotes unchanged".to_string()
    } else {
        format!("Market data refreshed ({stored} quotes)")
    }
}

/// Resolves at `deadline`, or never when there is none
async fn sleep_until_expiry(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        () = terminate => info!("Received SIGTERM, shutting down..."),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&config) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let identity = Arc::new(RestIdentity::new(
        &config.identity_base_url,
        &config.identity_api_key,
    ));
    let mut app = Frontend {
        session: AuthSession::new(identity),
        dashboard: Dashboard::new(config.clone()),
        page: Page::new(&config),
        config,
    };
    let mut auth = app.session.subscribe();
    let mut changes = app.dashboard.subscribe();
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut frames = tokio::time::interval(ANIMATION_FRAME);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let credentials = (app.config.email.clone(), app.config.password.clone());
    if let (Some(email), Some(password)) = credentials {
        app.run(Command::Login { email, password }).await;
    }
    println!("{HELP}");
    app.write_page().await;

    loop {
        let expiry = app.page.next_expiry();
        tokio::select! {
            () = &mut shutdown => break,
            state = auth.next() => {
                let Some(user) = state else { break };
                app.page.gate.apply(user.as_ref());
                match user {
                    Some(user) if !app.dashboard.is_running() => {
                        println!("signed in as {}", user.email);
                        let report = app.dashboard.start().await;
                        if !report.is_complete() {
                            app.page
                                .shell
                                .show_error("Failed to load some data. Using fallback data.");
                        }
                    }
                    None if app.dashboard.is_running() => {
                        app.dashboard.shutdown().await;
                        println!("signed out");
                    }
                    _ => {}
                }
            }
            changed = changes.recv() => {
                let state = app.dashboard.store().snapshot().await;
                match changed {
                    Ok(collection) => app.page.refresh(collection, &state),
                    Err(RecvError::Lagged(_)) => app.page.refresh_all(&state),
                    Err(RecvError::Closed) => break,
                }
            }
            line = input.next_line() => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => app.run(command).await,
                    Ok(None) => {}
                    Err(e) => println!("error: {e}"),
                },
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read stdin: {e}");
                    break;
                }
            },
            _ = frames.tick(), if app.page.is_animating() => {}
            () = sleep_until_expiry(expiry) => {}
        }
        app.write_page().await;
    }

    app.dashboard.shutdown().await;
    app.write_page().await;
    info!("Dashboard exited");
    ExitCode::SUCCESS
}
