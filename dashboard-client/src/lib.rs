//! Dashboard Client - portfolio dashboard behind an identity-provider sign-in
//!
//! A native async client for the portfolio dashboard API.
//!
//! # Architecture
//! - `auth`: identity provider, auth state stream and the auth gate
//! - `client`: JSON API client behind the `DashboardApi` trait
//! - `loader` / `refresh`: startup load with fallbacks, cancellable pollers
//! - `state`: owned application state with change notifications
//! - `render`: pure state-to-HTML projections
//! - `app`: one dashboard session tying the above together
//!
//! # Features
//! - Market quotes every 30s, portfolio every 60s
//! - Mock trading against the local portfolio
//! - Chat, price forecast and news sentiment panels

// Clippy configuration for dashboard code patterns
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)] // Page templates are long
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::if_not_else)] // Readability preference
#![allow(clippy::map_unwrap_or)] // Explicit error handling preference

pub mod app;
pub mod auth;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod loader;
pub mod logging;
pub mod panels;
pub mod refresh;
pub mod render;
pub mod shell;
pub mod state;
pub mod trading;
pub mod types;

pub use app::Dashboard;
pub use auth::{AuthGate, AuthSession, IdentityProvider, RestIdentity, User};
pub use client::{ApiClient, DashboardApi, RequestOptions};
pub use config::Config;
pub use error::{DashboardError, Result};
pub use loader::LoadReport;
pub use refresh::{PeriodicTask, RefreshLoop};
pub use render::Page;
pub use state::{AppState, Store};
pub use types::*;
