//! Identity provider access
//!
//! Email/password accounts on an Identity-Toolkit-style REST service:
//! - `accounts:signInWithPassword` for sign-in
//! - `accounts:signUp` for account creation
//!
//! Provider error messages are passed through untouched so the forms can show
//! them verbatim.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};

/// Signed-in user record
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Operations the auth gate needs from an identity service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;
    async fn create_account(&self, email: &str, password: &str) -> Result<User>;
    async fn sign_out(&self, user: &User) -> Result<()>;
}

/// Request body shared by sign-in and sign-up
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorEnvelope {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

/// REST identity client
pub struct RestIdentity {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl RestIdentity {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, method: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/accounts:{method}", self.base_url))
            .map_err(|e| DashboardError::Config(format!("Invalid identity URL: {e}")))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn password_call(&self, method: &str, email: &str, password: &str) -> Result<User> {
        let url = self.endpoint(method)?;
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .body(serde_json::to_vec(&body)?)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Fall back to the raw body when the envelope is not the usual shape
            let message = serde_json::from_str::<ProviderErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            warn!("Identity {method} failed: {message}");
            return Err(DashboardError::Auth(message));
        }

        let account: PasswordResponse = serde_json::from_str(&text)?;
        let email = if account.email.is_empty() {
            email.to_string()
        } else {
            account.email
        };
        debug!("Identity {method} succeeded for {email}");

        Ok(User {
            uid: account.local_id,
            email,
            id_token: account.id_token,
            refresh_token: account.refresh_token,
            signed_in_at: Utc::now(),
        })
    }
}

#[async_trait]
impl IdentityProvider for RestIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        self.password_call("signInWithPassword", email, password)
            .await
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<User> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_out(&self, user: &User) -> Result<()> {
        // Tokens are bearer credentials; dropping them is the sign-out
        info!("User signed out: {}", user.email);
        Ok(())
    }
}
