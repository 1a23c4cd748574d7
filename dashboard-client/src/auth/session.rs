//! Auth state and its notification stream

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::identity::{IdentityProvider, User};
use crate::error::Result;

/// Current sign-in state, published to every subscriber
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    state: watch::Sender<Option<User>>,
}

impl AuthSession {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(None);
        Self { provider, state }
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Subscribe to auth state; the first `next()` yields the current state
    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.state.subscribe(),
            primed: false,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        let user = self.provider.sign_in(email, password).await?;
        info!("User logged in: {}", user.email);
        self.state.send_replace(Some(user));
        Ok(())
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let user = self.provider.create_account(email, password).await?;
        info!("User signed up: {}", user.email);
        self.state.send_replace(Some(user));
        Ok(())
    }

    /// Sign out; subscribers see the change even if the provider call fails
    pub async fn sign_out(&self) {
        let Some(user) = self.current_user() else {
            return;
        };
        if let Err(e) = self.provider.sign_out(&user).await {
            warn!("Provider sign-out failed for {}: {e}", user.email);
        }
        self.state.send_replace(None);
    }
}

/// Handle on the auth state stream; drop or `unsubscribe` to detach
pub struct AuthSubscription {
    rx: watch::Receiver<Option<User>>,
    primed: bool,
}

impl AuthSubscription {
    /// Next auth state; `None` once the session is gone
    pub async fn next(&mut self) -> Option<Option<User>> {
        if !self.primed {
            self.primed = true;
            return Some(self.rx.borrow_and_update().clone());
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    pub fn unsubscribe(self) {}
}
