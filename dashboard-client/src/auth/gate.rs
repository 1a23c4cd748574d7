//! Auth gate view state
//!
//! Exactly one region is visible at a time. The region only moves when the
//! observed auth state changes (`apply`), never as a side effect of a submit.

use super::identity::User;
use super::session::AuthSession;

/// Top-level region on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Auth,
    App,
}

/// Which auth form is showing inside the auth region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Signup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGate {
    pub region: Region,
    pub form: AuthForm,
    pub user_email: Option<String>,
    pub login_error: Option<String>,
    pub signup_error: Option<String>,
}

impl Default for AuthGate {
    fn default() -> Self {
        Self {
            region: Region::Auth,
            form: AuthForm::Login,
            user_email: None,
            login_error: None,
            signup_error: None,
        }
    }
}

impl AuthGate {
    /// Follow an auth state observation
    pub fn apply(&mut self, user: Option<&User>) {
        match user {
            Some(user) => {
                self.region = Region::App;
                self.user_email = Some(user.email.clone());
            }
            None => {
                self.region = Region::Auth;
                self.user_email = None;
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.region == Region::App
    }

    pub async fn submit_login(&mut self, session: &AuthSession, email: &str, password: &str) {
        self.login_error = session
            .sign_in(email, password)
            .await
            .err()
            .map(|e| e.to_string());
    }

    pub async fn submit_signup(&mut self, session: &AuthSession, email: &str, password: &str) {
        self.signup_error = session
            .sign_up(email, password)
            .await
            .err()
            .map(|e| e.to_string());
    }

    pub async fn logout(&self, session: &AuthSession) {
        session.sign_out().await;
    }

    pub fn show_signup(&mut self) {
        self.form = AuthForm::Signup;
        self.login_error = None;
    }

    pub fn show_login(&mut self) {
        self.form = AuthForm::Login;
        self.signup_error = None;
    }
}
