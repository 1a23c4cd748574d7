//! Authentication: identity provider access, session state and the gate view

pub mod gate;
pub mod identity;
pub mod session;

pub use gate::{AuthForm, AuthGate, Region};
pub use identity::{IdentityProvider, RestIdentity, User};
pub use session::{AuthSession, AuthSubscription};
