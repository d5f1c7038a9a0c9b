//! Pluggable authentication seam.
//!
//! Concrete SSO/identity-provider wiring lives outside this crate; the
//! REST provider only needs the four capabilities below. Probes return
//! `None` when no session exists — absence is not an error.

use crate::{ProviderError, ProviderResult};
use async_trait::async_trait;
use formwork_schema::User;
use std::sync::atomic::{AtomicBool, Ordering};

/// Session capabilities a backend provider needs from an auth integration.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticates with email/password credentials.
    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<User>;

    /// Ends the current session.
    async fn sign_out(&self) -> ProviderResult<()>;

    /// The signed-in user, or `None` without a session.
    async fn current_user(&self) -> Option<User>;

    /// The current session token, or `None` without a session.
    async fn jwt_token(&self) -> Option<String>;
}

/// Fixed-credential auth service for embedding and tests.
///
/// Holds one user and one token; signing in with the user's email turns
/// the session on, signing out turns it off.
pub struct StaticAuthService {
    user: User,
    token: String,
    signed_in: AtomicBool,
}

impl StaticAuthService {
    /// Creates a signed-out service for the given user and token.
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
            signed_in: AtomicBool::new(false),
        }
    }

    /// Creates a service with an already-active session.
    pub fn signed_in(user: User, token: impl Into<String>) -> Self {
        let service = Self::new(user, token);
        service.signed_in.store(true, Ordering::SeqCst);
        service
    }
}

#[async_trait]
impl AuthService for StaticAuthService {
    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<User> {
        if email == self.user.email && !password.is_empty() {
            self.signed_in.store(true, Ordering::SeqCst);
            Ok(self.user.clone())
        } else {
            Err(ProviderError::Auth("invalid credentials".to_string()))
        }
    }

    async fn sign_out(&self) -> ProviderResult<()> {
        self.signed_in.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        self.signed_in
            .load(Ordering::SeqCst)
            .then(|| self.user.clone())
    }

    async fn jwt_token(&self) -> Option<String> {
        self.signed_in
            .load(Ordering::SeqCst)
            .then(|| self.token.clone())
    }
}
