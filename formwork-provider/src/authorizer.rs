//! Grant-based authorization checks.
//!
//! The app-config payload carries the role definitions and the requesting
//! user's flattened grants; `can()` is a pure check over that snapshot.
//! Grants with row-level `conditions` are never matched client-side — the
//! backend is the authority for those, and the client answer is a denial
//! with a reason.

use formwork_schema::wire::{Grant, Role};
use formwork_schema::User;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions a grant can cover. `Manage` is the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizerAction {
    Create,
    Read,
    Update,
    Delete,
    Manage,
}

impl fmt::Display for AuthorizerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Manage => "manage",
        };
        write!(f, "{name}")
    }
}

/// What an authorization check is about.
#[derive(Debug, Clone, Default)]
pub struct AuthorizerContext {
    /// The resource under check — an entity id.
    pub subject: String,
    /// The acting user; the orchestrator injects the signed-in user.
    pub user: Option<User>,
}

impl AuthorizerContext {
    pub fn entity(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }
}

/// The access-control snapshot cached by `load_app`.
#[derive(Debug, Clone, Default)]
pub struct Authorizer {
    pub roles: Vec<Role>,
    pub user_grants: Vec<Grant>,
}

impl Authorizer {
    pub fn new(roles: Vec<Role>, user_grants: Vec<Grant>) -> Self {
        Self { roles, user_grants }
    }

    /// Checks whether the snapshot allows `action` on the context's
    /// subject. Returns the denial reason when a grant exists but cannot
    /// be evaluated client-side.
    pub fn can(&self, action: AuthorizerAction, context: &AuthorizerContext) -> (bool, Option<String>) {
        let mut conditional_match = false;
        for grant in &self.user_grants {
            if !action_matches(&grant.action, action) || !subject_matches(&grant.resource, context) {
                continue;
            }
            if grant.conditions.is_some() {
                conditional_match = true;
                continue;
            }
            return (true, None);
        }
        if conditional_match {
            return (
                false,
                Some("grant has row-level conditions the client cannot evaluate".to_string()),
            );
        }
        (false, None)
    }
}

fn action_matches(granted: &str, requested: AuthorizerAction) -> bool {
    granted == "manage" || granted == requested.to_string()
}

fn subject_matches(granted: &str, context: &AuthorizerContext) -> bool {
    granted == "all" || granted == context.subject
}
