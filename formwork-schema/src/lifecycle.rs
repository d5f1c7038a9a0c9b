use serde::{Deserialize, Serialize};

/// Application lifecycle state.
///
/// Transitions follow a fixed graph (see [`AppLifecycle::can_transition`]):
///
/// ```text
/// Idle ─▶ Initializing ─▶ Ready | SignInRequired | Error
/// Ready, SignInRequired ─▶ Stale ─▶ Initializing
/// Ready, SignInRequired ─▶ Initializing        (sign-out)
/// Error ─▶ Idle                                (external reset only)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppLifecycle {
    #[default]
    Idle,
    Initializing,
    Ready,
    Error,
    Stale,
    SignInRequired,
}

impl AppLifecycle {
    /// Whether the lifecycle graph has an edge from `self` to `to`.
    ///
    /// Error is terminal until an external reset to Idle; Initializing is
    /// never entered from Error automatically.
    pub fn can_transition(self, to: Self) -> bool {
        use AppLifecycle::*;
        matches!(
            (self, to),
            (Idle, Initializing)
                | (Stale, Initializing)
                | (Initializing, Ready)
                | (Initializing, SignInRequired)
                | (Initializing, Error)
                | (Ready, Stale)
                | (Ready, Initializing)
                | (SignInRequired, Stale)
                | (SignInRequired, Initializing)
                | (Error, Idle)
        )
    }

    /// States from which a new app-load sequence may start.
    pub fn is_loadable(self) -> bool {
        matches!(self, Self::Idle | Self::Stale)
    }
}

impl std::fmt::Display for AppLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Error => "error",
            Self::Stale => "stale",
            Self::SignInRequired => "sign_in_required",
        };
        f.write_str(name)
    }
}
