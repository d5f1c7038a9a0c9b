use formwork_schema::AppLifecycle::*;

// ── forward edges ────────────────────────────────────────────────

#[test]
fn load_sequence_edges() {
    assert!(Idle.can_transition(Initializing));
    assert!(Stale.can_transition(Initializing));
    assert!(Initializing.can_transition(Ready));
    assert!(Initializing.can_transition(SignInRequired));
    assert!(Initializing.can_transition(Error));
}

#[test]
fn refresh_and_sign_out_edges() {
    assert!(Ready.can_transition(Stale));
    assert!(SignInRequired.can_transition(Stale));
    // sign-out re-enters Initializing directly
    assert!(Ready.can_transition(Initializing));
    assert!(SignInRequired.can_transition(Initializing));
}

#[test]
fn error_is_terminal_until_reset() {
    assert!(Error.can_transition(Idle));
    assert!(!Error.can_transition(Initializing));
    assert!(!Error.can_transition(Ready));
    assert!(!Error.can_transition(Stale));
}

// ── rejected edges ───────────────────────────────────────────────

#[test]
fn no_shortcuts_into_ready() {
    assert!(!Idle.can_transition(Ready));
    assert!(!Stale.can_transition(Ready));
    assert!(!SignInRequired.can_transition(Ready));
}

#[test]
fn self_transitions_are_rejected() {
    for state in [Idle, Initializing, Ready, Error, Stale, SignInRequired] {
        assert!(!state.can_transition(state), "{state:?} -> {state:?}");
    }
}

#[test]
fn loadable_states() {
    assert!(Idle.is_loadable());
    assert!(Stale.is_loadable());
    assert!(!Ready.is_loadable());
    assert!(!Initializing.is_loadable());
    assert!(!Error.is_loadable());
    assert!(!SignInRequired.is_loadable());
}
