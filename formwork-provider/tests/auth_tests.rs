use formwork_provider::{AuthService, ProviderError, StaticAuthService};
use formwork_schema::User;

fn user() -> User {
    User {
        id: "user-1".to_string(),
        email: "ann@example.com".to_string(),
        name: "Ann".to_string(),
    }
}

// ── session probes ───────────────────────────────────────────────

#[tokio::test]
async fn signed_out_probes_return_none() {
    let auth = StaticAuthService::new(user(), "tok");
    assert!(auth.current_user().await.is_none());
    assert!(auth.jwt_token().await.is_none());
}

#[tokio::test]
async fn signed_in_constructor_has_active_session() {
    let auth = StaticAuthService::signed_in(user(), "tok");
    assert_eq!(auth.current_user().await.unwrap().id, "user-1");
    assert_eq!(auth.jwt_token().await.as_deref(), Some("tok"));
}

// ── sign in / out ────────────────────────────────────────────────

#[tokio::test]
async fn sign_in_with_matching_email_opens_session() {
    let auth = StaticAuthService::new(user(), "tok");
    let signed = auth.sign_in("ann@example.com", "hunter2").await.unwrap();
    assert_eq!(signed.email, "ann@example.com");
    assert!(auth.current_user().await.is_some());
}

#[tokio::test]
async fn sign_in_with_wrong_email_fails() {
    let auth = StaticAuthService::new(user(), "tok");
    let err = auth.sign_in("bob@example.com", "hunter2").await.unwrap_err();
    assert!(matches!(err, ProviderError::Auth(_)));
    assert!(auth.current_user().await.is_none());
}

#[tokio::test]
async fn sign_in_with_empty_password_fails() {
    let auth = StaticAuthService::new(user(), "tok");
    assert!(auth.sign_in("ann@example.com", "").await.is_err());
}

#[tokio::test]
async fn sign_out_closes_session() {
    let auth = StaticAuthService::signed_in(user(), "tok");
    auth.sign_out().await.unwrap();
    assert!(auth.current_user().await.is_none());
    assert!(auth.jwt_token().await.is_none());
}
