//! Ambassador role derivation tests.
//!
//! Derivation order: role name, then the configured fallback id, then
//! the `AMBASSADOR_ROLE_ID` remote-config entry. The call counters on
//! `FakeBackend` prove which steps ran.

use std::sync::Arc;

use drwise_client::session::{DEFAULT_AMBASSADOR_ROLE_ID, Session, SessionOptions};
use drwise_client::storage::MemoryTokenStore;
use drwise_core::{Role, RoleId};
use drwise_integration_tests::{
    ConfigReply, FakeBackend, ambassador_config_entry, session_with, test_options,
    user_with_roles,
};

// ============================================================================
// Name Match (no network)
// ============================================================================

#[tokio::test]
async fn test_role_name_match_makes_ambassador_without_config_fetch() {
    let user = user_with_roles("u-1", vec![Role::named("r-amb", "Ambassador")]);
    let backend = Arc::new(FakeBackend::returning(user.clone()));
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(backend.clone(), store);

    session.login(user, "tok-amb").await;

    let state = session.snapshot();
    assert!(state.is_authenticated);
    assert!(state.is_ambassador);
    assert_eq!(backend.config_fetches(), 0);
}

#[tokio::test]
async fn test_role_name_match_is_case_insensitive() {
    let user = user_with_roles("u-1", vec![Role::named("r-amb", "aMbAsSaDoR")]);
    let backend = Arc::new(FakeBackend::returning(user.clone()));
    let session = session_with(backend, Arc::new(MemoryTokenStore::new()));

    session.login(user, "tok").await;
    assert!(session.snapshot().is_ambassador);
}

// ============================================================================
// Fallback Id Match (no network)
// ============================================================================

#[tokio::test]
async fn test_default_fallback_id_makes_ambassador() {
    let user = user_with_roles("u-1", vec![Role::new(DEFAULT_AMBASSADOR_ROLE_ID)]);
    let backend = Arc::new(FakeBackend::returning(user.clone()));
    let session = session_with(backend.clone(), Arc::new(MemoryTokenStore::new()));

    session.login(user, "tok").await;

    assert!(session.snapshot().is_ambassador);
    assert_eq!(backend.config_fetches(), 0);
}

#[tokio::test]
async fn test_injected_fallback_id_overrides_default() {
    let user = user_with_roles("u-1", vec![Role::new("team-role-7")]);
    let backend = Arc::new(FakeBackend::returning(user.clone()));
    let options = SessionOptions {
        ambassador_fallback: RoleId::new("team-role-7"),
        ..test_options()
    };
    let session = Session::new(backend.clone(), Arc::new(MemoryTokenStore::new()), options);

    session.login(user, "tok").await;

    assert!(session.snapshot().is_ambassador);
    assert_eq!(backend.config_fetches(), 0);
}

// ============================================================================
// Remote Config Lookup
// ============================================================================

#[tokio::test]
async fn test_config_id_match_requires_fetch() {
    let user = user_with_roles("u-1", vec![Role::named("r-special", "Partner")]);
    let backend = Arc::new(FakeBackend::returning(user.clone()));
    backend
        .set_config(ConfigReply::Entries(vec![ambassador_config_entry(
            "r-special",
        )]))
        .await;
    let session = session_with(backend.clone(), Arc::new(MemoryTokenStore::new()));

    session.login(user, "tok").await;

    assert!(session.snapshot().is_ambassador);
    assert_eq!(backend.config_fetches(), 1);
}

#[tokio::test]
async fn test_config_id_mismatch_is_not_ambassador() {
    let user = user_with_roles("u-1", vec![Role::new("r-ordinary")]);
    let backend = Arc::new(FakeBackend::returning(user.clone()));
    backend
        .set_config(ConfigReply::Entries(vec![ambassador_config_entry(
            "r-someone-else",
        )]))
        .await;
    let session = session_with(backend, Arc::new(MemoryTokenStore::new()));

    session.login(user, "tok").await;

    let state = session.snapshot();
    assert!(state.is_authenticated);
    assert!(!state.is_ambassador);
}

#[tokio::test]
async fn test_missing_config_key_is_not_ambassador() {
    let user = user_with_roles("u-1", vec![Role::new("r-1")]);
    let backend = Arc::new(FakeBackend::returning(user.clone()));
    backend
        .set_config(ConfigReply::Entries(vec![
            drwise_client::api::remote_config::ConfigEntry {
                key: "SUPPORT_PHONE".to_string(),
                value: "+911244567890".to_string(),
            },
        ]))
        .await;
    let session = session_with(backend.clone(), Arc::new(MemoryTokenStore::new()));

    session.login(user, "tok").await;

    assert!(session.snapshot().is_authenticated);
    assert!(!session.snapshot().is_ambassador);
    assert_eq!(backend.config_fetches(), 1);
}

#[tokio::test]
async fn test_config_fetch_failure_does_not_block_login() {
    let user = user_with_roles("u-1", vec![Role::new("r-1")]);
    let backend = Arc::new(FakeBackend::returning(user.clone()));
    backend.set_config(ConfigReply::Status(500)).await;
    let session = session_with(backend, Arc::new(MemoryTokenStore::new()));

    session.login(user, "tok").await;

    let state = session.snapshot();
    assert!(state.is_authenticated);
    assert!(!state.is_ambassador);
}

#[tokio::test]
async fn test_lookup_skipped_without_stored_token() {
    // An empty login token is not persisted, so the authenticated
    // config lookup has nothing to run with and is skipped.
    let user = user_with_roles("u-1", vec![Role::new("r-1")]);
    let backend = Arc::new(FakeBackend::returning(user.clone()));
    backend
        .set_config(ConfigReply::Entries(vec![ambassador_config_entry("r-1")]))
        .await;
    let session = session_with(backend.clone(), Arc::new(MemoryTokenStore::new()));

    session.login(user, "").await;

    let state = session.snapshot();
    assert!(state.is_authenticated);
    assert!(!state.is_ambassador);
    assert_eq!(backend.config_fetches(), 0);
}

#[tokio::test]
async fn test_validation_also_derives_ambassador() {
    let user = user_with_roles("u-1", vec![Role::new("r-cfg")]);
    let backend = Arc::new(FakeBackend::returning(user));
    backend
        .set_config(ConfigReply::Entries(vec![ambassador_config_entry("r-cfg")]))
        .await;
    let store = Arc::new(MemoryTokenStore::with_token("tok-stored"));
    let session = session_with(backend.clone(), store);

    session.validate_token().await;

    let state = session.snapshot();
    assert!(state.is_authenticated);
    assert!(state.is_ambassador);
    assert_eq!(backend.user_fetches(), 1);
    assert_eq!(backend.config_fetches(), 1);
}
