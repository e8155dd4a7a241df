//! Test doubles and builders for session lifecycle tests.
//!
//! The session container talks to two collaborators: a
//! [`SessionBackend`](drwise_client::session::SessionBackend) for the two
//! remote calls it makes, and a
//! [`TokenStore`](drwise_client::storage::TokenStore) for the persisted
//! token. [`FakeBackend`] scripts the former and counts calls;
//! `MemoryTokenStore` from the client crate usually covers the latter,
//! with [`ReadOnlyTokenStore`] and [`UnreadableTokenStore`] for the
//! store failure paths.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p drwise-integration-tests
//! ```
//!
//! No live backend is required; everything runs against in-memory fakes.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use drwise_core::Role;
use drwise_client::api::remote_config::ConfigEntry;
use drwise_client::http::ApiError;
use drwise_client::models::User;
use drwise_client::session::{Session, SessionBackend, SessionOptions};
use drwise_client::storage::{StorageError, TokenStore};
use secrecy::SecretString;
use tokio::sync::Mutex;

/// Scripted reply for the current-user call.
#[derive(Debug, Clone)]
pub enum UserReply {
    /// Return this user.
    Ok(User),
    /// Fail with this HTTP status.
    Status(u16),
}

/// Scripted reply for the remote-config call.
#[derive(Debug, Clone)]
pub enum ConfigReply {
    /// Return these entries.
    Entries(Vec<ConfigEntry>),
    /// Fail with this HTTP status.
    Status(u16),
}

/// In-memory [`SessionBackend`] with scripted replies and call counters.
pub struct FakeBackend {
    user_reply: Mutex<UserReply>,
    config_reply: Mutex<ConfigReply>,
    user_calls: AtomicUsize,
    config_calls: AtomicUsize,
}

impl FakeBackend {
    /// Backend that returns the given user and an empty config list.
    #[must_use]
    pub fn returning(user: User) -> Self {
        Self {
            user_reply: Mutex::new(UserReply::Ok(user)),
            config_reply: Mutex::new(ConfigReply::Entries(Vec::new())),
            user_calls: AtomicUsize::new(0),
            config_calls: AtomicUsize::new(0),
        }
    }

    /// Backend that rejects the current-user call with a status.
    #[must_use]
    pub fn rejecting(status: u16) -> Self {
        Self {
            user_reply: Mutex::new(UserReply::Status(status)),
            config_reply: Mutex::new(ConfigReply::Entries(Vec::new())),
            user_calls: AtomicUsize::new(0),
            config_calls: AtomicUsize::new(0),
        }
    }

    /// Script the remote-config reply.
    pub async fn set_config(&self, reply: ConfigReply) {
        *self.config_reply.lock().await = reply;
    }

    /// Number of current-user calls made so far.
    #[must_use]
    pub fn user_fetches(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    /// Number of remote-config calls made so far.
    #[must_use]
    pub fn config_fetches(&self) -> usize {
        self.config_calls.load(Ordering::SeqCst)
    }
}

fn status_error(status: u16) -> ApiError {
    ApiError::Status {
        status,
        message: format!("scripted {status} response"),
    }
}

#[async_trait]
impl SessionBackend for FakeBackend {
    async fn current_user(&self) -> Result<User, ApiError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        match self.user_reply.lock().await.clone() {
            UserReply::Ok(user) => Ok(user),
            UserReply::Status(status) => Err(status_error(status)),
        }
    }

    async fn remote_config(&self) -> Result<Vec<ConfigEntry>, ApiError> {
        self.config_calls.fetch_add(1, Ordering::SeqCst);
        match self.config_reply.lock().await.clone() {
            ConfigReply::Entries(entries) => Ok(entries),
            ConfigReply::Status(status) => Err(status_error(status)),
        }
    }
}

/// Token store whose writes always fail.
///
/// Reads behave like an empty store, deletes succeed, so only the
/// persist path is affected.
#[derive(Debug, Default)]
pub struct ReadOnlyTokenStore;

fn write_denied() -> StorageError {
    StorageError::Io {
        path: "/read-only/token".into(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "store is read-only"),
    }
}

#[async_trait]
impl TokenStore for ReadOnlyTokenStore {
    async fn get(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(None)
    }

    async fn set(&self, _token: &SecretString) -> Result<(), StorageError> {
        Err(write_denied())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Token store whose reads always fail.
///
/// Writes and deletes succeed, so only the lookup path is affected.
#[derive(Debug, Default)]
pub struct UnreadableTokenStore;

fn read_denied() -> StorageError {
    StorageError::Io {
        path: "/unreadable/token".into(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "store is unreadable"),
    }
}

#[async_trait]
impl TokenStore for UnreadableTokenStore {
    async fn get(&self) -> Result<Option<SecretString>, StorageError> {
        Err(read_denied())
    }

    async fn set(&self, _token: &SecretString) -> Result<(), StorageError> {
        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Config entry for the ambassador role id key.
#[must_use]
pub fn ambassador_config_entry(role_id: &str) -> ConfigEntry {
    ConfigEntry {
        key: drwise_client::session::AMBASSADOR_ROLE_ID_KEY.to_string(),
        value: role_id.to_string(),
    }
}

/// User with the given id and roles.
#[must_use]
pub fn user_with_roles(id: &str, roles: Vec<Role>) -> User {
    let mut user = User::with_id(id);
    user.roles = roles;
    user
}

/// Session options with the settle delay removed so tests do not sleep.
#[must_use]
pub fn test_options() -> SessionOptions {
    SessionOptions {
        role_lookup_settle: Duration::ZERO,
        ..SessionOptions::default()
    }
}

/// Session wired to the given doubles with test options.
#[must_use]
pub fn session_with(backend: Arc<FakeBackend>, tokens: Arc<dyn TokenStore>) -> Session {
    Session::new(backend, tokens, test_options())
}

/// Install a fmt subscriber for debugging a failing test.
///
/// Safe to call from several tests; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
