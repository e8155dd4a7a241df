//! Session and auth state container.
//!
//! One [`Session`] per app. It owns the answer to "who is signed in":
//! the embedding shell calls [`Session::validate_token`] once at startup,
//! [`Session::login`] after OTP verification or registration, and
//! [`Session::logout`] from the profile screen. Everyone else watches the
//! published [`SessionState`] via [`Session::subscribe`].
//!
//! The three operations never return errors. Transport failures, rejected
//! tokens, and role-lookup problems are logged and collapse to signed-out
//! or non-ambassador state; callers react to the snapshot, not to error
//! values.

mod role;

pub use role::{AMBASSADOR_ROLE_ID_KEY, DEFAULT_AMBASSADOR_ROLE_ID};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use drwise_core::{RoleId, VerificationStatus};
use secrecy::SecretString;
use tokio::sync::{Mutex, watch};
use tracing::{debug, instrument, warn};

use crate::api::remote_config::ConfigEntry;
use crate::config::{ClientConfig, DEFAULT_ROLE_LOOKUP_SETTLE_MS};
use crate::http::{ApiClient, ApiError};
use crate::models::User;
use crate::storage::TokenStore;

/// Remote calls the session container makes.
///
/// [`ApiClient`] implements this; tests substitute an in-memory fake.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Fetch the user the stored token belongs to.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// Fetch the remote configuration entries.
    async fn remote_config(&self) -> Result<Vec<ConfigEntry>, ApiError>;
}

#[async_trait]
impl SessionBackend for ApiClient {
    async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch_current_user().await
    }

    async fn remote_config(&self) -> Result<Vec<ConfigEntry>, ApiError> {
        self.fetch_remote_config().await
    }
}

/// Point-in-time snapshot of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Whether a user is signed in.
    pub is_authenticated: bool,
    /// The signed-in user, when authenticated.
    pub user: Option<User>,
    /// Whether the signed-in user holds the ambassador role.
    pub is_ambassador: bool,
    /// Verification status of the signed-in user.
    pub verification_status: VerificationStatus,
    /// True until startup token validation finishes.
    pub is_loading: bool,
}

impl SessionState {
    fn initial() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            is_ambassador: false,
            verification_status: VerificationStatus::Pending,
            is_loading: true,
        }
    }

    fn reset_signed_out(&mut self) {
        self.is_authenticated = false;
        self.user = None;
        self.is_ambassador = false;
        self.verification_status = VerificationStatus::Pending;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Tunables for the session container.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Role id treated as ambassador when the name check does not match.
    pub ambassador_fallback: RoleId,
    /// Delay before the remote-config role lookup. Tests pass
    /// `Duration::ZERO`.
    pub role_lookup_settle: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            ambassador_fallback: RoleId::new(DEFAULT_AMBASSADOR_ROLE_ID),
            role_lookup_settle: Duration::from_millis(DEFAULT_ROLE_LOOKUP_SETTLE_MS),
        }
    }
}

impl SessionOptions {
    /// Derive options from client configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            ambassador_fallback: config
                .ambassador_role_id
                .clone()
                .unwrap_or_else(|| RoleId::new(DEFAULT_AMBASSADOR_ROLE_ID)),
            role_lookup_settle: config.role_lookup_settle,
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// The session container.
///
/// Cheap to clone; all clones share one state channel, one token store,
/// and one operation lock. The lock serializes `validate_token`, `login`,
/// and `logout` so concurrent calls cannot interleave their token writes
/// and state updates; snapshot reads never wait on it.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    backend: Arc<dyn SessionBackend>,
    tokens: Arc<dyn TokenStore>,
    options: SessionOptions,
    op_lock: Mutex<()>,
    state: watch::Sender<SessionState>,
}

impl Session {
    /// Create a session container from its collaborators.
    #[must_use]
    pub fn new(
        backend: Arc<dyn SessionBackend>,
        tokens: Arc<dyn TokenStore>,
        options: SessionOptions,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            inner: Arc::new(SessionInner {
                backend,
                tokens,
                options,
                op_lock: Mutex::new(()),
                state,
            }),
        }
    }

    /// Create a session container backed by an [`ApiClient`], sharing its
    /// token store.
    #[must_use]
    pub fn with_client(client: &ApiClient, options: SessionOptions) -> Self {
        let tokens = client.token_store();
        Self::new(Arc::new(client.clone()), tokens, options)
    }

    /// Current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to session state changes.
    ///
    /// The receiver immediately holds the current state; every state
    /// transition marks it changed.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    fn publish(&self, update: impl FnOnce(&mut SessionState)) {
        self.inner.state.send_modify(update);
    }

    async fn derive_ambassador(&self, user: &User) -> bool {
        role::derive_is_ambassador(
            user,
            &self.inner.options.ambassador_fallback,
            self.inner.options.role_lookup_settle,
            self.inner.tokens.as_ref(),
            self.inner.backend.as_ref(),
        )
        .await
    }

    /// Validate the persisted token against the backend.
    ///
    /// Called once at startup. Ends the loading state on every path:
    /// no stored token and any validation failure leave the session
    /// signed out (a rejected token is deleted first), a valid token
    /// restores the signed-in user.
    #[instrument(skip_all)]
    pub async fn validate_token(&self) {
        let _guard = self.inner.op_lock.lock().await;

        let token = match self.inner.tokens.get().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "token store read failed during validation");
                None
            }
        };

        if token.is_none() {
            debug!("no stored token; starting signed out");
            self.publish(|state| {
                state.reset_signed_out();
                state.is_loading = false;
            });
            return;
        }

        match self.inner.backend.current_user().await {
            Ok(user) => {
                let verification_status = user.verification_status.unwrap_or_default();
                let is_ambassador = self.derive_ambassador(&user).await;
                debug!(user = %user.id, is_ambassador, "stored token validated");
                self.publish(move |state| {
                    state.is_authenticated = true;
                    state.user = Some(user);
                    state.is_ambassador = is_ambassador;
                    state.verification_status = verification_status;
                    state.is_loading = false;
                });
            }
            Err(e) => {
                warn!(error = %e, "stored token rejected; signing out");
                // Token goes away before any flag flips; a crash in
                // between cannot leave a dead token behind a signed-in
                // snapshot.
                if let Err(delete_err) = self.inner.tokens.delete().await {
                    warn!(error = %delete_err, "failed to delete rejected token");
                }
                self.publish(|state| {
                    state.reset_signed_out();
                    state.is_loading = false;
                });
            }
        }
    }

    /// Sign in with a user and token returned by OTP verification or
    /// registration.
    ///
    /// The token is persisted before any state changes; if persisting
    /// fails the session is left untouched. An empty token is not
    /// persisted (the state still updates, matching a backend that has
    /// already established the session elsewhere). Does not touch the
    /// loading flag.
    #[instrument(skip_all, fields(user = %user.id))]
    pub async fn login(&self, user: User, token: &str) {
        let _guard = self.inner.op_lock.lock().await;

        if token.is_empty() {
            debug!("login without a token; stored token left untouched");
        } else if let Err(e) = self.inner.tokens.set(&SecretString::from(token)).await {
            warn!(error = %e, "failed to persist auth token; login aborted");
            return;
        }

        let verification_status = user.verification_status.unwrap_or_default();
        let is_ambassador = self.derive_ambassador(&user).await;
        debug!(is_ambassador, "signed in");
        self.publish(move |state| {
            state.is_authenticated = true;
            state.user = Some(user);
            state.is_ambassador = is_ambassador;
            state.verification_status = verification_status;
        });
    }

    /// Sign out.
    ///
    /// Resets the in-memory state, then deletes the persisted token.
    /// Idempotent; a failed delete is logged and the session stays
    /// signed out.
    #[instrument(skip_all)]
    pub async fn logout(&self) {
        let _guard = self.inner.op_lock.lock().await;

        self.publish(SessionState::reset_signed_out);

        if let Err(e) = self.inner.tokens.delete().await {
            warn!(error = %e, "failed to delete auth token during logout");
        }
        debug!("signed out");
    }
}
