//! Ambassador role derivation.
//!
//! A user is an ambassador when any of their roles matches, checked in
//! order, first match wins:
//!
//! 1. a role named `ambassador` (case-insensitive), no network needed
//! 2. a role whose id equals the configured fallback id
//! 3. a role whose id equals the `AMBASSADOR_ROLE_ID` remote-config
//!    entry, fetched after a short settle delay
//!
//! Every failure along the way (store read, fetch, missing key) collapses
//! to "not an ambassador"; sign-in itself is never blocked on this.

use std::time::Duration;

use drwise_core::{Role, RoleId};
use tracing::{debug, warn};

use crate::api::remote_config::find_value;
use crate::models::User;
use crate::session::SessionBackend;
use crate::storage::TokenStore;

/// Role name that marks an ambassador account.
const AMBASSADOR_ROLE_NAME: &str = "ambassador";

/// Remote-config key holding the ambassador role id.
pub const AMBASSADOR_ROLE_ID_KEY: &str = "AMBASSADOR_ROLE_ID";

/// Ambassador role id in production deployments.
///
/// Used as the fallback when the role name check does not match and
/// before the remote-config lookup runs. Override per environment with
/// `DRWISE_AMBASSADOR_ROLE_ID` or
/// [`SessionOptions`](crate::session::SessionOptions).
pub const DEFAULT_AMBASSADOR_ROLE_ID: &str = "665f1e9a2b3c4d5e6f708192";

/// Whether any role carries the ambassador name.
fn has_ambassador_name(roles: &[Role]) -> bool {
    roles.iter().any(|role| role.is_named(AMBASSADOR_ROLE_NAME))
}

/// Whether any role id matches the given id string.
fn has_role_id(roles: &[Role], id: &str) -> bool {
    roles.iter().any(|role| role.id.as_str() == id)
}

/// Run the full derivation for a user.
pub(crate) async fn derive_is_ambassador(
    user: &User,
    fallback: &RoleId,
    settle: Duration,
    tokens: &dyn TokenStore,
    backend: &dyn SessionBackend,
) -> bool {
    if has_ambassador_name(&user.roles) {
        debug!("ambassador by role name");
        return true;
    }

    if has_role_id(&user.roles, fallback.as_str()) {
        debug!("ambassador by fallback role id");
        return true;
    }

    // Let the just-persisted token land before an authenticated fetch.
    tokio::time::sleep(settle).await;

    match tokens.get().await {
        Ok(Some(_)) => {}
        Ok(None) => {
            debug!("no stored token; skipping remote-config role lookup");
            return false;
        }
        Err(e) => {
            warn!(error = %e, "token store read failed; skipping remote-config role lookup");
            return false;
        }
    }

    match backend.remote_config().await {
        Ok(entries) => match find_value(&entries, AMBASSADOR_ROLE_ID_KEY) {
            Some(role_id) => has_role_id(&user.roles, role_id),
            None => {
                debug!(key = AMBASSADOR_ROLE_ID_KEY, "remote config entry missing");
                false
            }
        },
        Err(e) => {
            warn!(error = %e, "remote config fetch failed; treating user as non-ambassador");
            false
        }
    }
}
