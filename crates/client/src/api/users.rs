//! The signed-in user's profile.

use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::User;

/// Response shapes the current-user endpoint is known to produce.
///
/// Deployed backend builds have returned `{ "user": ... }`,
/// `{ "data": ... }`, and the bare user object; all three decode.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserPayload {
    Keyed { user: User },
    Wrapped { data: User },
    Bare(User),
}

impl UserPayload {
    fn into_user(self) -> User {
        match self {
            Self::Keyed { user } => user,
            Self::Wrapped { data } => data,
            Self::Bare(user) => user,
        }
    }
}

/// Profile fields the user can edit.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ApiClient {
    /// Fetch the user the stored token belongs to.
    ///
    /// This is the startup token-validation call: a 401 means the token
    /// is invalid or expired, a decode failure means the payload carried
    /// no user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the token is rejected, or the
    /// response carries no user.
    pub async fn fetch_current_user(&self) -> Result<User, ApiError> {
        let payload: UserPayload = self.get("users/me").await?;
        Ok(payload.into_user())
    }

    /// Update the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the update is rejected.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let payload: UserPayload = self.put("users/me", update).await?;
        Ok(payload.into_user())
    }
}
