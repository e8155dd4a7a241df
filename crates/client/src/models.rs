//! Wire models shared across resource wrappers.
//!
//! Resource-specific request/response types live next to their wrapper in
//! [`crate::api`]; only [`User`] sits here because the session container
//! inspects it (roles drive the ambassador flag, `verification_status`
//! seeds the session snapshot).

use chrono::{DateTime, Utc};
use drwise_core::{Role, UserId, VerificationStatus};
use serde::{Deserialize, Deserializer, Serialize};

/// Off-enum statuses read as absent, so one unrecognized value cannot
/// invalidate the whole user payload.
fn unknown_status_as_none<'de, D>(deserializer: D) -> Result<Option<VerificationStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// The signed-in user as the backend returns it.
///
/// `_id` is the only required field; everything else is optional so older
/// backend builds and partial profiles still decode. A payload without an
/// `_id` is not a user and fails decoding, which is what startup token
/// validation relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default, deserialize_with = "unknown_status_as_none")]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a minimal user with just an id, for embedders constructing
    /// one from a login response they assembled themselves.
    #[must_use]
    pub fn with_id(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            phone: None,
            roles: Vec::new(),
            verification_status: None,
            referral_code: None,
            created_at: None,
        }
    }
}

/// Backend response envelope.
///
/// Some endpoints wrap the payload as `{ "data": ... }`, some return it
/// bare. Wrappers decode through this and never care which shape the
/// deployed backend speaks.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(inner) => inner,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use drwise_core::RoleId;

    #[test]
    fn test_user_decodes_full_payload() {
        let json = r#"{
            "_id": "u-1",
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "9876543210",
            "roles": [{"_id": "r-1", "name": "User"}],
            "verificationStatus": "approved",
            "referralCode": "ASHA10",
            "createdAt": "2025-11-02T08:30:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId::new("u-1"));
        assert_eq!(user.name.as_deref(), Some("Asha"));
        assert_eq!(user.roles.first().unwrap().id, RoleId::new("r-1"));
        assert_eq!(user.verification_status, Some(VerificationStatus::Approved));
        assert_eq!(user.referral_code.as_deref(), Some("ASHA10"));
    }

    #[test]
    fn test_user_decodes_minimal_payload() {
        let user: User = serde_json::from_str(r#"{"_id": "u-2"}"#).unwrap();
        assert_eq!(user.id, UserId::new("u-2"));
        assert!(user.roles.is_empty());
        assert!(user.verification_status.is_none());
    }

    #[test]
    fn test_user_tolerates_unknown_verification_status() {
        let json = r#"{"_id": "u-3", "name": "Ravi", "verificationStatus": "resubmit"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId::new("u-3"));
        assert!(user.verification_status.is_none());

        let json = r#"{"_id": "u-4", "verificationStatus": null}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.verification_status.is_none());
    }

    #[test]
    fn test_user_rejects_missing_id() {
        let result: Result<User, _> = serde_json::from_str(r#"{"name": "ghost"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_wrapped_and_bare() {
        let wrapped: Envelope<Vec<i32>> = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();
        assert_eq!(wrapped.into_inner(), vec![1, 2]);

        let bare: Envelope<Vec<i32>> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(bare.into_inner(), vec![1, 2]);
    }
}
