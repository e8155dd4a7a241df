//! User role as returned by the backend.

use crate::types::id::RoleId;
use serde::{Deserialize, Serialize};

/// A role attached to a user account.
///
/// The backend stores roles as documents with an `_id` and an optional
/// display name. Role semantics (ambassador checks in particular) key off
/// either field, so both are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: RoleId,
    #[serde(default)]
    pub name: Option<String>,
}

impl Role {
    /// Create a role with an ID and no name.
    #[must_use]
    pub fn new(id: impl Into<RoleId>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Create a role with an ID and a display name.
    #[must_use]
    pub fn named(id: impl Into<RoleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// Check whether the role's display name matches, ignoring case.
    ///
    /// Returns `false` when the role has no name.
    #[must_use]
    pub fn is_named(&self, expected: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(expected))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_named_ignores_case() {
        let role = Role::named("r1", "Ambassador");
        assert!(role.is_named("ambassador"));
        assert!(role.is_named("AMBASSADOR"));
        assert!(!role.is_named("admin"));
    }

    #[test]
    fn test_is_named_without_name() {
        let role = Role::new("r1");
        assert!(!role.is_named("ambassador"));
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let role: Role =
            serde_json::from_str(r#"{"_id": "64acb9", "name": "ambassador"}"#).unwrap();
        assert_eq!(role.id, RoleId::new("64acb9"));
        assert_eq!(role.name.as_deref(), Some("ambassador"));
    }

    #[test]
    fn test_deserialize_missing_name() {
        let role: Role = serde_json::from_str(r#"{"_id": "64acb9"}"#).unwrap();
        assert_eq!(role.name, None);
    }
}
