//! Remote configuration key/value entries.
//!
//! The backend exposes operational settings as a flat list of string
//! entries. Role derivation reads `AMBASSADOR_ROLE_ID` from here; the
//! list is fetched fresh on every call, never cached.

use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// A single remote configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

/// Look up an entry by key.
#[must_use]
pub fn find_value<'a>(entries: &'a [ConfigEntry], key: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.value.as_str())
}

impl ApiClient {
    /// Fetch all remote configuration entries.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_remote_config(&self) -> Result<Vec<ConfigEntry>, ApiError> {
        let envelope: Envelope<Vec<ConfigEntry>> = self.get("config").await?;
        Ok(envelope.into_inner())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_decode() {
        let json = r#"{"data": [
            {"key": "AMBASSADOR_ROLE_ID", "value": "64b9aa01ff00aa01bb02cc03"},
            {"key": "SUPPORT_PHONE", "value": "+911244567890"}
        ]}"#;

        let envelope: Envelope<Vec<ConfigEntry>> = serde_json::from_str(json).unwrap();
        let entries = envelope.into_inner();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            find_value(&entries, "AMBASSADOR_ROLE_ID"),
            Some("64b9aa01ff00aa01bb02cc03")
        );
    }

    #[test]
    fn test_find_value_missing_key() {
        let entries = vec![ConfigEntry {
            key: "SUPPORT_PHONE".to_string(),
            value: "+911244567890".to_string(),
        }];
        assert!(find_value(&entries, "AMBASSADOR_ROLE_ID").is_none());
    }
}
