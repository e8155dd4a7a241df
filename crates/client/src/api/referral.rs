//! The user's own referral code and applying someone else's.

use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// The signed-in user's shareable referral code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralCode {
    pub code: String,
    /// Pre-built share link, when the backend provides one.
    #[serde(default)]
    pub share_url: Option<String>,
}

#[derive(Serialize)]
struct ApplyCodeRequest<'a> {
    code: &'a str,
}

impl ApiClient {
    /// Fetch the signed-in user's referral code.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn my_referral_code(&self) -> Result<ReferralCode, ApiError> {
        let envelope: Envelope<ReferralCode> = self.get("referral/code").await?;
        Ok(envelope.into_inner())
    }

    /// Apply another user's referral code to this account.
    ///
    /// The backend accepts a code once per account; a second apply fails
    /// with a 4xx status.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the code is invalid or
    /// already applied.
    pub async fn apply_referral_code(&self, code: &str) -> Result<(), ApiError> {
        self.post_unit("referral/apply", &ApplyCodeRequest { code })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_referral_code_decodes() {
        let code: ReferralCode = serde_json::from_str(
            r#"{"code": "ASHA10", "shareUrl": "https://drwise.app/r/ASHA10"}"#,
        )
        .unwrap();
        assert_eq!(code.code, "ASHA10");
        assert!(code.share_url.is_some());
    }

    #[test]
    fn test_apply_request_serializes() {
        let json = serde_json::to_value(ApplyCodeRequest { code: "RAVI7" }).unwrap();
        assert_eq!(json["code"], "RAVI7");
    }
}
