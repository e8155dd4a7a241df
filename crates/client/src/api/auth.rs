//! Authentication: OTP request and verification, registration.
//!
//! The backend signs users in with a phone-number OTP flow. A successful
//! verification or registration returns an [`AuthSession`] which the
//! embedder hands to [`crate::session::Session::login`].

use drwise_core::{Email, PhoneNumber};
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::User;

/// Token plus user returned by a successful sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Payload for registering a new account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub name: String,
    pub phone: PhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    /// Referral code of the user who invited this one, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

#[derive(Serialize)]
struct OtpRequest<'a> {
    phone: &'a PhoneNumber,
}

#[derive(Serialize)]
struct OtpVerification<'a> {
    phone: &'a PhoneNumber,
    code: &'a str,
}

impl ApiClient {
    /// Request an OTP to be sent to the given phone number.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the
    /// number.
    pub async fn request_otp(&self, phone: &PhoneNumber) -> Result<(), ApiError> {
        self.post_unit("auth/request-otp", &OtpRequest { phone })
            .await
    }

    /// Exchange a received OTP for a signed-in session.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the code is wrong.
    pub async fn verify_otp(
        &self,
        phone: &PhoneNumber,
        code: &str,
    ) -> Result<AuthSession, ApiError> {
        self.post("auth/verify-otp", &OtpVerification { phone, code })
            .await
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the registration is
    /// rejected (duplicate phone, invalid referral code).
    pub async fn register(&self, registration: &NewRegistration) -> Result<AuthSession, ApiError> {
        self.post("auth/register", registration).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_session_decodes() {
        let json = r#"{
            "token": "tok-123",
            "user": {"_id": "u-1", "name": "Asha"}
        }"#;

        let session: AuthSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.user.name.as_deref(), Some("Asha"));
    }

    #[test]
    fn test_registration_skips_absent_fields() {
        let registration = NewRegistration {
            name: "Asha".to_string(),
            phone: PhoneNumber::parse("9876543210").unwrap(),
            email: None,
            referral_code: None,
        };

        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["name"], "Asha");
        assert_eq!(json["phone"], "9876543210");
        assert!(json.get("email").is_none());
        assert!(json.get("referralCode").is_none());
    }

    #[test]
    fn test_registration_serializes_referral_code() {
        let registration = NewRegistration {
            name: "Ravi".to_string(),
            phone: PhoneNumber::parse("9876543210").unwrap(),
            email: Some(Email::parse("ravi@example.com").unwrap()),
            referral_code: Some("ASHA10".to_string()),
        };

        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["email"], "ravi@example.com");
        assert_eq!(json["referralCode"], "ASHA10");
    }
}
