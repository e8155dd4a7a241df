//! Identity verification: document uploads, selfie, bank details, status.
//!
//! The verification wizard submits three steps independently; the backend
//! reviews them together and exposes a single
//! [`VerificationStatus`](drwise_core::VerificationStatus) for the
//! account.

use drwise_core::{IfscCode, VerificationStatus};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// Kind of government ID submitted in the document step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdDocumentKind {
    Aadhaar,
    Pan,
    Passport,
}

impl IdDocumentKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar",
            Self::Pan => "pan",
            Self::Passport => "passport",
        }
    }
}

/// A photo or scan uploaded as multipart form data.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    fn into_part(self) -> Result<Part, ApiError> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        Ok(part)
    }
}

/// Bank account details submitted in the final wizard step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_holder: String,
    pub account_number: String,
    pub ifsc: IfscCode,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: VerificationStatus,
}

impl ApiClient {
    /// Upload a government ID document.
    ///
    /// # Errors
    ///
    /// Returns error if the upload fails or the file is rejected.
    pub async fn submit_id_document(
        &self,
        kind: IdDocumentKind,
        upload: DocumentUpload,
    ) -> Result<(), ApiError> {
        let form = Form::new()
            .text("kind", kind.as_str())
            .part("file", upload.into_part()?);
        self.post_multipart_unit("verification/id-document", form)
            .await
    }

    /// Upload the selfie for the liveness step.
    ///
    /// # Errors
    ///
    /// Returns error if the upload fails or the file is rejected.
    pub async fn submit_selfie(&self, upload: DocumentUpload) -> Result<(), ApiError> {
        let form = Form::new().part("file", upload.into_part()?);
        self.post_multipart_unit("verification/selfie", form).await
    }

    /// Submit bank account details.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the details are rejected.
    pub async fn submit_bank_details(&self, details: &BankDetails) -> Result<(), ApiError> {
        self.post_unit("verification/bank-details", details).await
    }

    /// Fetch the account's current verification status.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn verification_status(&self) -> Result<VerificationStatus, ApiError> {
        let envelope: Envelope<StatusResponse> = self.get("verification/status").await?;
        Ok(envelope.into_inner().status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_as_str() {
        assert_eq!(IdDocumentKind::Aadhaar.as_str(), "aadhaar");
        assert_eq!(IdDocumentKind::Pan.as_str(), "pan");
    }

    #[test]
    fn test_bank_details_serialize() {
        let details = BankDetails {
            account_holder: "Asha Verma".to_string(),
            account_number: "004501563211".to_string(),
            ifsc: IfscCode::parse("HDFC0001234").unwrap(),
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["accountHolder"], "Asha Verma");
        assert_eq!(json["accountNumber"], "004501563211");
        assert_eq!(json["ifsc"], "HDFC0001234");
    }

    #[test]
    fn test_status_response_decodes() {
        let wrapped: Envelope<StatusResponse> =
            serde_json::from_str(r#"{"data": {"status": "approved"}}"#).unwrap();
        assert_eq!(wrapped.into_inner().status, VerificationStatus::Approved);

        let bare: Envelope<StatusResponse> =
            serde_json::from_str(r#"{"status": "pending"}"#).unwrap();
        assert_eq!(bare.into_inner().status, VerificationStatus::Pending);
    }

    #[test]
    fn test_upload_into_part_rejects_bad_mime() {
        let upload = DocumentUpload {
            file_name: "id.jpg".to_string(),
            content_type: "not a mime".to_string(),
            bytes: vec![0xFF, 0xD8],
        };
        assert!(upload.into_part().is_err());
    }
}
