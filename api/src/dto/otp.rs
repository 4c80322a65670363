//! Request and response bodies for the OTP endpoints

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use pa_core::domain::value_objects::OtpStatus;
use pa_shared::utils::validation::validators;

/// Same address rule the claim form applies
fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if validators::is_valid_email(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message(Cow::Borrowed("Please enter a valid email address")))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct SendOtpRequest {
    #[validate(
        custom(function = "validate_email_format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    /// Name used to greet the patient in the OTP mail
    pub patient_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyOtpRequest {
    pub email: String,

    #[validate(length(min = 1, max = 16, message = "OTP must be a short numeric code"))]
    pub otp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckOtpStatusRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    /// The generated code, only when development echo is enabled
    #[serde(rename = "devOTP", skip_serializing_if = "Option::is_none")]
    pub dev_otp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub otp_verified: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpStatusResponse {
    pub success: bool,
    pub otp_verified: bool,
    pub exists: bool,
    pub expired: bool,
    pub message: String,
}

impl From<OtpStatus> for OtpStatusResponse {
    fn from(status: OtpStatus) -> Self {
        let message = if status.expired {
            "OTP has expired. Please request a new one."
        } else if !status.exists {
            "No OTP found for this email."
        } else if status.verified {
            "Email is verified."
        } else {
            "OTP sent but not verified yet."
        };

        Self {
            success: true,
            otp_verified: status.verified,
            exists: status.exists,
            expired: status.expired,
            message: message.to_string(),
        }
    }
}
