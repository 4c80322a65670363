//! Pre-authorization claim submitted through the web form.

use pa_shared::utils::validation::{validators, Validate, ValidationErrors};
use serde::{Deserialize, Deserializer, Serialize};

/// Claim form payload, camelCase on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PreAuthClaim {
    pub patient_name: String,
    pub email: String,
    pub phone_number: String,
    pub hospital_name: String,
    pub policy_prefix: String,
    pub policy_number: String,
    pub treatment_type: String,
    /// Whole amount in rupees; the form may send it as a string or a number
    #[serde(deserialize_with = "string_or_number")]
    pub estimated_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_notes: Option<String>,
}

impl PreAuthClaim {
    /// Email as used for OTP lookups
    pub fn identity(&self) -> &str {
        self.email.trim()
    }

    /// Full policy reference, prefix followed by number
    pub fn policy_reference(&self) -> String {
        format!("{}{}", self.policy_prefix.trim(), self.policy_number.trim())
    }
}

impl Validate for PreAuthClaim {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !validators::not_empty(&self.patient_name) {
            errors.add_error("patientName", "Patient name is required", "required");
        } else if !validators::is_valid_person_name(&self.patient_name) {
            errors.add_error(
                "patientName",
                "Name must be 2-100 characters, letters and spaces only",
                "format",
            );
        }

        if !validators::not_empty(&self.email) {
            errors.add_error("email", "Email is required", "required");
        } else if !validators::is_valid_email(self.email.trim()) {
            errors.add_error("email", "Please enter a valid email address", "format");
        }

        if !validators::is_valid_phone_number(&self.phone_number) {
            errors.add_error("phoneNumber", "Phone number must be 10 digits", "format");
        }

        for (field, value, label) in [
            ("hospitalName", &self.hospital_name, "Hospital name"),
            ("policyPrefix", &self.policy_prefix, "Policy prefix"),
            ("policyNumber", &self.policy_number, "Policy number"),
            ("treatmentType", &self.treatment_type, "Treatment type"),
        ] {
            if !validators::not_empty(value) {
                errors.add_error(field, format!("{} is required", label), "required");
            }
        }

        if !validators::is_valid_amount(&self.estimated_amount) {
            errors.add_error(
                "estimatedAmount",
                "Amount must be a whole number between 1 and 100000000",
                "format",
            );
        }

        errors.into_result()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Text(text) => text,
        Amount::Number(number) => number.to_string(),
    })
}
