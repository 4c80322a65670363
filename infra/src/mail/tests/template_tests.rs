use uuid::Uuid;

use pa_core::domain::entities::PreAuthClaim;

use crate::mail::templates::{escape_html, otp_body, receipt_body};

#[test]
fn test_otp_body_contains_code_and_ttl() {
    let body = otp_body("Asha Rao", "482913", 10);
    assert!(body.contains("Dear Asha Rao,"));
    assert!(body.contains("482913"));
    assert!(body.contains("Valid for 10 minutes"));
}

#[test]
fn test_interpolated_values_are_escaped() {
    assert_eq!(escape_html("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");

    let body = otp_body("<script>alert(1)</script>", "123456", 10);
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[test]
fn test_receipt_body_lists_claim_details() {
    let claim = PreAuthClaim {
        patient_name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone_number: "9876543210".to_string(),
        hospital_name: "City Care Hospital".to_string(),
        policy_prefix: "HLT".to_string(),
        policy_number: "00123".to_string(),
        treatment_type: "Surgery".to_string(),
        estimated_amount: "150000".to_string(),
        doctor_notes: None,
    };
    let reference = Uuid::new_v4();

    let body = receipt_body(&claim, reference);
    assert!(body.contains(&reference.to_string()));
    assert!(body.contains("HLT00123"));
    assert!(body.contains("City Care Hospital"));
    assert!(body.contains("&#8377;150000"));
}
