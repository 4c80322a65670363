//! HTML bodies for outbound mail

use uuid::Uuid;

use pa_core::domain::entities::PreAuthClaim;

pub const OTP_SUBJECT: &str = "Pre-Authorization OTP Verification";
pub const RECEIPT_SUBJECT: &str = "Pre-Authorization Request Received";

/// Escape text interpolated into HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// OTP mail body
pub fn otp_body(display_name: &str, code: &str, ttl_minutes: i64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background: #2563eb; color: white; padding: 20px; text-align: center; border-radius: 8px 8px 0 0; }}
    .content {{ background: #f9fafb; padding: 30px; border-radius: 0 0 8px 8px; }}
    .otp-box {{ background: white; border: 2px dashed #2563eb; padding: 20px; text-align: center; margin: 20px 0; border-radius: 8px; }}
    .otp-code {{ font-size: 32px; font-weight: bold; color: #2563eb; letter-spacing: 8px; }}
    .footer {{ text-align: center; margin-top: 20px; color: #6b7280; font-size: 12px; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header"><h1>Email Verification</h1></div>
    <div class="content">
      <p>Dear {name},</p>
      <p>Thank you for submitting your Pre-Authorization Request. Please use the OTP below to verify your email address and complete your submission.</p>
      <div class="otp-box">
        <p style="margin: 0; font-size: 14px; color: #6b7280;">Your OTP Code</p>
        <div class="otp-code">{code}</div>
        <p style="margin: 10px 0 0 0; font-size: 12px; color: #6b7280;">Valid for {ttl} minutes</p>
      </div>
      <p><strong>Important:</strong> Do not share this OTP with anyone. Our staff will never ask for your OTP.</p>
      <p>If you didn't request this verification, please ignore this email.</p>
    </div>
    <div class="footer">
      <p>This is an automated message. Please do not reply to this email.</p>
      <p>Health Insurance Pre-Authorization System</p>
    </div>
  </div>
</body>
</html>"#,
        name = escape_html(display_name),
        code = escape_html(code),
        ttl = ttl_minutes,
    )
}

/// Submission confirmation body
pub fn receipt_body(claim: &PreAuthClaim, reference: Uuid) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: #10b981; color: white; padding: 20px; text-align: center;">
    <h1>&#10003; Request Submitted Successfully</h1>
  </div>
  <div style="padding: 30px; background: #f9fafb;">
    <p>Dear {name},</p>
    <p>Your pre-authorization request has been successfully submitted.</p>
    <div style="background: white; padding: 20px; border-radius: 8px; margin: 20px 0;">
      <h3>Request Details:</h3>
      <p><strong>Reference:</strong> {reference}</p>
      <p><strong>Patient Name:</strong> {name}</p>
      <p><strong>Policy Number:</strong> {policy}</p>
      <p><strong>Hospital:</strong> {hospital}</p>
      <p><strong>Treatment Type:</strong> {treatment}</p>
      <p><strong>Estimated Amount:</strong> &#8377;{amount}</p>
    </div>
    <p>We will review your request and contact you within 24-48 hours.</p>
    <p>Thank you for choosing our services.</p>
  </div>
</div>"#,
        name = escape_html(claim.patient_name.trim()),
        reference = reference,
        policy = escape_html(&claim.policy_reference()),
        hospital = escape_html(claim.hospital_name.trim()),
        treatment = escape_html(claim.treatment_type.trim()),
        amount = escape_html(claim.estimated_amount.trim()),
    )
}
