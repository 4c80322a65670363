//! Masking helpers for log output

/// Mask an email address for logging: `patient@example.com` -> `p*****t@example.com`
pub fn mask_email(email: &str) -> String {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let chars: Vec<char> = local.chars().collect();
            let masked_local = match chars.len() {
                1 => "*".to_string(),
                2 => format!("{}*", chars[0]),
                n => format!("{}{}{}", chars[0], "*".repeat(n - 2), chars[n - 1]),
            };
            format!("{}@{}", masked_local, domain)
        }
        _ => "****".to_string(),
    }
}
