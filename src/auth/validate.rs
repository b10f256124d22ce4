/// Minimum password length accepted by the credentials strategy.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => None,
        _ => Some("Email must be a valid address".to_string()),
    }
}

/// Validate a sign-in password: at least `MIN_PASSWORD_LEN` chars.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    None
}
