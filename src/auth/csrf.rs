use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const SESSION_KEY: &str = "csrf_token";

/// Get the CSRF token from the session, or generate a new one.
pub fn get_or_create_token(session: &Session) -> String {
    if let Ok(Some(token)) = session.get::<String>(SESSION_KEY) {
        return token;
    }
    let token = generate_token();
    if let Err(e) = session.insert(SESSION_KEY, &token) {
        log::warn!("Could not store CSRF token in session: {e}");
    }
    token
}

/// Check a submitted form token against the session's token.
pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    let stored = session
        .get::<String>(SESSION_KEY)
        .unwrap_or(None)
        .unwrap_or_default();
    if tokens_match(&stored, submitted) {
        Ok(())
    } else {
        Err(AppError::Csrf)
    }
}

/// Random 32-byte hex token.
fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Constant-time comparison; an empty stored token never matches.
fn tokens_match(stored: &str, submitted: &str) -> bool {
    if stored.is_empty() || stored.len() != submitted.len() {
        return false;
    }
    stored
        .bytes()
        .zip(submitted.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
