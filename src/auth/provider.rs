//! Credentials sign-in provider.
//!
//! `sign_in` either yields the signed-in identity plus where to send the
//! browser, or fails with a provider-classified `AuthErrorKind`. Anything the
//! provider cannot classify (store or hash failures) comes back as
//! `SignInError::Fault` and is not turned into a user-facing message.

use serde::Deserialize;
use sqlx::PgPool;
use std::fmt;

use crate::auth::password;
use crate::auth::rate_limit::LoginThrottle;
use crate::auth::session::SessionUser;
use crate::auth::validate::{validate_email, validate_password};
use crate::errors::AppError;
use crate::models::user::{self, User};

/// The only strategy this provider knows.
pub const CREDENTIALS: &str = "credentials";

/// Where the browser lands after signing in without a usable callback.
pub const DEFAULT_REDIRECT: &str = "/dashboard";

/// Login form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub redirect_to: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Unknown account, wrong password or malformed credentials.
    CredentialsSignin,
    /// The account is temporarily locked after repeated failures.
    AccessDenied,
    /// The requested strategy is not configured.
    Configuration,
}

impl AuthErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthErrorKind::CredentialsSignin => "CredentialsSignin",
            AuthErrorKind::AccessDenied => "AccessDenied",
            AuthErrorKind::Configuration => "Configuration",
        }
    }
}

#[derive(Debug)]
pub enum SignInError {
    Auth(AuthErrorKind),
    Fault(AppError),
}

impl fmt::Display for SignInError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignInError::Auth(kind) => write!(f, "Sign-in rejected: {}", kind.as_str()),
            SignInError::Fault(e) => write!(f, "Sign-in failed: {e}"),
        }
    }
}

impl From<AppError> for SignInError {
    fn from(e: AppError) -> Self {
        SignInError::Fault(e)
    }
}

/// Successful sign-in: who, and where to navigate next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub user: SessionUser,
    pub redirect_to: String,
}

/// Lookup seam for accounts. Implemented for `PgPool`.
#[allow(async_fn_in_trait)]
pub trait UserDirectory {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
}

impl UserDirectory for PgPool {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        user::find_by_email(self, email).await
    }
}

/// Sign in with `strategy` using the submitted form.
pub async fn sign_in<D: UserDirectory>(
    directory: &D,
    throttle: &LoginThrottle,
    strategy: &str,
    form: &LoginForm,
) -> Result<SignedIn, SignInError> {
    if strategy != CREDENTIALS {
        log::warn!("Sign-in requested with unknown strategy '{strategy}'");
        return Err(SignInError::Auth(AuthErrorKind::Configuration));
    }

    if validate_email(&form.email).is_some() || validate_password(&form.password).is_some() {
        return Err(SignInError::Auth(AuthErrorKind::CredentialsSignin));
    }

    let email = form.email.trim();
    if throttle.is_blocked(email) {
        log::warn!("Sign-in for {email} refused: too many failed attempts");
        return Err(SignInError::Auth(AuthErrorKind::AccessDenied));
    }

    let found = directory
        .find_user_by_email(email)
        .await
        .map_err(|e| SignInError::Fault(AppError::Db(e)))?;

    let Some(account) = found else {
        throttle.record_failure(email);
        return Err(SignInError::Auth(AuthErrorKind::CredentialsSignin));
    };

    if !password::verify_password(&form.password, &account.password)? {
        throttle.record_failure(email);
        return Err(SignInError::Auth(AuthErrorKind::CredentialsSignin));
    }

    throttle.clear(email);
    Ok(SignedIn {
        user: SessionUser {
            id: account.id.to_string(),
            name: account.name,
            email: account.email,
        },
        redirect_to: callback_path(form.redirect_to.as_deref()),
    })
}

/// Only local absolute paths are honoured as post-login destinations.
pub fn callback_path(requested: Option<&str>) -> String {
    match requested.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_path_rejects_external_targets() {
        assert_eq!(callback_path(Some("/dashboard/invoices")), "/dashboard/invoices");
        assert_eq!(callback_path(Some("//evil.example")), DEFAULT_REDIRECT);
        assert_eq!(callback_path(Some("https://evil.example")), DEFAULT_REDIRECT);
        assert_eq!(callback_path(Some("/\\evil.example")), DEFAULT_REDIRECT);
        assert_eq!(callback_path(None), DEFAULT_REDIRECT);
    }
}
