use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::provider::{self, AuthErrorKind, CREDENTIALS, LoginForm, SignInError, SignedIn, UserDirectory};
use crate::auth::rate_limit::LoginThrottle;
use crate::auth::{csrf, session as auth_session};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::templates_structs::LoginTemplate;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub redirect_to: Option<String>,
}

/// Result of a sign-in attempt that did not fault.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The provider accepted the credentials; navigate to `redirect_to`.
    SignedIn(SignedIn),
    /// A provider-classified rejection, already turned into the message to show.
    Rejected(&'static str),
}

/// User-facing message for a provider-classified error.
pub fn auth_error_message(kind: AuthErrorKind) -> &'static str {
    match kind {
        AuthErrorKind::CredentialsSignin => INVALID_CREDENTIALS,
        _ => SOMETHING_WENT_WRONG,
    }
}

/// Sign in through the credentials provider. Only provider-classified errors
/// become messages; any other fault is returned as `Err`.
pub async fn authenticate<D: UserDirectory>(
    directory: &D,
    throttle: &LoginThrottle,
    form: &LoginForm,
) -> Result<AuthOutcome, AppError> {
    match provider::sign_in(directory, throttle, CREDENTIALS, form).await {
        Ok(signed_in) => Ok(AuthOutcome::SignedIn(signed_in)),
        Err(SignInError::Auth(kind)) => {
            log::info!("Sign-in rejected for {}: {}", form.email.trim(), kind.as_str());
            Ok(AuthOutcome::Rejected(auth_error_message(kind)))
        }
        Err(SignInError::Fault(e)) => Err(e),
    }
}

/// GET /login
pub async fn login_page(
    session: Session,
    config: web::Data<AppConfig>,
    query: web::Query<LoginQuery>,
) -> Result<HttpResponse, AppError> {
    let redirect_to = provider::callback_path(query.redirect_to.as_deref());

    // If already logged in, skip the form
    if auth_session::get_user_id(&session).is_some() {
        return Ok(see_other(&redirect_to));
    }

    render(LoginTemplate {
        app_name: config.app_name.clone(),
        csrf_token: csrf::get_or_create_token(&session),
        error: None,
        email: String::new(),
        redirect_to,
    })
}

/// POST /login
pub async fn login_submit(
    pool: web::Data<PgPool>,
    session: Session,
    config: web::Data<AppConfig>,
    throttle: web::Data<LoginThrottle>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match authenticate(pool.get_ref(), &throttle, &form).await? {
        AuthOutcome::SignedIn(signed_in) => {
            auth_session::sign_in(&session, &signed_in.user)?;
            log::info!("User {} signed in", signed_in.user.email);
            Ok(see_other(&signed_in.redirect_to))
        }
        AuthOutcome::Rejected(message) => render(LoginTemplate {
            app_name: config.app_name.clone(),
            csrf_token: csrf::get_or_create_token(&session),
            error: Some(message.to_string()),
            email: form.email.trim().to_string(),
            redirect_to: provider::callback_path(form.redirect_to.as_deref()),
        }),
    }
}

/// POST /logout
pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    auth_session::sign_out(&session);
    Ok(see_other("/login"))
}
