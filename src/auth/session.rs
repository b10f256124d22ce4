use actix_session::Session;

use crate::errors::AppError;

const USER_ID: &str = "user_id";
const USER_NAME: &str = "user_name";
const USER_EMAIL: &str = "user_email";

/// Identity stored in the cookie session after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

pub fn get_user_id(session: &Session) -> Option<String> {
    session.get::<String>(USER_ID).unwrap_or(None)
}

pub fn get_user(session: &Session) -> Result<SessionUser, AppError> {
    let id = get_user_id(session).ok_or_else(|| AppError::Session("Not signed in".to_string()))?;
    let name = session
        .get::<String>(USER_NAME)
        .map_err(|e| AppError::Session(e.to_string()))?
        .unwrap_or_default();
    let email = session
        .get::<String>(USER_EMAIL)
        .map_err(|e| AppError::Session(e.to_string()))?
        .unwrap_or_default();
    Ok(SessionUser { id, name, email })
}

/// Start a fresh session for `user`, discarding anything stored before.
pub fn sign_in(session: &Session, user: &SessionUser) -> Result<(), AppError> {
    session.renew();
    session
        .insert(USER_ID, &user.id)
        .and_then(|_| session.insert(USER_NAME, &user.name))
        .and_then(|_| session.insert(USER_EMAIL, &user.email))
        .map_err(|e| AppError::Session(e.to_string()))
}

pub fn sign_out(session: &Session) {
    session.purge();
}
