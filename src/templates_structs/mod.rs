// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::get_user;
use crate::config::AppConfig;
use crate::errors::AppError;

mod invoice;
mod login;

pub use invoice::*;
pub use login::*;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.user_name`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub user_name: String,
    pub avatar_initial: String,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig) -> Result<Self, AppError> {
        let user = get_user(session)?;
        let shown = if user.name.is_empty() { user.email } else { user.name };
        let avatar_initial = shown.chars().next().unwrap_or('?').to_uppercase().to_string();
        Ok(Self {
            user_name: shown,
            avatar_initial,
            app_name: config.app_name.clone(),
            csrf_token: csrf::get_or_create_token(session),
        })
    }
}
