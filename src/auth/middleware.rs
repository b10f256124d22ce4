use actix_session::SessionExt;
use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::errors::see_other;

/// Middleware function that checks for an authenticated session.
/// Redirects to /login, carrying the requested path, if no session found.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let has_user = session.get::<String>("user_id").unwrap_or(None).is_some();

    if !has_user {
        let location = login_location(req.path());
        let response = see_other(&location);
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// `/login?redirect_to=<path>`; paths with characters that would need
/// escaping fall back to plain `/login`.
pub fn login_location(path: &str) -> String {
    let safe = path.starts_with('/')
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'));
    if safe {
        format!("/login?redirect_to={path}")
    } else {
        "/login".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_location_keeps_plain_paths() {
        assert_eq!(
            login_location("/dashboard/invoices/create"),
            "/login?redirect_to=/dashboard/invoices/create"
        );
        assert_eq!(login_location("/dashboard/a b"), "/login");
    }
}
