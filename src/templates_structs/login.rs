use askama::Template;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub app_name: String,
    pub csrf_token: String,
    pub error: Option<String>,
    pub email: String,
    pub redirect_to: String,
}
