use serde::Serialize;

use crate::models::roles::Role;

#[derive(Default, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub login_token: String,
    pub role: Option<Role>,
}

#[derive(Default, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub err: String,
    pub authenticated: bool,
    pub username: Option<String>,
    pub role: Option<Role>,
    pub sections: Vec<String>,
}

crate::impl_err_response! {
    LoginResponse,
    SessionResponse,
}
