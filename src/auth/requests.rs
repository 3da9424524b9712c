use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Checked against `password` when present.
    #[serde(default)]
    pub confirm_password: Option<String>,
    pub email: String,
    pub user_type: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct SessionRequest {
    pub login_token: String,
}
