mod requests;
mod responses;
pub mod roster;
pub mod service;
pub mod utils;

use crate::{
    database::get_db_conn,
    models::roles::Role,
    protocol::SimpleResponse,
    session::{create_session, destroy_session, load_session},
    utils::blocking,
    AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{self, bail, Context};

use self::{
    requests::*,
    responses::*,
    service::{RegisterError, Registration},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout)
        .service(session);
}

crate::post_funcs! {
    (register, "/register", RegisterRequest, SimpleResponse),
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
    (session, "/session", SessionRequest, SessionResponse),
}

async fn register_impl(
    state: web::Data<AppState>,
    info: web::Json<RegisterRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();
    if let Some(confirm) = &info.confirm_password {
        if confirm != &info.password {
            bail!(RegisterError::PasswordMismatch);
        }
    }
    let role = info.user_type.parse::<Role>()?;

    let conn = get_db_conn(&state.pool)?;
    blocking(move || {
        let registration = Registration {
            username: &info.username,
            password: &info.password,
            email: &info.email,
            role,
        };
        service::register(&conn, &state.roster, &registration)
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn login_impl(
    state: web::Data<AppState>,
    info: web::Json<LoginRequest>,
) -> anyhow::Result<LoginResponse> {
    let info = info.into_inner();

    let conn = get_db_conn(&state.pool)?;
    let (login_token, role) = blocking(move || -> anyhow::Result<(String, Role)> {
        let role = match service::login(&conn, &info.username, &info.password)? {
            Some(role) => role,
            None => bail!("Invalid credentials. Please try again."),
        };
        let login_token = create_session(&conn, &info.username)?;
        Ok((login_token, role))
    })
    .await?;

    Ok(LoginResponse {
        success: true,
        err: String::new(),
        login_token,
        role: Some(role),
    })
}

async fn logout_impl(
    state: web::Data<AppState>,
    info: web::Json<LogoutRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    let conn = get_db_conn(&state.pool)?;
    blocking(move || destroy_session(&conn, &info.login_token))
        .await
        .context("DB error")?;

    Ok(SimpleResponse::ok())
}

async fn session_impl(
    state: web::Data<AppState>,
    info: web::Json<SessionRequest>,
) -> anyhow::Result<SessionResponse> {
    let info = info.into_inner();
    let current = load_session(&state, Some(info.login_token)).await?;

    let sections = current
        .role
        .map(|role| role.sections().iter().map(|s| s.to_string()).collect::<Vec<_>>())
        .unwrap_or_default();
    Ok(SessionResponse {
        success: true,
        err: String::new(),
        authenticated: current.authenticated,
        username: current.username,
        role: current.role,
        sections,
    })
}
