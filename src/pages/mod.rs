pub mod queries;
pub mod render;

use crate::{
    auth::service::{self, RegisterError, Registration},
    database::get_db_conn,
    models::roles::Role,
    protocol::Notice,
    session::{create_session, destroy_session, Session, SESSION_COOKIE},
    utils::{blocking, slugify},
    AppState,
};
use actix_web::{
    error, get,
    http::{header, Cookie},
    post, web, HttpResponse,
};
use chrono::Local;
use serde::Deserialize;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(about)
        .service(contact)
        .service(send_contact)
        .service(login)
        .service(register)
        .service(logout)
        .service(dashboard)
        .service(section);
}

type PageResult = Result<HttpResponse, actix_web::Error>;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .header(header::LOCATION, location)
        .finish()
}

fn internal(err: anyhow::Error) -> actix_web::Error {
    tracing::error!("{:#}", err);
    error::ErrorInternalServerError("Internal server error")
}

fn auth_notice(state: &AppState, notice: Notice) -> PageResult {
    let body = state.templates.auth_page(Some(&notice)).map_err(internal)?;
    Ok(html(body))
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub user_type: String,
}

#[derive(Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[get("/")]
async fn index(state: web::Data<AppState>, session: Session) -> PageResult {
    if session.authenticated {
        return Ok(redirect("/dashboard"));
    }
    let body = state.templates.auth_page(None).map_err(internal)?;
    Ok(html(body))
}

#[get("/about")]
async fn about(state: web::Data<AppState>) -> PageResult {
    let body = state.templates.about_page().map_err(internal)?;
    Ok(html(body))
}

#[get("/contact")]
async fn contact(state: web::Data<AppState>) -> PageResult {
    let body = state.templates.contact_page(None).map_err(internal)?;
    Ok(html(body))
}

#[post("/contact")]
async fn send_contact(state: web::Data<AppState>, form: web::Form<ContactForm>) -> PageResult {
    let form = form.into_inner();
    tracing::info!(
        "Contact message from {} <{}> ({} chars)",
        form.name,
        form.email,
        form.message.len()
    );
    let notice = Notice::success("Message sent! We'll get back to you soon.");
    let body = state
        .templates
        .contact_page(Some(&notice))
        .map_err(internal)?;
    Ok(html(body))
}

#[post("/login")]
async fn login(state: web::Data<AppState>, form: web::Form<LoginForm>) -> PageResult {
    let form = form.into_inner();

    let conn = get_db_conn(&state.pool).map_err(internal)?;
    let token = blocking(move || -> anyhow::Result<Option<String>> {
        match service::login(&conn, &form.username, &form.password)? {
            Some(_) => Ok(Some(create_session(&conn, &form.username)?)),
            None => Ok(None),
        }
    })
    .await
    .map_err(internal)?;

    match token {
        Some(token) => {
            let cookie = Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .finish();
            Ok(HttpResponse::Found()
                .header(header::LOCATION, "/dashboard")
                .cookie(cookie)
                .finish())
        }
        None => auth_notice(
            &state,
            Notice::warning("Invalid credentials. Please try again."),
        ),
    }
}

#[post("/register")]
async fn register(state: web::Data<AppState>, form: web::Form<RegisterForm>) -> PageResult {
    let form = form.into_inner();
    if form.password != form.confirm_password {
        return auth_notice(&state, Notice::warning(RegisterError::PasswordMismatch));
    }
    let role = match form.user_type.parse::<Role>() {
        Ok(role) => role,
        Err(err) => return auth_notice(&state, Notice::warning(err)),
    };

    let conn = get_db_conn(&state.pool).map_err(internal)?;
    let worker_state = state.clone();
    let res = blocking(move || {
        let registration = Registration {
            username: &form.username,
            password: &form.password,
            email: &form.email,
            role,
        };
        service::register(&conn, &worker_state.roster, &registration)
    })
    .await;

    let notice = match res {
        Ok(()) => Notice::success("User registered successfully! Please log in."),
        Err(RegisterError::Internal(err)) => return Err(internal(err)),
        Err(err) => Notice::warning(err),
    };
    auth_notice(&state, notice)
}

#[post("/logout")]
async fn logout(state: web::Data<AppState>, session: Session) -> PageResult {
    if let Some(token) = session.token {
        let conn = get_db_conn(&state.pool).map_err(internal)?;
        blocking(move || destroy_session(&conn, &token))
            .await
            .map_err(internal)?;
    }

    let cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    Ok(HttpResponse::Found()
        .header(header::LOCATION, "/")
        .del_cookie(&cookie)
        .finish())
}

#[get("/dashboard")]
async fn dashboard(state: web::Data<AppState>, session: Session) -> PageResult {
    if session.user().is_none() {
        return Ok(redirect("/"));
    }

    let conn = get_db_conn(&state.pool).map_err(internal)?;
    let stats = blocking(move || queries::dashboard_stats(&conn))
        .await
        .map_err(internal)?;
    let today = Local::now().date_naive();

    let body = state
        .templates
        .dashboard_page(&session, &today, &stats)
        .map_err(internal)?;
    Ok(html(body))
}

#[get("/section/{slug}")]
async fn section(
    state: web::Data<AppState>,
    session: Session,
    slug: web::Path<String>,
) -> PageResult {
    let role = match session.user() {
        Some((_, role)) => role,
        None => return Ok(redirect("/")),
    };
    let slug = slug.into_inner();
    let name = match role.sections().iter().find(|name| slugify(name) == slug) {
        Some(name) => *name,
        None => {
            let body = state.templates.not_found_page(&session).map_err(internal)?;
            return Ok(HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(body));
        }
    };

    let conn = get_db_conn(&state.pool).map_err(internal)?;
    let content = blocking(move || queries::section_content(&conn, role, name))
        .await
        .map_err(internal)?;

    let body = state
        .templates
        .section_page(&session, name, &content)
        .map_err(internal)?;
    Ok(html(body))
}
