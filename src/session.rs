use std::{future::Future, pin::Pin};

use actix_web::{dev::Payload, error, web, FromRequest, HttpMessage, HttpRequest};
use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    database::get_db_conn,
    models::{roles::Role, user_sessions::UserSessionData},
    utils::blocking,
    AppState,
};

pub const SESSION_COOKIE: &str = "hms_session";

/// Who is making the request. Handlers receive it as an extractor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub authenticated: bool,
    pub username: Option<String>,
    pub role: Option<Role>,
    pub token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(username: String, role: Role, token: String) -> Self {
        Self {
            authenticated: true,
            username: Some(username),
            role: Some(role),
            token: Some(token),
        }
    }

    /// Username and role, when signed in.
    pub fn user(&self) -> Option<(&str, Role)> {
        match (self.authenticated, &self.username, self.role) {
            (true, Some(username), Some(role)) => Some((username.as_str(), role)),
            _ => None,
        }
    }
}

/// Random v4 UUID, the only credential the cookie carries.
fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn create_session(conn: &SqliteConnection, username: &str) -> anyhow::Result<String> {
    use crate::schema::user_sessions;

    let token = new_token();
    let data = UserSessionData {
        token: token.clone(),
        username: username.to_string(),
        created_at: Utc::now().naive_utc(),
    };
    diesel::insert_into(user_sessions::table)
        .values(data)
        .execute(conn)
        .context("DB error")?;

    Ok(token)
}

/// Unknown tokens resolve to an anonymous session.
pub fn resolve_session(conn: &SqliteConnection, token: &str) -> anyhow::Result<Session> {
    use crate::schema::{user_data, user_sessions};

    let res = user_sessions::table
        .inner_join(user_data::table.on(user_data::username.eq(user_sessions::username)))
        .filter(user_sessions::token.eq(token))
        .select((user_data::username, user_data::user_type))
        .first::<(String, String)>(conn)
        .optional()
        .context("DB error")?;

    match res {
        Some((username, user_type)) => Ok(Session::signed_in(
            username,
            Role::from_stored(&user_type),
            token.to_string(),
        )),
        None => Ok(Session::anonymous()),
    }
}

pub fn destroy_session(conn: &SqliteConnection, token: &str) -> anyhow::Result<()> {
    use crate::schema::user_sessions;

    diesel::delete(user_sessions::table.filter(user_sessions::token.eq(token)))
        .execute(conn)
        .context("DB error")?;
    Ok(())
}

/// Resolve `token` on the blocking pool.
pub async fn load_session(
    state: &web::Data<AppState>,
    token: Option<String>,
) -> anyhow::Result<Session> {
    let token = match token {
        Some(token) if !token.is_empty() => token,
        _ => return Ok(Session::anonymous()),
    };
    let conn = get_db_conn(&state.pool)?;
    blocking(move || resolve_session(&conn, &token)).await
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    type Config = ();

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let state = match state {
                Some(state) => state,
                None => return Err(error::ErrorInternalServerError("App state missing")),
            };
            load_session(&state, token)
                .await
                .map_err(error::ErrorInternalServerError)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{roster::Roster, service},
        database::test_conn,
    };

    fn signed_up(conn: &SqliteConnection) {
        let info = service::Registration {
            username: "Nina",
            password: "pw",
            email: "nina@hospital.com",
            role: Role::Nurse,
        };
        service::register(conn, &Roster::from_names(vec!["nina"]), &info).unwrap();
    }

    #[test]
    fn anonymous_has_no_user() {
        let session = Session::anonymous();
        assert!(!session.authenticated);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn created_session_resolves_to_user_and_role() {
        let conn = test_conn();
        signed_up(&conn);

        let token = create_session(&conn, "Nina").unwrap();
        let session = resolve_session(&conn, &token).unwrap();

        assert!(session.authenticated);
        assert_eq!(session.user(), Some(("Nina", Role::Nurse)));
        assert_eq!(session.token.as_deref(), Some(token.as_str()));
    }

    #[test]
    fn tokens_are_unique_per_login() {
        let conn = test_conn();
        signed_up(&conn);

        let first = create_session(&conn, "Nina").unwrap();
        let second = create_session(&conn, "Nina").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn tokens_are_random_hex() {
        let token = new_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, new_token());
    }

    #[test]
    fn unknown_stored_type_resolves_with_default_role() {
        use crate::{models::users::NewUser, schema::user_data};

        let conn = test_conn();
        diesel::insert_into(user_data::table)
            .values(NewUser {
                username: "legacy",
                password: "x".to_string(),
                email: "legacy@hospital.com",
                user_type: "patient",
            })
            .execute(&conn)
            .unwrap();

        let token = create_session(&conn, "legacy").unwrap();
        let session = resolve_session(&conn, &token).unwrap();
        assert_eq!(session.user(), Some(("legacy", Role::Patient)));
    }

    #[test]
    fn destroyed_or_unknown_tokens_are_anonymous() {
        let conn = test_conn();
        signed_up(&conn);

        let token = create_session(&conn, "Nina").unwrap();
        destroy_session(&conn, &token).unwrap();

        assert_eq!(resolve_session(&conn, &token).unwrap(), Session::anonymous());
        assert_eq!(resolve_session(&conn, "bogus").unwrap(), Session::anonymous());
    }

    #[test]
    fn sessions_need_an_existing_user() {
        let conn = test_conn();
        assert!(create_session(&conn, "ghost").is_err());
    }
}
