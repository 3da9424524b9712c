use crate::schema::user_sessions;
use chrono::NaiveDateTime;

#[derive(Queryable, Insertable)]
#[table_name = "user_sessions"]
pub struct UserSessionData {
    pub token: String,
    pub username: String,
    pub created_at: NaiveDateTime,
}
