use crate::schema::user_data;
use serde::Deserialize;

/// A full row, as exported to `User_data.csv`.
#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "user_data"]
pub struct UserData {
    pub user_id: i32,
    pub username: String,
    pub password: String,
    pub email: String,
    pub user_type: String,
}

#[derive(Insertable)]
#[table_name = "user_data"]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password: String,
    pub email: &'a str,
    pub user_type: &'a str,
}
