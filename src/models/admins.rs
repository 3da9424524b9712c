use crate::schema::admin;
use serde::Deserialize;

#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "admin"]
pub struct AdminData {
    pub admin_id: i32,
    pub name: String,
    pub designation: String,
}
