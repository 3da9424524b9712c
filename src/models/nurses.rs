use crate::schema::nurse;
use serde::Deserialize;

#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "nurse"]
pub struct NurseData {
    pub nurse_id: i32,
    pub fname: String,
    pub lname: String,
}
