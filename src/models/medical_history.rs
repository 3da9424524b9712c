use crate::schema::medical_history;
use serde::Deserialize;

#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "medical_history"]
pub struct Procedure {
    pub proc_id: i32,
    pub name: String,
    pub appt_id: i32,
}
