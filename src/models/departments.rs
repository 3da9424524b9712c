use crate::schema::department;
use serde::Deserialize;

#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "department"]
pub struct DepartData {
    pub dept_id: i32,
    pub dept_name: String,
}
