use crate::schema::staff;
use serde::Deserialize;

#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "staff"]
pub struct StaffData {
    pub staff_id: i32,
    pub name: String,
    pub designation: String,
    pub dept_id: i32,
}
