use crate::schema::doctor;
use serde::Deserialize;

#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "doctor"]
pub struct DoctorData {
    pub doc_id: i32,
    pub doc_name: String,
    pub specialization: String,
    pub email: String,
}
