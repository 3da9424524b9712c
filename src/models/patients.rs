use crate::schema::patient;
use serde::Deserialize;

#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "patient"]
pub struct PatientData {
    pub pat_id: i32,
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub patient_type: String,
}
