use crate::schema::appointment;
use serde::Deserialize;

/// Date and time are kept as the text the seed files carry.
#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "appointment"]
pub struct Appointment {
    pub appt_id: i32,
    pub doc_id: i32,
    pub date: String,
    pub time: String,
    pub pat_id: i32,
}
