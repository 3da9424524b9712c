/// Row of the `nurse_appointments` view.
#[derive(Debug, Queryable)]
pub struct NurseAppointment {
    pub appt_id: i32,
    pub pat_id: i32,
    pub patient_fname: String,
    pub patient_lname: String,
    pub date: String,
    pub time: String,
    pub doc_id: i32,
    pub doctor_name: String,
    pub nurse_id: i32,
    pub nurse_name: String,
}

/// Row of the `nurse_patient_history` view.
#[derive(Debug, Queryable)]
pub struct PatientHistory {
    pub id: i32,
    pub pat_name: Option<String>,
    pub history: String,
}
