use anyhow::Context;
use diesel::prelude::*;

use crate::models::{
    roles::Role,
    views::{NurseAppointment, PatientHistory},
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DashboardStats {
    pub appointments: i64,
    pub patients: i64,
    pub doctors: i64,
    pub invoices: i64,
}

pub fn dashboard_stats(conn: &SqliteConnection) -> anyhow::Result<DashboardStats> {
    use crate::schema::{appointment, billing, doctor, patient};

    Ok(DashboardStats {
        appointments: appointment::table
            .count()
            .get_result(conn)
            .context("DB error")?,
        patients: patient::table.count().get_result(conn).context("DB error")?,
        doctors: doctor::table.count().get_result(conn).context("DB error")?,
        invoices: billing::table.count().get_result(conn).context("DB error")?,
    })
}

pub fn nurse_appointments(conn: &SqliteConnection) -> anyhow::Result<Vec<NurseAppointment>> {
    use crate::schema::nurse_appointments;

    nurse_appointments::table
        .order((nurse_appointments::date, nurse_appointments::time))
        .load(conn)
        .context("DB error")
}

pub fn patient_history(conn: &SqliteConnection) -> anyhow::Result<Vec<PatientHistory>> {
    use crate::schema::nurse_patient_history;

    nurse_patient_history::table
        .order(nurse_patient_history::id)
        .load(conn)
        .context("DB error")
}

/// What a role-specific section shows.
#[derive(Debug)]
pub enum SectionContent {
    NurseAppointments(Vec<NurseAppointment>),
    PatientHistory(Vec<PatientHistory>),
    UnderConstruction,
}

pub fn section_content(
    conn: &SqliteConnection,
    role: Role,
    section: &str,
) -> anyhow::Result<SectionContent> {
    match (role, section) {
        (Role::Nurse, "Appointments") => Ok(SectionContent::NurseAppointments(
            nurse_appointments(conn)?,
        )),
        (Role::Nurse, "Patient Care") => Ok(SectionContent::PatientHistory(patient_history(conn)?)),
        _ => Ok(SectionContent::UnderConstruction),
    }
}
