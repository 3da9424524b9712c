use std::{fs::File, io, path::Path};

use anyhow::Context;
use diesel::{
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use serde::de::DeserializeOwned;

use crate::models::{
    admins::AdminData, appointments::Appointment, billing::Invoice, cashiers::CashierData,
    departments::DepartData, doctors::DoctorData, medical_history::Procedure, nurses::NurseData,
    patients::PatientData, staff::StaffData, users::UserData,
};

/// A table that can be filled from one of the fixed seed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedTable {
    Department,
    Staff,
    Cashier,
    Doctor,
    Nurse,
    Admin,
    Patient,
    Appointment,
    MedicalHistory,
    Billing,
    UserData,
}

impl SeedTable {
    /// Parents come before the tables referencing them.
    pub const ALL: [SeedTable; 11] = [
        SeedTable::Department,
        SeedTable::Staff,
        SeedTable::Cashier,
        SeedTable::Doctor,
        SeedTable::Nurse,
        SeedTable::Admin,
        SeedTable::Patient,
        SeedTable::Appointment,
        SeedTable::MedicalHistory,
        SeedTable::Billing,
        SeedTable::UserData,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SeedTable::Department => "Department.csv",
            SeedTable::Staff => "Staff_table_filled.csv",
            SeedTable::Cashier => "Cashiers.csv",
            SeedTable::Doctor => "Doctor.csv",
            SeedTable::Nurse => "Nurse.csv",
            SeedTable::Admin => "Admin.csv",
            SeedTable::Patient => "Patient.csv",
            SeedTable::Appointment => "Appointment.csv",
            SeedTable::MedicalHistory => "med_history.csv",
            SeedTable::Billing => "Billing.csv",
            SeedTable::UserData => "User_data.csv",
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            SeedTable::Department => "department",
            SeedTable::Staff => "staff",
            SeedTable::Cashier => "cashier",
            SeedTable::Doctor => "doctor",
            SeedTable::Nurse => "nurse",
            SeedTable::Admin => "admin",
            SeedTable::Patient => "patient",
            SeedTable::Appointment => "appointment",
            SeedTable::MedicalHistory => "medical_history",
            SeedTable::Billing => "billing",
            SeedTable::UserData => "user_data",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The file does not exist.
    Missing,
    /// The file holds a header and nothing else.
    Empty,
    /// Rows written by this load; duplicates of existing keys are not counted.
    Inserted(usize),
    /// A constraint other than a duplicate key failed; nothing was written.
    Rejected(String),
}

/// Read every data row of a CSV source, positionally, skipping the header.
pub fn read_rows<R, S>(source: S) -> anyhow::Result<Vec<R>>
where
    R: DeserializeOwned,
    S: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // header is line 1
        let line = idx + 2;
        let record = record.with_context(|| format!("Malformed CSV at line {}", line))?;
        let row = record
            .deserialize(None)
            .with_context(|| format!("Unexpected value at line {}", line))?;
        rows.push(row);
    }
    Ok(rows)
}

fn is_integrity_violation(err: &DieselError) -> bool {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
        | DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => true,
        DieselError::DatabaseError(_, info) => info.message().contains("constraint failed"),
        _ => false,
    }
}

fn load_rows<R, F>(
    conn: &SqliteConnection,
    path: &Path,
    table: SeedTable,
    insert: F,
) -> anyhow::Result<LoadOutcome>
where
    R: DeserializeOwned,
    F: Fn(&SqliteConnection, &R) -> QueryResult<usize>,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("{} not found. Skipping insertion.", path.display());
            return Ok(LoadOutcome::Missing);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to open {}", path.display()));
        }
    };

    let rows: Vec<R> =
        read_rows(file).with_context(|| format!("Failed to read {}", path.display()))?;
    if rows.is_empty() {
        tracing::info!("No data found in {}. Skipping insertion.", path.display());
        return Ok(LoadOutcome::Empty);
    }

    let res = conn.transaction::<_, DieselError, _>(|| {
        let mut inserted = 0;
        for row in &rows {
            inserted += insert(conn, row)?;
        }
        Ok(inserted)
    });

    match res {
        Ok(inserted) => {
            tracing::info!(
                "Inserted {} new rows into {} ({} read).",
                inserted,
                table.table_name(),
                rows.len()
            );
            Ok(LoadOutcome::Inserted(inserted))
        }
        Err(err) if is_integrity_violation(&err) => {
            tracing::warn!("Error inserting into {}: {}", table.table_name(), err);
            Ok(LoadOutcome::Rejected(err.to_string()))
        }
        Err(err) => Err(err).with_context(|| format!("Failed to insert into {}", table.table_name())),
    }
}

/// Load `path` into `table` with insert-or-ignore semantics.
pub fn load_csv(
    conn: &SqliteConnection,
    path: &Path,
    table: SeedTable,
) -> anyhow::Result<LoadOutcome> {
    use crate::schema::{
        admin, appointment, billing, cashier, department, doctor, medical_history, nurse, patient,
        staff, user_data,
    };

    match table {
        SeedTable::Department => load_rows(conn, path, table, |conn, row: &DepartData| {
            diesel::insert_or_ignore_into(department::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::Staff => load_rows(conn, path, table, |conn, row: &StaffData| {
            diesel::insert_or_ignore_into(staff::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::Cashier => load_rows(conn, path, table, |conn, row: &CashierData| {
            diesel::insert_or_ignore_into(cashier::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::Doctor => load_rows(conn, path, table, |conn, row: &DoctorData| {
            diesel::insert_or_ignore_into(doctor::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::Nurse => load_rows(conn, path, table, |conn, row: &NurseData| {
            diesel::insert_or_ignore_into(nurse::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::Admin => load_rows(conn, path, table, |conn, row: &AdminData| {
            diesel::insert_or_ignore_into(admin::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::Patient => load_rows(conn, path, table, |conn, row: &PatientData| {
            diesel::insert_or_ignore_into(patient::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::Appointment => load_rows(conn, path, table, |conn, row: &Appointment| {
            diesel::insert_or_ignore_into(appointment::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::MedicalHistory => load_rows(conn, path, table, |conn, row: &Procedure| {
            diesel::insert_or_ignore_into(medical_history::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::Billing => load_rows(conn, path, table, |conn, row: &Invoice| {
            diesel::insert_or_ignore_into(billing::table)
                .values(row)
                .execute(conn)
        }),
        SeedTable::UserData => load_rows(conn, path, table, |conn, row: &UserData| {
            diesel::insert_or_ignore_into(user_data::table)
                .values(row)
                .execute(conn)
        }),
    }
}

/// Load every seed file found in `dir`, parents first.
pub fn seed_all(
    conn: &SqliteConnection,
    dir: &Path,
) -> anyhow::Result<Vec<(SeedTable, LoadOutcome)>> {
    tracing::info!("Seeding database from {}", dir.display());
    SeedTable::ALL
        .iter()
        .map(|&table| {
            let outcome = load_csv(conn, &dir.join(table.file_name()), table)?;
            Ok((table, outcome))
        })
        .collect()
}
