use anyhow::Context;
use diesel::{
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use thiserror::Error;

use super::{
    roster::Roster,
    utils::{hash_password, verify_password},
};
use crate::models::{roles::Role, users::NewUser};

/// Why a registration was turned down. The messages are shown to the user.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("{0}s must already exist in the system. Contact Admin.")]
    NotInRoster(Role),
    #[error("Username or email already exists. Try a different one.")]
    Conflict,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub struct Registration<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
    pub role: Role,
}

pub fn register(
    conn: &SqliteConnection,
    roster: &Roster,
    info: &Registration<'_>,
) -> Result<(), RegisterError> {
    use crate::schema::user_data;

    let username = info.username.trim();
    let email = info.email.trim();
    if username.is_empty() {
        return Err(RegisterError::MissingFields);
    }

    // A taken username wins over every other complaint.
    let res = user_data::table
        .filter(user_data::username.eq(username))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;
    if res > 0 {
        return Err(RegisterError::Conflict);
    }

    if info.password.is_empty() || email.is_empty() {
        return Err(RegisterError::MissingFields);
    }

    if info.role.requires_roster() && !roster.contains(username) {
        tracing::debug!("{} is not on the roster", username);
        return Err(RegisterError::NotInRoster(info.role));
    }

    let data = NewUser {
        username,
        password: hash_password(info.password),
        email,
        user_type: info.role.as_str(),
    };
    match diesel::insert_into(user_data::table)
        .values(&data)
        .execute(conn)
    {
        Ok(_) => {
            tracing::info!("Registered {} as {}", username, info.role);
            Ok(())
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(RegisterError::Conflict)
        }
        Err(err) => Err(anyhow::Error::new(err).context("DB error").into()),
    }
}

/// The account's role when `password` matches the stored hash.
pub fn login(
    conn: &SqliteConnection,
    username: &str,
    password: &str,
) -> anyhow::Result<Option<Role>> {
    use crate::schema::user_data;

    let res = user_data::table
        .filter(user_data::username.eq(username))
        .select((user_data::password, user_data::user_type))
        .first::<(String, String)>(conn)
        .optional()
        .context("DB error")?;

    match res {
        Some((hashed_password, user_type)) if verify_password(password, &hashed_password) => {
            Ok(Some(Role::from_stored(&user_type)))
        }
        _ => {
            tracing::debug!("Rejected login for {}", username);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_conn;

    fn roster() -> Roster {
        Roster::from_names(vec!["Greg House", "Carla Espinosa", "Admin One"])
    }

    fn account<'a>(username: &'a str, email: &'a str, role: Role) -> Registration<'a> {
        Registration {
            username,
            password: "pw",
            email,
            role,
        }
    }

    #[test]
    fn patient_registers_and_logs_in() {
        let conn = test_conn();
        register(&conn, &roster(), &account("jdoe", "jdoe@example.com", Role::Patient)).unwrap();

        assert_eq!(login(&conn, "jdoe", "pw").unwrap(), Some(Role::Patient));
    }

    #[test]
    fn wrong_password_yields_no_role() {
        let conn = test_conn();
        register(&conn, &roster(), &account("jdoe", "jdoe@example.com", Role::Patient)).unwrap();

        assert_eq!(login(&conn, "jdoe", "pw2").unwrap(), None);
        assert_eq!(login(&conn, "jdoe", "").unwrap(), None);
        assert_eq!(login(&conn, "nobody", "pw").unwrap(), None);
    }

    #[test]
    fn duplicate_username_conflicts() {
        let conn = test_conn();
        register(&conn, &roster(), &account("jdoe", "a@example.com", Role::Patient)).unwrap();

        let again = register(&conn, &roster(), &account("jdoe", "b@example.com", Role::Patient));
        assert!(matches!(again, Err(RegisterError::Conflict)));

        let as_staff = register(&conn, &roster(), &account("jdoe", "c@example.com", Role::Doctor));
        assert!(matches!(as_staff, Err(RegisterError::Conflict)));

        let blank = Registration {
            username: "jdoe",
            password: "",
            email: "",
            role: Role::Cashier,
        };
        assert!(matches!(
            register(&conn, &roster(), &blank),
            Err(RegisterError::Conflict)
        ));
    }

    #[test]
    fn duplicate_email_conflicts() {
        let conn = test_conn();
        register(&conn, &roster(), &account("jdoe", "same@example.com", Role::Patient)).unwrap();

        let res = register(&conn, &roster(), &account("other", "same@example.com", Role::Patient));
        assert!(matches!(res, Err(RegisterError::Conflict)));
    }

    #[test]
    fn staff_roles_need_a_roster_entry() {
        let conn = test_conn();
        for role in [Role::Doctor, Role::Nurse, Role::Admin, Role::Cashier].iter() {
            let res = register(&conn, &roster(), &account("stranger", "s@example.com", *role));
            assert!(matches!(res, Err(RegisterError::NotInRoster(r)) if r == *role));
        }

        register(&conn, &roster(), &account("greg house", "gh@example.com", Role::Doctor)).unwrap();
        register(&conn, &roster(), &account("CARLA ESPINOSA", "ce@example.com", Role::Nurse))
            .unwrap();
        assert_eq!(login(&conn, "greg house", "pw").unwrap(), Some(Role::Doctor));
    }

    #[test]
    fn empty_fields_are_rejected() {
        let conn = test_conn();
        let cases = vec![
            account("", "e@example.com", Role::Patient),
            account("jdoe", "", Role::Patient),
            Registration {
                username: "jdoe",
                password: "",
                email: "e@example.com",
                role: Role::Patient,
            },
        ];
        for info in &cases {
            assert!(matches!(
                register(&conn, &roster(), info),
                Err(RegisterError::MissingFields)
            ));
        }
    }

    #[test]
    fn stores_only_the_hash() {
        use crate::schema::user_data;

        let conn = test_conn();
        register(&conn, &roster(), &account("jdoe", "jdoe@example.com", Role::Patient)).unwrap();
        let stored = user_data::table
            .select(user_data::password)
            .first::<String>(&conn)
            .unwrap();
        assert_eq!(stored, hash_password("pw"));
    }

    #[test]
    fn username_and_email_are_stored_trimmed() {
        let conn = test_conn();
        register(&conn, &roster(), &account(" greg house ", " gh@example.com", Role::Doctor))
            .unwrap();

        assert_eq!(login(&conn, "greg house", "pw").unwrap(), Some(Role::Doctor));
        let again = register(&conn, &roster(), &account("greg house", "x@example.com", Role::Doctor));
        assert!(matches!(again, Err(RegisterError::Conflict)));
    }

    #[test]
    fn seeded_accounts_log_in() {
        use crate::schema::user_data;

        let conn = test_conn();
        diesel::insert_into(user_data::table)
            .values(NewUser {
                username: "seeded",
                // sha256("pw")
                password: "30c952fab122c3f9759f02a6d95c3758b246b4fee239957b2d4fee46e26170c4"
                    .to_string(),
                email: "seeded@hospital.com",
                user_type: "Doctor",
            })
            .execute(&conn)
            .unwrap();

        assert_eq!(login(&conn, "seeded", "pw").unwrap(), Some(Role::Doctor));
    }

    #[test]
    fn unknown_stored_type_still_logs_in() {
        use crate::schema::user_data;

        let conn = test_conn();
        diesel::insert_into(user_data::table)
            .values(NewUser {
                username: "legacy",
                password: hash_password("pw"),
                email: "legacy@hospital.com",
                user_type: "Receptionist",
            })
            .execute(&conn)
            .unwrap();

        assert_eq!(login(&conn, "legacy", "pw").unwrap(), Some(Role::Patient));
    }

    #[test]
    fn not_in_roster_message_names_the_role() {
        assert_eq!(
            RegisterError::NotInRoster(Role::Nurse).to_string(),
            "Nurses must already exist in the system. Contact Admin."
        );
    }
}
