use std::{fmt, str::FromStr};

use anyhow::bail;
use serde::{Deserialize, Serialize};

pub const ROLE_PATIENT: &str = "Patient";
pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_DOCTOR: &str = "Doctor";
pub const ROLE_NURSE: &str = "Nurse";
pub const ROLE_CASHIER: &str = "Cashier";

/// The `user_type` tag stored with every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Patient,
    Admin,
    Doctor,
    Nurse,
    Cashier,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Patient,
        Role::Admin,
        Role::Doctor,
        Role::Nurse,
        Role::Cashier,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => ROLE_PATIENT,
            Role::Admin => ROLE_ADMIN,
            Role::Doctor => ROLE_DOCTOR,
            Role::Nurse => ROLE_NURSE,
            Role::Cashier => ROLE_CASHIER,
        }
    }

    /// Anyone but a patient has to be on the admin or staff roster to sign up.
    pub fn requires_roster(self) -> bool {
        self != Role::Patient
    }

    /// Read a `user_type` column. Spelling is matched without regard to case;
    /// anything else gets the patient navigation, which is also the default
    /// menu for unrecognised accounts.
    pub fn from_stored(user_type: &str) -> Role {
        let user_type = user_type.trim();
        match Role::ALL
            .iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(user_type))
        {
            Some(role) => *role,
            None => {
                tracing::warn!("Unknown user type {:?}, using default navigation", user_type);
                Role::Patient
            }
        }
    }

    /// Navigation entries after the dashboard, in display order.
    pub fn sections(self) -> &'static [&'static str] {
        match self {
            Role::Admin => &[
                "Appointments",
                "Medical Records",
                "Billing",
                "Users",
                "Settings",
            ],
            Role::Doctor => &["Appointments", "Medical Records", "Patients"],
            Role::Patient => &["Appointments", "Medical Records", "Billing"],
            Role::Nurse => &["Appointments", "Patient Care", "Medication"],
            Role::Cashier => &["Billing", "Payments", "Reports"],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_PATIENT => Ok(Role::Patient),
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_DOCTOR => Ok(Role::Doctor),
            ROLE_NURSE => Ok(Role::Nurse),
            ROLE_CASHIER => Ok(Role::Cashier),
            _ => bail!("Unknown user type: {}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_display_name() {
        for role in Role::ALL.iter() {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), *role);
        }
        assert!("patient".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn stored_types_never_fail() {
        assert_eq!(Role::from_stored("Nurse"), Role::Nurse);
        assert_eq!(Role::from_stored("cashier "), Role::Cashier);
        assert_eq!(Role::from_stored("Receptionist"), Role::Patient);
        assert_eq!(Role::from_stored(""), Role::Patient);
    }

    #[test]
    fn only_patients_skip_the_roster() {
        assert!(!Role::Patient.requires_roster());
        assert!(Role::Admin.requires_roster());
        assert!(Role::Doctor.requires_roster());
        assert!(Role::Nurse.requires_roster());
        assert!(Role::Cashier.requires_roster());
    }

    #[test]
    fn cashiers_have_no_appointments_section() {
        assert!(!Role::Cashier.sections().contains(&"Appointments"));
        assert_eq!(Role::Nurse.sections()[1], "Patient Care");
    }
}
