pub mod admins;
pub mod appointments;
pub mod billing;
pub mod cashiers;
pub mod departments;
pub mod doctors;
pub mod medical_history;
pub mod nurses;
pub mod patients;
pub mod roles;
pub mod staff;
pub mod users;
pub mod views;

pub mod user_sessions;
