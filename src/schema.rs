table! {
    admin (admin_id) {
        admin_id -> Integer,
        name -> Text,
        designation -> Text,
    }
}

table! {
    appointment (appt_id) {
        appt_id -> Integer,
        doc_id -> Integer,
        date -> Text,
        time -> Text,
        pat_id -> Integer,
    }
}

table! {
    billing (invoice_id) {
        invoice_id -> Text,
        pat_id -> Integer,
        items -> Text,
        amount -> Double,
    }
}

table! {
    cashier (cashier_id) {
        cashier_id -> Integer,
        name -> Text,
        designation -> Text,
    }
}

table! {
    department (dept_id) {
        dept_id -> Integer,
        dept_name -> Text,
    }
}

table! {
    doctor (doc_id) {
        doc_id -> Integer,
        doc_name -> Text,
        specialization -> Text,
        email -> Text,
    }
}

table! {
    medical_history (proc_id, appt_id) {
        proc_id -> Integer,
        name -> Text,
        appt_id -> Integer,
    }
}

table! {
    nurse (nurse_id) {
        nurse_id -> Integer,
        fname -> Text,
        lname -> Text,
    }
}

table! {
    patient (pat_id) {
        pat_id -> Integer,
        fname -> Text,
        lname -> Text,
        email -> Text,
        patient_type -> Text,
    }
}

table! {
    schema_version (version) {
        version -> Integer,
    }
}

// No primary key in the database; rows are unique on this triple.
table! {
    staff (name, designation, dept_id) {
        staff_id -> Integer,
        name -> Text,
        designation -> Text,
        dept_id -> Integer,
    }
}

table! {
    user_data (user_id) {
        user_id -> Integer,
        username -> Text,
        password -> Text,
        email -> Text,
        user_type -> Text,
    }
}

table! {
    user_sessions (token) {
        token -> Text,
        username -> Text,
        created_at -> Timestamp,
    }
}

// views

table! {
    nurse_appointments (appt_id) {
        appt_id -> Integer,
        pat_id -> Integer,
        patient_fname -> Text,
        patient_lname -> Text,
        date -> Text,
        time -> Text,
        doc_id -> Integer,
        doctor_name -> Text,
        nurse_id -> Integer,
        nurse_name -> Text,
    }
}

table! {
    nurse_patient_history (id) {
        id -> Integer,
        pat_name -> Nullable<Text>,
        history -> Text,
    }
}

joinable!(appointment -> doctor (doc_id));
joinable!(appointment -> patient (pat_id));
joinable!(billing -> patient (pat_id));
joinable!(medical_history -> appointment (appt_id));
joinable!(staff -> department (dept_id));

allow_tables_to_appear_in_same_query!(
    admin,
    appointment,
    billing,
    cashier,
    department,
    doctor,
    medical_history,
    nurse,
    patient,
    staff,
    user_data,
    user_sessions,
);
