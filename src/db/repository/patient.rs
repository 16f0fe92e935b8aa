use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::{Patient, PatientUpdate};

const PATIENT_COLUMNS: &str = "id, aadhaar_number, patient_name, date_of_birth, gender,
    phone_number, email, address, blood_group, emergency_contact";

fn row_to_patient(row: &Row) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        aadhaar_number: row.get(1)?,
        patient_name: row.get(2)?,
        date_of_birth: row
            .get::<_, Option<String>>(3)?
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        gender: row.get(4)?,
        phone_number: row.get(5)?,
        email: row.get(6)?,
        address: row.get(7)?,
        blood_group: row.get(8)?,
        emergency_contact: row.get(9)?,
    })
}

/// Look up a patient by Aadhaar number.
pub fn find_patient_by_aadhaar(
    conn: &Connection,
    aadhaar: &str,
) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE aadhaar_number = ?1 LIMIT 1"
    ))?;

    match stmt.query_row(params![aadhaar], row_to_patient) {
        Ok(patient) => Ok(Some(patient)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find the patient with this Aadhaar number, registering a new row on
/// first login.
pub fn find_or_create_patient(
    conn: &Connection,
    aadhaar: &str,
    name: &str,
) -> Result<Patient, DatabaseError> {
    if let Some(patient) = find_patient_by_aadhaar(conn, aadhaar)? {
        return Ok(patient);
    }

    conn.execute(
        "INSERT INTO patients (aadhaar_number, patient_name) VALUES (?1, ?2)",
        params![aadhaar, name],
    )?;

    find_patient_by_aadhaar(conn, aadhaar)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "patient".into(),
        id: aadhaar.into(),
    })
}

/// Apply a partial update to a patient row. Returns `true` if a row
/// matched the Aadhaar number.
pub fn update_patient(
    conn: &Connection,
    aadhaar: &str,
    update: &PatientUpdate,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients SET
             patient_name      = COALESCE(?2, patient_name),
             date_of_birth     = COALESCE(?3, date_of_birth),
             gender            = COALESCE(?4, gender),
             phone_number      = COALESCE(?5, phone_number),
             email             = COALESCE(?6, email),
             address           = COALESCE(?7, address),
             blood_group       = COALESCE(?8, blood_group),
             emergency_contact = COALESCE(?9, emergency_contact)
         WHERE aadhaar_number = ?1",
        params![
            aadhaar,
            update.patient_name,
            update.date_of_birth.map(|d| d.to_string()),
            update.gender,
            update.phone_number,
            update.email,
            update.address,
            update.blood_group,
            update.emergency_contact,
        ],
    )?;
    Ok(changed > 0)
}

/// List every registered patient, most recently registered first.
pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id DESC"
    ))?;

    let rows = stmt.query_map([], row_to_patient)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
