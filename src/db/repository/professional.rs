use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::Professional;

fn row_to_professional(row: &Row) -> rusqlite::Result<Professional> {
    Ok(Professional {
        id: row.get(0)?,
        email: row.get(1)?,
        full_name: row.get(2)?,
        specialization: row.get(3)?,
        license_number: row.get(4)?,
        hospital_name: row.get(5)?,
        phone_number: row.get(6)?,
    })
}

/// Look up a professional by email.
pub fn find_professional_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<Professional>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, email, full_name, specialization, license_number, hospital_name, phone_number
         FROM professionals WHERE email = ?1 LIMIT 1",
    )?;

    match stmt.query_row(params![email], row_to_professional) {
        Ok(prof) => Ok(Some(prof)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find the professional with this email, registering a new row on
/// first login. The UNIQUE constraint on email keeps this idempotent.
pub fn find_or_create_professional(
    conn: &Connection,
    email: &str,
) -> Result<Professional, DatabaseError> {
    if let Some(prof) = find_professional_by_email(conn, email)? {
        return Ok(prof);
    }

    conn.execute(
        "INSERT INTO professionals (email) VALUES (?1)",
        params![email],
    )?;

    find_professional_by_email(conn, email)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "professional".into(),
        id: email.into(),
    })
}
