use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::MedicalHistory;

fn row_to_history(row: &Row) -> rusqlite::Result<MedicalHistory> {
    Ok(MedicalHistory {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        condition: row.get(2)?,
        diagnosed_date: row
            .get::<_, Option<String>>(3)?
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        status: row.get(4)?,
        notes: row.get(5)?,
    })
}

/// Record a condition in a patient's medical history.
pub fn insert_history(
    conn: &Connection,
    patient_id: i64,
    condition: &str,
    diagnosed_date: Option<NaiveDate>,
    status: Option<&str>,
    notes: Option<&str>,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO medical_history (patient_id, condition, diagnosed_date, status, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient_id,
            condition,
            diagnosed_date.map(|d| d.to_string()),
            status,
            notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// List a patient's history entries, most recent diagnosis first.
pub fn history_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<MedicalHistory>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, condition, diagnosed_date, status, notes
         FROM medical_history WHERE patient_id = ?1
         ORDER BY diagnosed_date DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![patient_id], row_to_history)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
