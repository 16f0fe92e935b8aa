use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::{MedicalReport, NewReport};

fn row_to_report(row: &Row) -> rusqlite::Result<MedicalReport> {
    let raw_date: String = row.get(3)?;
    let report_date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(MedicalReport {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        report_type: row.get(2)?,
        report_date,
        file_url: row.get(4)?,
        file_name: row.get(5)?,
        uploaded_by: row.get(6)?,
        notes: row.get(7)?,
    })
}

/// Insert a report row and return its id.
pub fn insert_report(conn: &Connection, report: &NewReport) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO reports (patient_id, report_type, report_date, file_url, file_name, uploaded_by, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            report.patient_id,
            report.report_type,
            report.report_date.to_string(),
            report.file_url,
            report.file_name,
            report.uploaded_by,
            report.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// List every report on file for a patient, newest report date first.
pub fn reports_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<MedicalReport>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, report_type, report_date, file_url, file_name, uploaded_by, notes
         FROM reports WHERE patient_id = ?1
         ORDER BY report_date DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![patient_id], row_to_report)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
