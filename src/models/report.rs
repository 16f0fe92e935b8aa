use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A medical report on file for a patient. The document itself lives in
/// the uploads directory; `file_url` is the path the static file server
/// exposes it under.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalReport {
    pub id: i64,
    pub patient_id: i64,
    pub report_type: String,
    pub report_date: NaiveDate,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub uploaded_by: Option<i64>,
    pub notes: Option<String>,
}

/// Fields required to insert a new report row. The id is assigned by
/// the database.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub patient_id: i64,
    pub report_type: String,
    pub report_date: NaiveDate,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub uploaded_by: Option<i64>,
    pub notes: Option<String>,
}
