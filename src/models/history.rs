use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A diagnosed condition in a patient's medical history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    pub id: i64,
    pub patient_id: i64,
    pub condition: String,
    pub diagnosed_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}
