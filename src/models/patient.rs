use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered patient. Identity is the 12-digit Aadhaar number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub aadhaar_number: String,
    pub patient_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Partial update applied to an existing patient record.
/// Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    pub patient_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Validate an Aadhaar number: exactly 12 ASCII digits.
pub fn is_valid_aadhaar(aadhaar: &str) -> bool {
    aadhaar.len() == 12 && aadhaar.bytes().all(|b| b.is_ascii_digit())
}
