use serde::{Deserialize, Serialize};

/// A medical authority (healthcare professional). Identity is the email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
    pub hospital_name: Option<String>,
    pub phone_number: Option<String>,
}
