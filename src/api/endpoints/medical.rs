//! Medical-authority login and patient roster endpoints.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Patient;

#[derive(Deserialize)]
pub struct MedicalLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct MedicalIdentity {
    pub email: String,
}

#[derive(Serialize)]
pub struct MedicalLoginResponse {
    pub success: bool,
    pub medical: MedicalIdentity,
}

#[derive(Serialize)]
pub struct PatientListResponse {
    pub success: bool,
    pub patients: Vec<Patient>,
}

/// `POST /api/medical/login` — register-or-lookup a professional by email.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(payload): Json<MedicalLoginRequest>,
) -> Result<Json<MedicalLoginResponse>, ApiError> {
    let email = payload.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("A valid email is required".into()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".into()));
    }

    let conn = ctx.conn()?;
    let professional = repository::find_or_create_professional(&conn, email)
        .map_err(|e| ApiError::internal("Login failed", e))?;

    tracing::info!(email = %professional.email, "Medical authority logged in");

    Ok(Json(MedicalLoginResponse {
        success: true,
        medical: MedicalIdentity {
            email: professional.email,
        },
    }))
}

/// `GET /api/medical/patients` — full patient roster for the
/// medical-authority dashboard.
pub async fn patients(
    State(ctx): State<ApiContext>,
) -> Result<Json<PatientListResponse>, ApiError> {
    let conn = ctx.conn()?;
    let patients = repository::list_patients(&conn)
        .map_err(|e| ApiError::internal("Failed to fetch patients", e))?;

    Ok(Json(PatientListResponse {
        success: true,
        patients,
    }))
}
