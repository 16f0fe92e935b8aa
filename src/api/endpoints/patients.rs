//! Patient login and record endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{is_valid_aadhaar, Patient, PatientUpdate};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientLoginRequest {
    pub aadhaar_number: String,
    pub patient_name: String,
}

/// Identity payload echoed back on login.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientIdentity {
    pub aadhaar_number: String,
    pub patient_name: String,
}

#[derive(Serialize)]
pub struct PatientLoginResponse {
    pub success: bool,
    pub patient: PatientIdentity,
}

#[derive(Serialize)]
pub struct PatientResponse {
    pub success: bool,
    pub patient: Patient,
}

#[derive(Serialize)]
pub struct UpdatedResponse {
    pub success: bool,
}

/// `POST /api/patients/login` — register-or-lookup by Aadhaar number and
/// echo the submitted identity back.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(payload): Json<PatientLoginRequest>,
) -> Result<Json<PatientLoginResponse>, ApiError> {
    if !is_valid_aadhaar(&payload.aadhaar_number) {
        return Err(ApiError::BadRequest(
            "Aadhaar number must be exactly 12 digits".into(),
        ));
    }
    if payload.patient_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Patient name is required".into()));
    }

    let conn = ctx.conn()?;
    repository::find_or_create_patient(&conn, &payload.aadhaar_number, &payload.patient_name)
        .map_err(|e| ApiError::internal("Login failed", e))?;

    tracing::info!(aadhaar = %payload.aadhaar_number, "Patient logged in");

    Ok(Json(PatientLoginResponse {
        success: true,
        patient: PatientIdentity {
            aadhaar_number: payload.aadhaar_number,
            patient_name: payload.patient_name,
        },
    }))
}

/// `GET /api/patients/:aadhaar` — fetch a patient's full record.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(aadhaar): Path<String>,
) -> Result<Json<PatientResponse>, ApiError> {
    if !is_valid_aadhaar(&aadhaar) {
        return Err(ApiError::BadRequest(
            "Aadhaar number must be exactly 12 digits".into(),
        ));
    }

    let conn = ctx.conn()?;
    let patient = repository::find_patient_by_aadhaar(&conn, &aadhaar)
        .map_err(|e| ApiError::internal("Failed to fetch patient", e))?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    Ok(Json(PatientResponse {
        success: true,
        patient,
    }))
}

/// `PUT /api/patients/:aadhaar` — partial update of a patient record.
/// Absent body fields keep their stored values.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(aadhaar): Path<String>,
    Json(payload): Json<PatientUpdate>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    if !is_valid_aadhaar(&aadhaar) {
        return Err(ApiError::BadRequest(
            "Aadhaar number must be exactly 12 digits".into(),
        ));
    }
    if let Some(name) = &payload.patient_name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest("Patient name cannot be empty".into()));
        }
    }

    let conn = ctx.conn()?;
    let changed = repository::update_patient(&conn, &aadhaar, &payload)
        .map_err(|e| ApiError::internal("Failed to update patient", e))?;

    if !changed {
        return Err(ApiError::NotFound("Patient not found".into()));
    }

    Ok(Json(UpdatedResponse { success: true }))
}
