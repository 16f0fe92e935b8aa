//! Medical history endpoints.

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{is_valid_aadhaar, MedicalHistory};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHistoryRequest {
    pub aadhaar_number: String,
    pub condition: String,
    pub diagnosed_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct RecordedResponse {
    pub success: bool,
}

#[derive(Serialize)]
pub struct HistoryListResponse {
    pub success: bool,
    pub history: Vec<MedicalHistory>,
}

/// `POST /api/history` — record a diagnosed condition for a patient.
pub async fn record(
    State(ctx): State<ApiContext>,
    Json(payload): Json<RecordHistoryRequest>,
) -> Result<Json<RecordedResponse>, ApiError> {
    if !is_valid_aadhaar(&payload.aadhaar_number) {
        return Err(ApiError::BadRequest(
            "Aadhaar number must be exactly 12 digits".into(),
        ));
    }
    if payload.condition.trim().is_empty() {
        return Err(ApiError::BadRequest("Condition is required".into()));
    }

    let conn = ctx.conn()?;
    let patient = repository::find_patient_by_aadhaar(&conn, &payload.aadhaar_number)
        .map_err(|e| ApiError::internal("Failed to record history", e))?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    repository::insert_history(
        &conn,
        patient.id,
        payload.condition.trim(),
        payload.diagnosed_date,
        payload.status.as_deref(),
        payload.notes.as_deref(),
    )
    .map_err(|e| ApiError::internal("Failed to record history", e))?;

    Ok(Json(RecordedResponse { success: true }))
}

/// `GET /api/history/patient/:aadhaar` — a patient's recorded conditions.
pub async fn patient_history(
    State(ctx): State<ApiContext>,
    Path(aadhaar): Path<String>,
) -> Result<Json<HistoryListResponse>, ApiError> {
    if !is_valid_aadhaar(&aadhaar) {
        return Err(ApiError::BadRequest(
            "Aadhaar number must be exactly 12 digits".into(),
        ));
    }

    let conn = ctx.conn()?;
    let patient = repository::find_patient_by_aadhaar(&conn, &aadhaar)
        .map_err(|e| ApiError::internal("Failed to fetch history", e))?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    let history = repository::history_for_patient(&conn, patient.id)
        .map_err(|e| ApiError::internal("Failed to fetch history", e))?;

    Ok(Json(HistoryListResponse {
        success: true,
        history,
    }))
}
