//! Report upload and retrieval endpoints.
//!
//! Uploads arrive as multipart form data: text fields identifying the
//! patient and report, plus a single `file` part. File type is checked
//! by magic bytes, never by extension or the Content-Type header.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{is_valid_aadhaar, MedicalReport, NewReport};

/// Maximum report file size (10 MB, matching the upload form's limit).
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_MIME_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ReportListResponse {
    pub success: bool,
    pub reports: Vec<MedicalReport>,
}

#[derive(Default)]
struct UploadForm {
    aadhaar_number: String,
    report_type: String,
    report_date: String,
    notes: Option<String>,
    uploaded_by: Option<String>,
    file: Option<(String, Vec<u8>)>,
}

async fn collect_form(multipart: &mut Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "aadhaarNumber" => form.aadhaar_number = field.text().await.unwrap_or_default(),
            "reportType" => form.report_type = field.text().await.unwrap_or_default(),
            "reportDate" => form.report_date = field.text().await.unwrap_or_default(),
            "notes" => form.notes = Some(field.text().await.unwrap_or_default()),
            "uploadedBy" => form.uploaded_by = Some(field.text().await.unwrap_or_default()),
            "file" => {
                let filename = field.file_name().unwrap_or("document").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {e}")))?;
                form.file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(form)
}

/// `POST /api/reports/upload` — store a report file and its metadata.
pub async fn upload(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let form = collect_form(&mut multipart).await?;

    if !is_valid_aadhaar(&form.aadhaar_number) {
        return Err(ApiError::BadRequest(
            "Aadhaar number must be exactly 12 digits".into(),
        ));
    }
    if form.report_type.trim().is_empty() {
        return Err(ApiError::BadRequest("Report type is required".into()));
    }
    let report_date = NaiveDate::parse_from_str(&form.report_date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Report date must be YYYY-MM-DD".into()))?;

    let (filename, bytes) = form
        .file
        .ok_or_else(|| ApiError::BadRequest("No file provided".into()))?;

    if bytes.len() > MAX_FILE_BYTES {
        return Err(ApiError::BadRequest(format!(
            "File too large. Maximum {}MB",
            MAX_FILE_BYTES / (1024 * 1024)
        )));
    }

    let detected_mime = detect_mime_from_bytes(&bytes);
    if !ALLOWED_MIME_TYPES.contains(&detected_mime.as_str()) {
        return Err(ApiError::BadRequest(
            "File type not supported. Please upload a PDF, JPEG, or PNG".into(),
        ));
    }

    // A report must reference an existing patient.
    let (patient_id, uploaded_by) = {
        let conn = ctx.conn()?;
        let patient = repository::find_patient_by_aadhaar(&conn, &form.aadhaar_number)
            .map_err(|e| ApiError::internal("Upload failed", e))?
            .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

        let uploaded_by = match form.uploaded_by.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => Some(
                repository::find_or_create_professional(&conn, email)
                    .map_err(|e| ApiError::internal("Upload failed", e))?
                    .id,
            ),
            _ => None,
        };

        (patient.id, uploaded_by)
    };

    // Stage the file under a UUID prefix so stored names never collide.
    let safe_filename = sanitize_filename(&filename);
    let stored_name = format!("{}_{}", Uuid::new_v4(), safe_filename);

    std::fs::create_dir_all(&ctx.uploads_dir)
        .map_err(|e| ApiError::internal("Upload failed", e))?;
    std::fs::write(ctx.uploads_dir.join(&stored_name), &bytes)
        .map_err(|e| ApiError::internal("Upload failed", e))?;

    {
        let conn = ctx.conn()?;
        repository::insert_report(
            &conn,
            &NewReport {
                patient_id,
                report_type: form.report_type,
                report_date,
                file_url: Some(format!("/uploads/{stored_name}")),
                file_name: Some(safe_filename.clone()),
                uploaded_by,
                notes: form.notes.filter(|n| !n.trim().is_empty()),
            },
        )
        .map_err(|e| ApiError::internal("Upload failed", e))?;
    }

    tracing::info!(
        filename = %safe_filename,
        size = bytes.len(),
        mime = %detected_mime,
        "Report file received"
    );

    Ok(Json(UploadResponse {
        success: true,
        message: "Report uploaded",
    }))
}

/// `GET /api/reports/patient/:aadhaar` — every report on file for a patient.
pub async fn patient_reports(
    State(ctx): State<ApiContext>,
    Path(aadhaar): Path<String>,
) -> Result<Json<ReportListResponse>, ApiError> {
    if !is_valid_aadhaar(&aadhaar) {
        return Err(ApiError::BadRequest(
            "Aadhaar number must be exactly 12 digits".into(),
        ));
    }

    let conn = ctx.conn()?;
    let patient = repository::find_patient_by_aadhaar(&conn, &aadhaar)
        .map_err(|e| ApiError::internal("Failed to fetch reports", e))?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    let reports = repository::reports_for_patient(&conn, patient.id)
        .map_err(|e| ApiError::internal("Failed to fetch reports", e))?;

    Ok(Json(ReportListResponse {
        success: true,
        reports,
    }))
}

/// Detect MIME type from file magic bytes (not extension or Content-Type header).
pub fn detect_mime_from_bytes(bytes: &[u8]) -> String {
    if bytes.len() < 4 {
        return "application/octet-stream".into();
    }

    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg".into();
    }
    // PNG: 89 50 4E 47
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return "image/png".into();
    }
    // PDF: %PDF
    if bytes.starts_with(b"%PDF") {
        return "application/pdf".into();
    }

    "application/octet-stream".into()
}

/// Sanitize a filename — removes path traversal and special characters.
pub fn sanitize_filename(name: &str) -> String {
    // Remove path separators and null bytes, replace other special chars
    let sanitized: String = name
        .chars()
        .filter(|&c| c != '/' && c != '\\' && c != '\0')
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Remove consecutive dots (path traversal prevention)
    let sanitized = sanitized.replace("..", "");

    // Truncate to at most 100 bytes, backing up to a char boundary so
    // multibyte names never split mid-character
    let sanitized = if sanitized.len() > 100 {
        let mut end = 100;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    if sanitized.is_empty() {
        "document".into()
    } else {
        sanitized
    }
}
