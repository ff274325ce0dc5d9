//! Axum route handler for resume uploads.

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::upload::UploadRecord;
use crate::state::AppState;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub resume_id: String,
    pub filename: String,
    pub size: usize,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// POST /api/upload
///
/// Accepts one file in the multipart field `resume`, validates type and
/// size, stores the bytes as `<id>.<ext>` and records the upload.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        let mime_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file field: {e}")))?;
        file = Some((mime_type, data));
    }

    let (mime_type, data) =
        file.ok_or_else(|| AppError::Validation("No file received.".to_string()))?;
    let ext = validate_upload(&mime_type, data.len())?;

    let resume_id = Uuid::new_v4().to_string();
    let filename = format!("{resume_id}.{ext}");

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "creating upload directory {}",
                state.config.upload_dir.display()
            )
        })?;
    let path = state.config.upload_dir.join(&filename);
    tokio::fs::write(&path, &data)
        .await
        .with_context(|| format!("writing upload to {}", path.display()))?;

    info!("stored upload {filename} ({} bytes)", data.len());

    state
        .store
        .record_upload(UploadRecord {
            resume_id: resume_id.clone(),
            filename: filename.clone(),
            size: data.len(),
            mime_type: mime_type.clone(),
            uploaded_at: Utc::now(),
        })
        .await?;

    Ok(Json(UploadResponse {
        resume_id,
        filename,
        size: data.len(),
        mime_type,
    }))
}

/// Returns the storage extension for an accepted upload, or the validation
/// error to surface. MIME types are matched exactly.
fn validate_upload(mime_type: &str, size: usize) -> Result<&'static str, AppError> {
    let ext = match mime_type {
        PDF_MIME => "pdf",
        DOCX_MIME => "docx",
        _ => {
            return Err(AppError::Validation(
                "Invalid file type. Only PDF and DOCX are allowed.".to_string(),
            ))
        }
    };
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(
            "File size too large. Maximum 10MB allowed.".to_string(),
        ));
    }
    Ok(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_mime_maps_to_pdf_extension() {
        assert_eq!(validate_upload(PDF_MIME, 1024).unwrap(), "pdf");
    }

    #[test]
    fn test_docx_mime_maps_to_docx_extension() {
        assert_eq!(validate_upload(DOCX_MIME, 1024).unwrap(), "docx");
    }

    #[test]
    fn test_unknown_mime_is_rejected() {
        let err = validate_upload("image/png", 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_plain_doc_mime_is_rejected() {
        // Legacy .doc is not in the accepted set.
        assert!(validate_upload("application/msword", 1024).is_err());
    }

    #[test]
    fn test_size_at_limit_is_accepted() {
        assert!(validate_upload(PDF_MIME, MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_size_over_limit_is_rejected() {
        let err = validate_upload(PDF_MIME, MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
