use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata recorded for every accepted upload. The raw bytes live on disk
/// as `<resume_id>.<ext>`; this record is what the dashboard joins against
/// analysis results, so the association never has to be re-derived from
/// filenames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub resume_id: String,
    pub filename: String,
    pub size: usize,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}
