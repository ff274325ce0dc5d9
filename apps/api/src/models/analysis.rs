use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored analysis. At most one record per resume id exists in the store
/// at any time; re-analyzing overwrites the earlier record in place.
///
/// Field names are camelCase on disk and on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub resume_id: String,
    /// The parsed model output, kept unstructured. Shape is whatever the
    /// model returned after score normalization wrote the final score back.
    pub analysis: Value,
    pub extracted_text: String,
    pub timestamp: DateTime<Utc>,
    /// Normalized score, always an integer in 0..=100.
    pub score: u32,
}

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_resumes: usize,
    pub analyzed_resumes: usize,
    pub average_score: u32,
}
