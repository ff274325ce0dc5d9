//! Resume Store — the single persistence seam for the service.
//!
//! Handlers never touch the JSON files directly; they go through the
//! `ResumeStore` trait carried in `AppState` as `Arc<dyn ResumeStore>`, so
//! the flat-file backend can be swapped for a real database without touching
//! handler code.
//!
//! The JSON-file backend rewrites a whole document on every mutation. Those
//! read-modify-write cycles are serialized by an in-process async mutex, so
//! concurrent requests within one server cannot lose each other's updates.
//! Contract note: the lock does not reach across processes; two server
//! instances sharing the same data directory are still last-writer-wins.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::models::analysis::{AnalysisResult, DashboardStats};
use crate::models::upload::UploadRecord;

const ANALYSIS_FILE: &str = "analysis-results.json";
const UPLOADS_FILE: &str = "uploads.json";

/// Storage capability injected into `AppState`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Appends an upload record.
    async fn record_upload(&self, record: UploadRecord) -> Result<()>;

    /// All upload records, oldest first. Empty if nothing was uploaded yet.
    async fn uploads(&self) -> Result<Vec<UploadRecord>>;

    /// Upserts by resume id: a later analysis replaces the earlier record.
    async fn save(&self, result: AnalysisResult) -> Result<()>;

    async fn get_one(&self, resume_id: &str) -> Result<Option<AnalysisResult>>;

    async fn get_all(&self) -> Result<Vec<AnalysisResult>>;

    /// Dashboard aggregates from upload records joined with stored results.
    async fn stats(&self) -> Result<DashboardStats>;
}

// ────────────────────────────────────────────────────────────────────────────
// JSON-file backend
// ────────────────────────────────────────────────────────────────────────────

/// Flat-file store: one JSON array per document under `data_dir`.
pub struct JsonFileStore {
    data_dir: PathBuf,
    /// Serializes every read-modify-write cycle within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn analysis_path(&self) -> PathBuf {
        self.data_dir.join(ANALYSIS_FILE)
    }

    fn uploads_path(&self) -> PathBuf {
        self.data_dir.join(UPLOADS_FILE)
    }

    async fn write_document<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| format!("creating data directory {}", self.data_dir.display()))?;
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// Reads a whole JSON array document. An absent or corrupt file reads as
/// empty rather than failing the request.
async fn read_document<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&data) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("{} is not a valid JSON array ({e}), treating as empty", path.display());
            Vec::new()
        }
    }
}

#[async_trait]
impl ResumeStore for JsonFileStore {
    async fn record_upload(&self, record: UploadRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records: Vec<UploadRecord> = read_document(&self.uploads_path()).await;
        records.push(record);
        self.write_document(&self.uploads_path(), &records).await
    }

    async fn uploads(&self) -> Result<Vec<UploadRecord>> {
        Ok(read_document(&self.uploads_path()).await)
    }

    async fn save(&self, result: AnalysisResult) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut results: Vec<AnalysisResult> = read_document(&self.analysis_path()).await;
        match results.iter_mut().find(|r| r.resume_id == result.resume_id) {
            Some(existing) => *existing = result,
            None => results.push(result),
        }
        self.write_document(&self.analysis_path(), &results).await
    }

    async fn get_one(&self, resume_id: &str) -> Result<Option<AnalysisResult>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .find(|r| r.resume_id == resume_id))
    }

    async fn get_all(&self) -> Result<Vec<AnalysisResult>> {
        Ok(read_document(&self.analysis_path()).await)
    }

    async fn stats(&self) -> Result<DashboardStats> {
        let results = self.get_all().await?;
        let total_resumes = self.uploads().await?.len();

        let analyzed_resumes = results
            .iter()
            .filter(|r| !r.analysis.is_null() && r.score > 0)
            .count();
        let average_score = if analyzed_resumes > 0 {
            let sum: u32 = results.iter().map(|r| r.score).sum();
            (f64::from(sum) / analyzed_resumes as f64).round() as u32
        } else {
            0
        };

        Ok(DashboardStats {
            total_resumes,
            analyzed_resumes,
            average_score,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_result(resume_id: &str, score: u32) -> AnalysisResult {
        AnalysisResult {
            resume_id: resume_id.to_string(),
            analysis: json!({"skills": ["rust"], "score": score}),
            extracted_text: "some resume text".to_string(),
            timestamp: Utc::now(),
            score,
        }
    }

    fn make_upload(resume_id: &str) -> UploadRecord {
        UploadRecord {
            resume_id: resume_id.to_string(),
            filename: format!("{resume_id}.pdf"),
            size: 1024,
            mime_type: "application/pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_all_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ANALYSIS_FILE), "not json {").unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_get_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save(make_result("abc", 70)).await.unwrap();

        let found = store.get_one("abc").await.unwrap().unwrap();
        assert_eq!(found.score, 70);
        assert!(store.get_one("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_upserts_by_resume_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save(make_result("abc", 40)).await.unwrap();
        store.save(make_result("abc", 75)).await.unwrap();
        store.save(make_result("xyz", 90)).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        let abc = store.get_one("abc").await.unwrap().unwrap();
        assert_eq!(abc.score, 75, "last save wins");
    }

    #[tokio::test]
    async fn test_upload_records_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.record_upload(make_upload("a")).await.unwrap();
        store.record_upload(make_upload("b")).await.unwrap();

        let uploads = store.uploads().await.unwrap();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].resume_id, "a");
        assert_eq!(uploads[1].filename, "b.pdf");
    }

    #[tokio::test]
    async fn test_stats_average_over_analyzed_count() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        for id in ["a", "b", "c"] {
            store.record_upload(make_upload(id)).await.unwrap();
        }
        store.save(make_result("a", 80)).await.unwrap();
        store.save(make_result("b", 90)).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_resumes, 3);
        assert_eq!(stats.analyzed_resumes, 2);
        assert_eq!(stats.average_score, 85);
    }

    #[tokio::test]
    async fn test_stats_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_resumes, 0);
        assert_eq!(stats.analyzed_resumes, 0);
        assert_eq!(stats.average_score, 0);
    }

    #[tokio::test]
    async fn test_zero_score_not_counted_as_analyzed() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.record_upload(make_upload("a")).await.unwrap();
        store.save(make_result("a", 0)).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.analyzed_resumes, 0);
        assert_eq!(stats.average_score, 0);
    }
}
