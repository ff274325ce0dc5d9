//! Axum route handler for the analysis pipeline.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::analysis::extract::{extract_text, find_resume_file};
use crate::analysis::prompts::RESUME_ANALYSIS_PROMPT_TEMPLATE;
use crate::analysis::scoring::normalize_score;
use crate::errors::AppError;
use crate::llm_client::{extract_json_object, prompts::JSON_ONLY_SYSTEM};
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

/// Response echo of the extracted text is capped at this many characters.
const EXTRACT_ECHO_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub resume_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub resume_id: String,
    pub analysis: Value,
    pub extracted_text: String,
}

/// POST /api/analyze
///
/// Full pipeline: locate upload → extract text → one LLM completion →
/// parse + score normalization → persist. A storage failure is logged and
/// swallowed so the caller still receives the computed analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let resume_id = request
        .resume_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Resume ID is required".to_string()))?;

    // Refuse before doing any extraction work.
    let llm = state.llm.as_ref().ok_or_else(|| {
        AppError::Misconfigured(
            "OpenAI API key not configured. Please set OPENAI_API_KEY.".to_string(),
        )
    })?;

    let (path, format) = find_resume_file(&state.config.upload_dir, &resume_id)
        .await
        .ok_or_else(|| AppError::NotFound("Resume file not found".to_string()))?;

    let text = extract_text(&path, format).await?;
    debug!("analyzing {resume_id}: {} chars extracted", text.len());

    let prompt = RESUME_ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", &text);
    let raw = llm
        .complete(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("completion request failed: {e}")))?;

    let json_span = extract_json_object(&raw).ok_or(AppError::UnparsableResponse)?;
    let mut analysis: Value =
        serde_json::from_str(json_span).map_err(|_| AppError::UnparsableResponse)?;

    let score = normalize_score(&analysis, text.chars().count());
    if let Some(obj) = analysis.as_object_mut() {
        obj.insert("score".to_string(), score.into());
    }
    debug!("normalized score for {resume_id}: {score}");

    let result = AnalysisResult {
        resume_id: resume_id.clone(),
        analysis: analysis.clone(),
        extracted_text: text.clone(),
        timestamp: Utc::now(),
        score,
    };
    if let Err(e) = state.store.save(result).await {
        // The computed analysis is still returned to the caller.
        error!("failed to save analysis result for {resume_id}: {e:?}");
    }

    Ok(Json(AnalyzeResponse {
        resume_id,
        analysis,
        extracted_text: truncate_chars(&text, EXTRACT_ECHO_CHARS),
    }))
}

/// Takes the first `limit` characters and appends an ellipsis marker.
fn truncate_chars(text: &str, limit: usize) -> String {
    let truncated: String = text.chars().take(limit).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_caps_at_limit() {
        let long = "x".repeat(800);
        let out = truncate_chars(&long, 500);
        assert_eq!(out.chars().count(), 503);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "héllo wörld".repeat(100);
        let out = truncate_chars(&text, 500);
        assert_eq!(out.chars().count(), 503);
    }

    #[test]
    fn test_truncate_short_text_keeps_marker() {
        assert_eq!(truncate_chars("short", 500), "short...");
    }
}
