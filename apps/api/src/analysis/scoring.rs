//! Score normalization — the only non-trivial logic in the pipeline.
//!
//! The model is asked for a numeric `score`, but its output is not trusted:
//! it may echo the prompt's placeholder back, wrap the number in prose, or
//! omit the field entirely. `normalize_score` repairs every case
//! deterministically except the true dead end, where a random fallback
//! keeps the record usable. The content-based formula lives in
//! `fallback_score` so it stays testable on its own.

use rand::Rng;
use serde_json::Value;

const SCORE_FLOOR: u32 = 20;
const SCORE_CEIL: u32 = 100;

/// Placeholder markers the model sometimes echoes back from the prompt's
/// schema example instead of computing a score.
fn is_placeholder(score: &str) -> bool {
    score.contains("CALCULATE_THIS") || score.contains("DYNAMIC_SCORE")
}

/// Coerces whatever the model put in `score` into an integer in 0..=100.
///
/// - numeric → accepted, clamped into range
/// - placeholder string → content-based fallback formula
/// - other string → first decimal digit run, clamped
/// - anything else (missing, null, array, …) → fallback formula
/// - string with no digits at all → uniform random in 60..=100
pub fn normalize_score(analysis: &Value, extracted_chars: usize) -> u32 {
    match analysis.get("score") {
        Some(Value::Number(n)) => {
            let raw = n.as_f64().unwrap_or(0.0);
            raw.round().clamp(0.0, 100.0) as u32
        }
        Some(Value::String(s)) if is_placeholder(s) => fallback_score(analysis, extracted_chars),
        Some(Value::String(s)) => match first_digit_run(s) {
            Some(n) => n.min(u64::from(SCORE_CEIL)) as u32,
            None => rand::rng().random_range(60..=100),
        },
        _ => fallback_score(analysis, extracted_chars),
    }
}

/// Content-based score for analyses where the model returned a placeholder:
/// skills and keywords dominate, with bonuses for text length and for
/// experience/education fields that read like real summaries.
pub fn fallback_score(analysis: &Value, extracted_chars: usize) -> u32 {
    let skills = array_len(analysis, "skills");
    let keywords = array_len(analysis, "keywords");

    let length_bonus = if extracted_chars > 2000 {
        25
    } else if extracted_chars > 1000 {
        15
    } else {
        5
    };

    let experience = field_text(analysis, "experience");
    let experience_bonus = if experience.contains("year") || experience.contains("experience") {
        20
    } else {
        10
    };

    let education = field_text(analysis, "education");
    let education_bonus = if education.contains("degree") || education.contains("certification") {
        15
    } else {
        5
    };

    (skills * 3 + keywords * 2 + length_bonus + experience_bonus + education_bonus)
        .clamp(SCORE_FLOOR, SCORE_CEIL)
}

fn array_len(analysis: &Value, field: &str) -> u32 {
    analysis
        .get(field)
        .and_then(Value::as_array)
        .map(|a| a.len() as u32)
        .unwrap_or(0)
}

fn field_text<'a>(analysis: &'a Value, field: &str) -> &'a str {
    analysis.get(field).and_then(Value::as_str).unwrap_or("")
}

/// Parses the first run of decimal digits, e.g. "72 out of 100" → 72.
fn first_digit_run(s: &str) -> Option<u64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
