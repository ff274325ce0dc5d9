// Prompt constants for the analysis module.
// Reuses the cross-cutting JSON-only fragment from llm_client::prompts.

/// Resume analysis prompt template. Replace `{resume_text}` before sending.
///
/// The schema example deliberately carries a placeholder in the score field;
/// models occasionally echo it back verbatim, which is exactly what
/// `scoring::normalize_score` exists to repair.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and provide a structured analysis:

RESUME TEXT:
{resume_text}

CRITICAL: You MUST calculate a DYNAMIC score based on the actual resume quality. DO NOT use any hardcoded or default scores.

Provide the analysis in the following JSON format:
{
  "skills": ["skill1", "skill2", ...],
  "experience": "years of experience summary",
  "education": "education summary",
  "strengths": ["strength1", "strength2", ...],
  "weaknesses": ["weakness1", "weakness2", ...],
  "improvements": ["improvement1", "improvement2", ...],
  "keywords": ["keyword1", "keyword2", ...],
  "score": "CALCULATE_THIS_BASED_ON_RESUME_QUALITY_0_TO_100"
}

MANDATORY SCORING INSTRUCTIONS:
- ANALYZE the actual resume content and CALCULATE a score from 0-100
- DO NOT use a default or hardcoded number
- Base the score on: skills quality, experience relevance, education level, formatting, ATS optimization
- Score guidelines:
  * 90-100: Excellent resume - strong relevant skills, good experience, well-formatted, ATS-friendly
  * 80-89: Good resume - solid content but could use minor improvements
  * 70-79: Fair resume - decent but needs work on structure or keywords
  * 60-69: Poor resume - significant gaps or formatting issues
  * 0-59: Very poor resume - major issues, needs complete rewrite

Focus the analysis on:
- Technical and soft skills relevance and specificity
- Work experience level and relevance to industry standards
- Education background and certifications quality
- Resume formatting, structure, and readability
- ATS-friendly keywords and optimization level
- Overall professional presentation and impact

REMEMBER: The score field should be a NUMBER between 0-100 calculated from this specific resume's quality.
"#;
