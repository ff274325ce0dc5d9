// Resume analysis pipeline: extract text, ask the model for a structured
// review, normalize the score, persist the result.
// All LLM calls go through llm_client — no direct OpenAI calls here.

pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod scoring;
