// CV analysis: raw CV text (inline or fetched from object storage) → structured ParsedCv.
// All LLM calls go through llm_client, no direct provider calls here.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
