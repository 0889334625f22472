// Job description generation.
// All LLM calls go through llm_client, no direct provider calls here.

pub mod handlers;
pub mod job_description;
pub mod prompts;
