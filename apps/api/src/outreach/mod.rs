// Outreach: careers page → job postings → portfolio-grounded cold emails.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod email_writer;
pub mod handlers;
pub mod job_extractor;
pub mod models;
pub mod pipeline;
pub mod prompts;
