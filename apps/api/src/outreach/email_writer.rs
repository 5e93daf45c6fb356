//! LLM Email Writer — drafts one cold email per job, grounded on matched portfolio links.

use thiserror::Error;

use crate::llm_client::prompts::NO_PREAMBLE_INSTRUCTION;
use crate::llm_client::{LanguageModel, LlmError};
use crate::outreach::models::{EmailDraft, JobPosting, SenderProfile};
use crate::outreach::prompts::{
    EMAIL_PROMPT_TEMPLATE, EMAIL_SYSTEM_TEMPLATE, LINKS_SECTION_TEMPLATE, NO_LINKS_SECTION,
};

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("email drafting call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model returned a blank email")]
    EmptyEmail,
}

pub async fn write_email(
    job: &JobPosting,
    links: &[String],
    sender: &SenderProfile,
    llm: &dyn LanguageModel,
) -> Result<EmailDraft, DraftError> {
    let prompt = build_email_prompt(job, links, sender);
    let system = EMAIL_SYSTEM_TEMPLATE
        .replace("{sender_name}", &sender.name)
        .replace("{sender_company}", &sender.company);

    let answer = llm.complete(&prompt, &system).await?;
    let body = answer.trim();
    if body.is_empty() {
        return Err(DraftError::EmptyEmail);
    }

    Ok(EmailDraft {
        body: body.to_string(),
    })
}

fn build_email_prompt(job: &JobPosting, links: &[String], sender: &SenderProfile) -> String {
    let job_json = serde_json::to_string_pretty(&serde_json::json!({
        "role": job.role,
        "experience": job.experience,
        "skills": job.skills,
        "description": job.description,
    }))
    .unwrap_or_else(|_| job.role.clone());

    let links_section = if links.is_empty() {
        NO_LINKS_SECTION.to_string()
    } else {
        let list = links
            .iter()
            .map(|l| format!("- {l}"))
            .collect::<Vec<_>>()
            .join("\n");
        LINKS_SECTION_TEMPLATE.replace("{links}", &list)
    };

    // Page-derived job text goes in last so it is never re-scanned for placeholders.
    EMAIL_PROMPT_TEMPLATE
        .replace("{links_section}", &links_section)
        .replace("{no_preamble}", NO_PREAMBLE_INSTRUCTION)
        .replace("{sender_pitch}", &sender.pitch)
        .replace("{sender_name}", &sender.name)
        .replace("{sender_company}", &sender.company)
        .replace("{job_json}", &job_json)
}
