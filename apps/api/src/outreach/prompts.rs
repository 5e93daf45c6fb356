// All LLM prompt constants for the outreach pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Job extraction prompt template. Replace `{page_text}` before sending.
pub const JOB_EXTRACT_PROMPT_TEMPLATE: &str = r#"### SCRAPED TEXT FROM WEBSITE:
{page_text}

### INSTRUCTION:
The scraped text is from the careers page of a website.
Extract every job posting it contains and return them as a JSON ARRAY:
[
  {
    "role": "Senior Data Engineer",
    "experience": "5+ years",
    "skills": ["Python", "SQL", "Airflow"],
    "description": "Build and operate the batch data platform."
  }
]

Rules:
- "role" is the job title exactly as written on the page.
- "experience" is the required experience as written, or null when not stated.
- "skills" is a list of individual technologies or skills, one per string.
- "description" is a one or two sentence summary of the job.
- If the page lists no jobs, return [].

### VALID JSON (NO PREAMBLE):"#;

/// System prompt for the cold email writer.
/// Replace: {sender_name}, {sender_company}
pub const EMAIL_SYSTEM_TEMPLATE: &str = "You are {sender_name}, a business development \
    executive at {sender_company}. You write short, specific, persuasive cold emails \
    to hiring teams. You never invent facts about the client or about {sender_company}.";

/// Cold email prompt template.
/// Replace: {job_json}, {sender_name}, {sender_company}, {sender_pitch},
///          {links_section}, {no_preamble}
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"### JOB DESCRIPTION:
{job_json}

### INSTRUCTION:
You are {sender_name}, a business development executive at {sender_company}.
{sender_company} is {sender_pitch}

Write a cold email to the client about the job above, describing how
{sender_company} can fulfil their needs.

{links_section}

Remember you are {sender_name}, BDE at {sender_company}.
{no_preamble}

### EMAIL (NO PREAMBLE):"#;

/// Used when portfolio links matched the job. Replace `{links}`.
pub const LINKS_SECTION_TEMPLATE: &str = "Showcase the portfolio by adding the most relevant \
    of these links to the email, and do not add any other links:\n{links}";

/// Used when no portfolio link matched the job.
pub const NO_LINKS_SECTION: &str =
    "No portfolio links match this job. Do NOT include any portfolio links in the email.";
