use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One job listing as extracted from page text. Ephemeral — never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub role: String,
    pub experience: Option<String>,
    pub skills: Vec<String>,
    pub description: String,
}

/// Jobs found on a page, keyed by the normalised page URL.
#[derive(Debug, Clone, Serialize)]
pub struct JobPreview {
    pub url: String,
    pub jobs: Vec<JobPosting>,
}

/// Generated outreach email for one job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub body: String,
}

/// Who the emails are written as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderProfile {
    pub name: String,
    pub company: String,
    /// One or two sentences describing what the company does.
    pub pitch: String,
}

/// Result of drafting for one job. A failure here never aborts the other jobs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DraftOutcome {
    Drafted { email: EmailDraft },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct JobEmail {
    pub id: Uuid,
    pub job: JobPosting,
    pub portfolio_links: Vec<String>,
    pub outcome: DraftOutcome,
}

impl JobEmail {
    pub fn draft(&self) -> Option<&EmailDraft> {
        match &self.outcome {
            DraftOutcome::Drafted { email } => Some(email),
            DraftOutcome::Failed { .. } => None,
        }
    }
}

/// Everything one pipeline run produced for a URL, one entry per extracted job.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub url: String,
    pub generated_at: DateTime<Utc>,
    pub emails: Vec<JobEmail>,
}

impl GenerationReport {
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            generated_at: Utc::now(),
            emails: Vec::new(),
        }
    }

    pub fn drafts(&self) -> impl Iterator<Item = &EmailDraft> {
        self.emails.iter().filter_map(JobEmail::draft)
    }

    pub fn failed_count(&self) -> usize {
        self.emails.iter().filter(|e| e.draft().is_none()).count()
    }
}
