//! Outreach pipeline — orchestrates one careers-page URL into cold email drafts.
//!
//! Flow: parse URL → fetch page → clean text → LLM extract jobs →
//!       for each job: match portfolio links → LLM draft email → report.
//!
//! Fetch and extraction failures abort the run. A draft failure is recorded
//! on its job and the loop carries on, so one bad job never discards the
//! emails already written for the others. Nothing is retried.

use reqwest::Url;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::llm_client::LanguageModel;
use crate::outreach::email_writer::write_email;
use crate::outreach::job_extractor::{extract_jobs, ExtractionError};
use crate::outreach::models::{
    DraftOutcome, GenerationReport, JobEmail, JobPosting, JobPreview, SenderProfile,
};
use crate::portfolio::Portfolio;
use crate::scraping::cleaner::clean_text;
use crate::scraping::{parse_page_url, FetchError, PageFetcher};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Per-run knobs taken from configuration.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub sender: SenderProfile,
    pub max_page_chars: usize,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            sender: config.sender.clone(),
            max_page_chars: config.max_page_chars,
        }
    }
}

/// Runs the whole pipeline for `url`. The report holds one entry per extracted job.
pub async fn generate_emails(
    url: &str,
    fetcher: &dyn PageFetcher,
    llm: &dyn LanguageModel,
    portfolio: &Portfolio,
    settings: &PipelineSettings,
) -> Result<GenerationReport, PipelineError> {
    let url = parse_page_url(url)?;
    let jobs = scrape_page(&url, fetcher, llm, settings).await?;

    let mut report = GenerationReport::empty(url.as_str());

    for job in jobs {
        let portfolio_links = portfolio.query_links(&job.skills);

        let outcome = match write_email(&job, &portfolio_links, &settings.sender, llm).await {
            Ok(email) => DraftOutcome::Drafted { email },
            Err(e) => {
                warn!("Drafting failed for '{}' at {}: {}", job.role, url, e);
                DraftOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        report.emails.push(JobEmail {
            id: Uuid::new_v4(),
            job,
            portfolio_links,
            outcome,
        });
    }

    info!(
        "Generated {} drafts ({} failed) for {}",
        report.drafts().count(),
        report.failed_count(),
        url
    );

    Ok(report)
}

/// Fetch, clean and extract only. Used to preview what a page yields.
pub async fn scrape_jobs(
    url: &str,
    fetcher: &dyn PageFetcher,
    llm: &dyn LanguageModel,
    settings: &PipelineSettings,
) -> Result<JobPreview, PipelineError> {
    let url = parse_page_url(url)?;
    let jobs = scrape_page(&url, fetcher, llm, settings).await?;
    Ok(JobPreview {
        url: url.to_string(),
        jobs,
    })
}

async fn scrape_page(
    url: &Url,
    fetcher: &dyn PageFetcher,
    llm: &dyn LanguageModel,
    settings: &PipelineSettings,
) -> Result<Vec<JobPosting>, PipelineError> {
    let raw = fetcher.fetch(url).await?;
    let text = clean_text(&raw);

    if text.is_empty() {
        warn!("{url} has no readable text; treating it as a page without listings");
        return Ok(Vec::new());
    }

    let prompt_text = truncate_chars(&text, settings.max_page_chars);
    if prompt_text.len() < text.len() {
        warn!(
            "Page text for {} truncated to {} chars before extraction",
            url, settings.max_page_chars
        );
    }

    let jobs = extract_jobs(prompt_text, llm).await?;
    info!("Extracted {} jobs from {}", jobs.len(), url);
    Ok(jobs)
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::portfolio::PortfolioEntry;
    use crate::testing::{ScriptedModel, StaticFetcher};

    const CAREERS_URL: &str = "https://example.com/careers";

    fn settings() -> PipelineSettings {
        PipelineSettings {
            sender: SenderProfile {
                name: "Mohan".to_string(),
                company: "AtliQ".to_string(),
                pitch: "a software consultancy.".to_string(),
            },
            max_page_chars: 24_000,
        }
    }

    fn portfolio() -> Portfolio {
        Portfolio::new(vec![
            PortfolioEntry::new(["python"], "http://a"),
            PortfolioEntry::new(["java"], "http://b"),
        ])
    }

    fn ok(text: &str) -> Result<String, LlmError> {
        Ok(text.to_string())
    }

    #[tokio::test]
    async fn test_single_job_matches_python_link_only() {
        let fetcher = StaticFetcher::page(
            "<h1>Careers</h1><div><h2>Data Engineer</h2><p>Python and SQL required</p></div>",
        );
        let model = ScriptedModel::new(vec![
            ok(r#"[{"role": "Data Engineer", "skills": ["Python", "SQL"], "description": "ETL"}]"#),
            ok("Dear hiring team, see http://a"),
        ]);

        let report = generate_emails(CAREERS_URL, &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap();

        assert_eq!(report.url, CAREERS_URL);
        assert_eq!(report.emails.len(), 1);
        assert_eq!(report.emails[0].portfolio_links, vec!["http://a".to_string()]);
        assert_eq!(
            report.emails[0].draft().map(|d| d.body.as_str()),
            Some("Dear hiring team, see http://a")
        );

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].prompt.contains("Data Engineer Python and SQL required"));
        assert!(!calls[0].prompt.contains("<h2>"));
        assert!(calls[1].prompt.contains("http://a"));
        assert!(!calls[1].prompt.contains("http://b"));
    }

    #[tokio::test]
    async fn test_one_draft_per_extracted_job() {
        let fetcher = StaticFetcher::page("Jobs: Backend, Frontend, Mobile");
        let model = ScriptedModel::new(vec![
            ok(r#"[{"role": "Backend"}, {"role": "Frontend"}, {"role": "Mobile"}]"#),
            ok("email 1"),
            ok("email 2"),
            ok("email 3"),
        ]);

        let report = generate_emails(CAREERS_URL, &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap();

        assert_eq!(report.emails.len(), 3);
        let bodies: Vec<&str> = report.drafts().map(|d| d.body.as_str()).collect();
        assert_eq!(bodies, vec!["email 1", "email 2", "email 3"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_produces_no_drafts() {
        let fetcher = StaticFetcher::failing(503);
        let model = ScriptedModel::new(vec![]);

        let err = generate_emails(CAREERS_URL, &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Fetch(FetchError::Status { status: 503, .. })
        ));
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_never_reaches_fetcher() {
        let fetcher = StaticFetcher::page("unused");
        let model = ScriptedModel::new(vec![]);

        let err = generate_emails("not a url", &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Fetch(FetchError::InvalidUrl { .. })));
        assert!(fetcher.fetched().is_empty());
    }

    #[tokio::test]
    async fn test_empty_job_list_is_empty_report() {
        let fetcher = StaticFetcher::page("About us. We are not hiring right now.");
        let model = ScriptedModel::new(vec![ok("[]")]);

        let report = generate_emails(CAREERS_URL, &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap();

        assert!(report.emails.is_empty());
        assert_eq!(model.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_page_skips_the_model() {
        let fetcher = StaticFetcher::page("<div>  </div>&nbsp;");
        let model = ScriptedModel::new(vec![]);

        let report = generate_emails(CAREERS_URL, &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap();

        assert!(report.emails.is_empty());
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_extraction_aborts_run() {
        let fetcher = StaticFetcher::page("Careers page");
        let model = ScriptedModel::new(vec![ok("I could not find any JSON for you.")]);

        let err = generate_emails(CAREERS_URL, &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Extraction(ExtractionError::Parse(_))));
        assert_eq!(model.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_draft_failure_is_isolated_to_its_job() {
        let fetcher = StaticFetcher::page("Three openings");
        let model = ScriptedModel::new(vec![
            ok(r#"[{"role": "A"}, {"role": "B"}, {"role": "C"}]"#),
            ok("email A"),
            Err(LlmError::Api {
                status: 529,
                message: "overloaded".to_string(),
            }),
            ok("email C"),
        ]);

        let report = generate_emails(CAREERS_URL, &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap();

        assert_eq!(report.emails.len(), 3);
        assert_eq!(report.failed_count(), 1);
        assert!(report.emails[0].draft().is_some());
        match &report.emails[1].outcome {
            DraftOutcome::Failed { error } => assert!(error.contains("overloaded")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(
            report.emails[2].draft().map(|d| d.body.as_str()),
            Some("email C")
        );
    }

    #[tokio::test]
    async fn test_malformed_skills_still_get_an_email() {
        let fetcher = StaticFetcher::page("Opening");
        let model = ScriptedModel::new(vec![
            ok(r#"[{"role": "Generalist", "skills": {"weird": true}}]"#),
            ok("Hello"),
        ]);

        let report = generate_emails(CAREERS_URL, &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap();

        assert!(report.emails[0].job.skills.is_empty());
        assert!(report.emails[0].portfolio_links.is_empty());
        assert!(report.emails[0].draft().is_some());
    }

    #[tokio::test]
    async fn test_scrape_jobs_truncates_long_pages() {
        let fetcher = StaticFetcher::page("abcdefghijklmnopqrstuvwxyz");
        let model = ScriptedModel::new(vec![ok("[]")]);
        let mut settings = settings();
        settings.max_page_chars = 5;

        let preview = scrape_jobs(CAREERS_URL, &fetcher, &model, &settings)
            .await
            .unwrap();

        assert!(preview.jobs.is_empty());
        let prompt = &model.calls()[0].prompt;
        assert!(prompt.contains("abcde"));
        assert!(!prompt.contains("abcdef"));
    }

    #[tokio::test]
    async fn test_both_entry_points_report_the_normalised_url() {
        let raw_url = "  HTTPS://Example.COM ";

        let fetcher = StaticFetcher::page("Openings");
        let model = ScriptedModel::new(vec![ok(r#"[{"role": "SRE"}]"#)]);
        let preview = scrape_jobs(raw_url, &fetcher, &model, &settings())
            .await
            .unwrap();
        assert_eq!(preview.url, "https://example.com/");
        assert_eq!(preview.jobs.len(), 1);

        let model = ScriptedModel::new(vec![ok("[]")]);
        let report = generate_emails(raw_url, &fetcher, &model, &portfolio(), &settings())
            .await
            .unwrap();
        assert_eq!(report.url, preview.url);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("héllo", 10), "héllo");
        assert_eq!(truncate_chars("", 3), "");
    }
}
