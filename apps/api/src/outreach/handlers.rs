//! Axum route handlers for the Outreach API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::outreach::models::{GenerationReport, JobPreview};
use crate::outreach::pipeline::{generate_emails, scrape_jobs, PipelineSettings};
use crate::portfolio::PortfolioEntry;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub entries: Vec<PortfolioEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/emails/generate
///
/// Full pipeline: fetch → clean → extract jobs → match links → draft emails.
/// Returns one entry per extracted job, each either drafted or failed.
pub async fn handle_generate_emails(
    State(state): State<AppState>,
    Json(request): Json<UrlRequest>,
) -> Result<Json<GenerationReport>, AppError> {
    require_url(&request.url)?;

    let settings = PipelineSettings::from(&state.config);
    let report = generate_emails(
        &request.url,
        state.fetcher.as_ref(),
        state.llm.as_ref(),
        &state.portfolio,
        &settings,
    )
    .await?;

    Ok(Json(report))
}

/// POST /api/v1/jobs/extract
///
/// Fetches the page and returns the extracted jobs without drafting anything.
pub async fn handle_extract_jobs(
    State(state): State<AppState>,
    Json(request): Json<UrlRequest>,
) -> Result<Json<JobPreview>, AppError> {
    require_url(&request.url)?;

    let settings = PipelineSettings::from(&state.config);
    let preview = scrape_jobs(
        &request.url,
        state.fetcher.as_ref(),
        state.llm.as_ref(),
        &settings,
    )
    .await?;

    Ok(Json(preview))
}

/// GET /api/v1/portfolio
pub async fn handle_get_portfolio(State(state): State<AppState>) -> Json<PortfolioResponse> {
    Json(PortfolioResponse {
        entries: state.portfolio.entries().to_vec(),
    })
}

fn require_url(url: &str) -> Result<(), AppError> {
    if url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }
    Ok(())
}
