use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LanguageModel;
use crate::portfolio::Portfolio;
use crate::scraping::PageFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub llm: Arc<dyn LanguageModel>,
    /// Loaded once at startup from CSV or PostgreSQL.
    pub portfolio: Arc<Portfolio>,
    pub config: Config,
}
