//! LLM Job Extractor — asks the model for a JSON job list and validates every entry.
//!
//! The answer is untrusted: entries without a usable role are dropped, and a
//! missing or malformed `skills` value degrades to an empty list.

use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, LanguageModel, LlmError};
use crate::outreach::models::JobPosting;
use crate::outreach::prompts::JOB_EXTRACT_PROMPT_TEMPLATE;

const ROLE_KEYS: &[&str] = &["role", "title", "job_title"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("job extraction call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("job extraction returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("job extraction returned {0}")]
    Malformed(String),
}

/// Extracts job postings from cleaned careers-page text with one model call.
pub async fn extract_jobs(
    page_text: &str,
    llm: &dyn LanguageModel,
) -> Result<Vec<JobPosting>, ExtractionError> {
    let prompt = JOB_EXTRACT_PROMPT_TEMPLATE.replace("{page_text}", page_text);
    let answer = llm.complete(&prompt, JSON_ONLY_SYSTEM).await?;
    parse_jobs(&answer)
}

/// Maps a raw model answer to validated job postings.
///
/// Accepts a JSON array of jobs, a single job object, or an object carrying a
/// `jobs` array. Any other top-level value is an error; bad entries are not.
pub fn parse_jobs(answer: &str) -> Result<Vec<JobPosting>, ExtractionError> {
    let text = strip_json_fences(answer);
    if text.is_empty() {
        return Err(ExtractionError::Malformed("an empty answer".to_string()));
    }

    let items = match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("jobs") {
            Some(Value::Array(jobs)) => jobs,
            Some(other) => {
                map.insert("jobs".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        other => {
            return Err(ExtractionError::Malformed(format!(
                "a {} where a job list was expected",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let jobs: Vec<JobPosting> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match job_from_value(item) {
            Ok(job) => Some(job),
            Err(reason) => {
                warn!("Dropping extracted job #{}: {}", index + 1, reason);
                None
            }
        })
        .collect();

    debug!("Parsed {} of {} extracted job entries", jobs.len(), total);
    Ok(jobs)
}

fn job_from_value(value: &Value) -> Result<JobPosting, String> {
    let map = value
        .as_object()
        .ok_or_else(|| format!("expected an object, got a {}", json_kind(value)))?;

    let role = ROLE_KEYS
        .iter()
        .find_map(|key| non_blank_str(map, key))
        .ok_or_else(|| "missing role".to_string())?;

    let experience = match map.get("experience") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let description = non_blank_str(map, "description").unwrap_or_default();

    Ok(JobPosting {
        role,
        experience,
        skills: skills_from_value(map.get("skills")),
        description,
    })
}

/// A list of strings, or a comma-separated string. Anything else is no skills.
fn skills_from_value(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(s)) => s.split(',').collect(),
        _ => Vec::new(),
    };

    let mut seen = HashSet::new();
    raw.into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn non_blank_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
