//! Test doubles for the external collaborators (web pages and the language model).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Url;

use crate::llm_client::{LanguageModel, LlmError};
use crate::scraping::{FetchError, PageFetcher};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub system: String,
}

/// Replays queued answers in order and records every prompt it receives.
/// Runs out → `LlmError::EmptyContent`.
pub struct ScriptedModel {
    answers: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new(answers: Vec<Result<String, LlmError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            system: system.to_string(),
        });
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Serves one fixed page, or fails with a fixed HTTP status.
pub struct StaticFetcher {
    page: Result<String, u16>,
    fetched: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn page(text: &str) -> Self {
        Self {
            page: Ok(text.to_string()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            page: Err(status),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.fetched.lock().unwrap().push(url.to_string());
        match &self.page {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
        }
    }
}
