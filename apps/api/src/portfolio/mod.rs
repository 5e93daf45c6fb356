//! Portfolio Matcher — maps a job's required skills to showcase links.
//!
//! The table is loaded once at startup (see `store`) and is read-only afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub mod store;

/// A set of technology tags paired with one showcase link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Distinct tags in their original casing.
    pub tags: Vec<String>,
    pub link: String,
}

impl PortfolioEntry {
    pub fn new<I, S>(tags: I, link: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let tags = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
            .collect();
        Self {
            tags,
            link: link.into().trim().to_string(),
        }
    }

    /// Builds an entry from a comma-separated tech stack cell ("React, Node.js, MongoDB").
    pub fn from_techstack(techstack: &str, link: impl Into<String>) -> Self {
        Self::new(techstack.split(','), link)
    }

    fn matches_skill(&self, skill_tokens: &[String]) -> bool {
        self.tags
            .iter()
            .any(|tag| tokens_overlap(skill_tokens, &tokenize(tag)))
    }
}

/// In-memory portfolio table.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    entries: Vec<PortfolioEntry>,
}

impl Portfolio {
    pub fn new(entries: Vec<PortfolioEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the links of every entry whose tags match any of `skills`.
    ///
    /// Skills are walked in order and entries in table order; links come out in
    /// first-seen order without duplicates. Matching is case-insensitive and
    /// whole-word: "Python 3" matches a "python" tag, "Vue" matches "Vue.js",
    /// "JavaScript" does not match "java".
    pub fn query_links<S: AsRef<str>>(&self, skills: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for skill in skills {
            let skill_tokens = tokenize(skill.as_ref());
            if skill_tokens.is_empty() {
                continue;
            }
            for entry in &self.entries {
                if entry.matches_skill(&skill_tokens) && seen.insert(entry.link.as_str()) {
                    links.push(entry.link.clone());
                }
            }
        }

        links
    }
}

/// Lower-cased words. `+` and `#` stay inside a word so "C++" and "C#" survive;
/// a `.` splits, so "Node.js" is ["node", "js"].
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#')))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True when the shorter token run appears contiguously inside the longer one.
fn tokens_overlap(a: &[String], b: &[String]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    long.windows(short.len()).any(|window| window == short)
}
