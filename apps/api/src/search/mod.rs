//! Search Collector — keyword queries against a web search backend, formatted
//! into a text blob for the prompt.
//!
//! Failures are typed. Callers decide what to do with them; the generator drops
//! failed queries from the prompt and reports them as warnings.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoSearch;

/// Default number of results kept per query.
pub const DEFAULT_RESULT_LIMIT: usize = 3;

/// Returned in place of a result list when the query matched nothing.
pub const NO_RESULTS_MARKER: &str = "검색 결과 없음";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSnippet {
    pub title: String,
    pub body: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchErrorKind {
    Network,
    Status,
    Parse,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("search failed ({kind:?}): {message}")]
pub struct SearchError {
    pub kind: SearchErrorKind,
    pub message: String,
}

impl SearchError {
    pub fn new(kind: SearchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A text web-search provider. Implement this to swap providers or stub them in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchSnippet>, SearchError>;
}

/// Runs one query and formats at most `limit` results.
pub async fn collect(
    backend: &dyn SearchBackend,
    query: &str,
    limit: usize,
) -> Result<String, SearchError> {
    let mut snippets = backend.search(query, limit).await?;
    snippets.truncate(limit);
    tracing::debug!(
        "{} returned {} results for {:?}",
        backend.name(),
        snippets.len(),
        query
    );
    Ok(format_snippets(&snippets))
}

/// `[i] title\nbody\n(출처: url)` per result, 1-based, separated by blank lines.
pub fn format_snippets(snippets: &[SearchSnippet]) -> String {
    if snippets.is_empty() {
        return NO_RESULTS_MARKER.to_string();
    }
    snippets
        .iter()
        .enumerate()
        .map(|(i, s)| format!("[{}] {}\n{}\n(출처: {})", i + 1, s.title, s.body, s.url))
        .collect::<Vec<_>>()
        .join("\n\n")
}
