//! Strategy Generation — orchestrates one run of the pipeline.
//!
//! Flow: validate → web search (0–2 queries) → assemble prompt →
//!       model fallback chain → parse JSON array → outcome.
//!
//! Recording the outcome in the session history and rendering report cards
//! happen in the caller, so no session lock is held across network calls.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompt_builder::build_strategy_prompt;
use crate::generation::prompts::cep_response_schema;
use crate::generation::response_parser::{parse_cep_response, ExtractionMode};
use crate::llm_client::{invoke_with_fallback, GenerativeBackend};
use crate::models::cep::CepRecord;
use crate::models::strategy::StrategyRequest;
use crate::search::{self, SearchBackend, SearchErrorKind};

/// Number of CEPs the prompt asks for. Not enforced on the response.
pub const EXPECTED_CEP_COUNT: usize = 7;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A search query that failed and was left out of the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchWarning {
    pub query: String,
    pub kind: SearchErrorKind,
    pub message: String,
}

/// Prompt text plus any search queries that could not contribute to it.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPrompt {
    pub prompt: String,
    pub search_warnings: Vec<SearchWarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutcome {
    pub records: Vec<CepRecord>,
    pub model: &'static str,
    pub extraction_mode: ExtractionMode,
    pub search_warnings: Vec<SearchWarning>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// The two web queries run per request: product facts, then customer reviews.
pub fn search_queries(request: &StrategyRequest) -> [(&'static str, String); 2] {
    let name = request.product_name.trim();
    [
        ("제품 정보 검색", format!("{name} 특징 장점")),
        ("고객 반응 검색", format!("{name} 후기 단점")),
    ]
}

/// Runs the searches (if enabled) and builds the prompt.
///
/// Failed queries are logged and omitted; only real results reach the prompt.
pub async fn assemble_prompt(
    search_backend: &dyn SearchBackend,
    request: &StrategyRequest,
    search_limit: usize,
) -> AssembledPrompt {
    let mut search_warnings = Vec::new();
    let mut blocks = Vec::new();

    if request.web_search {
        for (heading, query) in search_queries(request) {
            match search::collect(search_backend, &query, search_limit).await {
                Ok(text) => blocks.push(format!("### {heading} ({query})\n{text}")),
                Err(e) => {
                    warn!("Search for {query:?} failed, leaving it out of the prompt: {e}");
                    search_warnings.push(SearchWarning {
                        query,
                        kind: e.kind,
                        message: e.message,
                    });
                }
            }
        }
    }

    let search_data = (!blocks.is_empty()).then(|| blocks.join("\n\n"));
    AssembledPrompt {
        prompt: build_strategy_prompt(request, search_data.as_deref()),
        search_warnings,
    }
}

/// Runs the full pipeline for one validated-or-not request.
///
/// Errors:
/// - `Validation` when a required field is blank (nothing else runs)
/// - `ModelUnavailable` when every model in the chain failed
/// - `ResponseParse` when no JSON array could be extracted; carries the raw text
pub async fn generate_strategy(
    search_backend: &dyn SearchBackend,
    llm: &dyn GenerativeBackend,
    request: &StrategyRequest,
    search_limit: usize,
) -> Result<StrategyOutcome, AppError> {
    request.validate()?;

    info!(
        "Generating strategy for {:?} ({}, {})",
        request.product_name,
        request.platform.id(),
        request.tone.id()
    );

    let assembled = assemble_prompt(search_backend, request, search_limit).await;

    let schema = cep_response_schema();
    let invocation = invoke_with_fallback(llm, &assembled.prompt, Some(&schema))
        .await
        .map_err(|e| AppError::ModelUnavailable(e.to_string()))?;

    let parsed = parse_cep_response(&invocation.text).map_err(|e| AppError::ResponseParse {
        message: e.message,
        raw_text: e.raw_text,
    })?;

    if parsed.records.len() != EXPECTED_CEP_COUNT {
        warn!(
            "Model {} returned {} CEPs (asked for {EXPECTED_CEP_COUNT})",
            invocation.model,
            parsed.records.len()
        );
    }

    Ok(StrategyOutcome {
        records: parsed.records,
        model: invocation.model,
        extraction_mode: parsed.mode,
        search_warnings: assembled.search_warnings,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
