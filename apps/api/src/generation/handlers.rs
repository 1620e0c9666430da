//! Axum route handlers for the Strategy API.

use axum::{
    extract::State,
    response::Response,
    Json,
};
use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::csv_download;
use crate::generation::generator::{generate_strategy, SearchWarning};
use crate::generation::response_parser::ExtractionMode;
use crate::models::cep::CepRecord;
use crate::models::strategy::{Platform, StrategyRequest, Tone};
use crate::report::{build_report, ReportCard};
use crate::session::auth::CurrentSession;
use crate::session::HistoryEntry;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StrategyResponse {
    pub timestamp: String,
    pub product: String,
    pub target: String,
    pub platform: String,
    pub tone: String,
    pub model: &'static str,
    pub extraction_mode: ExtractionMode,
    pub search_warnings: Vec<SearchWarning>,
    pub record_count: usize,
    pub cards: Vec<ReportCard>,
    pub records: Vec<CepRecord>,
    pub csv_url: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OptionItem {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub platforms: Vec<OptionItem>,
    pub default_platform: &'static str,
    pub tones: Vec<OptionItem>,
    pub default_tone: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
///
/// Platform and tone choices for the input form, in display order.
pub async fn handle_options() -> Json<FormOptions> {
    Json(FormOptions {
        platforms: Platform::ALL
            .iter()
            .map(|p| OptionItem {
                id: p.id(),
                label: p.label(),
            })
            .collect(),
        default_platform: Platform::default().id(),
        tones: Tone::ALL
            .iter()
            .map(|t| OptionItem {
                id: t.id(),
                label: t.label(),
            })
            .collect(),
        default_tone: Tone::default().id(),
    })
}

/// POST /api/v1/strategies
///
/// Full pipeline: search → prompt → model chain → parse → history → report.
/// Nothing is recorded when the model chain or the parse fails.
pub async fn handle_generate(
    State(state): State<AppState>,
    CurrentSession(session_id): CurrentSession,
    Json(request): Json<StrategyRequest>,
) -> Result<Json<StrategyResponse>, AppError> {
    let outcome = generate_strategy(
        state.search.as_ref(),
        state.llm.as_ref(),
        &request,
        state.config.search_result_limit,
    )
    .await?;

    let entry = HistoryEntry::new(&request, outcome.records, Local::now());
    let cards = build_report(&entry.records, &request.product_name, request.platform);

    state
        .sessions
        .with_session_mut(session_id, |session| session.history.record(entry.clone()))
        .await
        .ok_or(AppError::Unauthorized)?;

    info!(
        "Session {session_id}: stored {} CEPs for {:?} (model {})",
        entry.records.len(),
        entry.product,
        outcome.model
    );

    Ok(Json(StrategyResponse {
        timestamp: entry.timestamp,
        product: entry.product,
        target: entry.target,
        platform: entry.platform,
        tone: request.tone.label().to_string(),
        model: outcome.model,
        extraction_mode: outcome.extraction_mode,
        search_warnings: outcome.search_warnings,
        record_count: entry.records.len(),
        cards,
        records: entry.records,
        csv_url: "/api/v1/strategies/latest/csv",
    }))
}

/// GET /api/v1/strategies/latest/csv
pub async fn handle_latest_csv(
    State(state): State<AppState>,
    CurrentSession(session_id): CurrentSession,
) -> Result<Response, AppError> {
    let entry = state
        .sessions
        .with_session(session_id, |session| session.history.latest().cloned())
        .await
        .ok_or(AppError::Unauthorized)?
        .ok_or_else(|| AppError::NotFound("No strategy has been generated yet".to_string()))?;

    let filename = format!("CEP_Logic_Strategy_{}.csv", entry.product);
    Ok(csv_download(&entry.records, &filename))
}
