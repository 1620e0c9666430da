//! Axum route handlers for login, logout and history.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::csv_download;
use crate::session::auth::{password_matches, CurrentSession};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct HistorySummary {
    pub index: usize,
    pub timestamp: String,
    pub product: String,
    pub target: String,
    pub platform: String,
    pub record_count: usize,
    /// (cep_title, hooking_copy, visual_guide) per record, for the overview table.
    pub preview: Vec<[String; 3]>,
    pub csv_url: String,
}

/// POST /api/v1/session/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !password_matches(&req.password, &state.config.team_password) {
        warn!("Rejected login attempt");
        return Err(AppError::Unauthorized);
    }
    let session_id = state.sessions.open().await;
    info!("Session {session_id} opened");
    Ok(Json(LoginResponse { session_id }))
}

/// DELETE /api/v1/session
pub async fn handle_logout(
    State(state): State<AppState>,
    CurrentSession(id): CurrentSession,
) -> StatusCode {
    state.sessions.close(id).await;
    info!("Session {id} closed");
    StatusCode::NO_CONTENT
}

/// GET /api/v1/history
///
/// Newest first. Empty list when nothing has been generated yet.
pub async fn handle_history(
    State(state): State<AppState>,
    CurrentSession(id): CurrentSession,
) -> Result<Json<Vec<HistorySummary>>, AppError> {
    let summaries = state
        .sessions
        .with_session(id, |session| {
            session
                .history
                .iter()
                .enumerate()
                .map(|(index, entry)| HistorySummary {
                    index,
                    timestamp: entry.timestamp.clone(),
                    product: entry.product.clone(),
                    target: entry.target.clone(),
                    platform: entry.platform.clone(),
                    record_count: entry.records.len(),
                    preview: entry
                        .records
                        .iter()
                        .map(|r| {
                            [
                                r.cep_title.clone(),
                                r.hooking_copy.clone(),
                                r.visual_guide.clone(),
                            ]
                        })
                        .collect(),
                    csv_url: format!("/api/v1/history/{index}/csv"),
                })
                .collect::<Vec<_>>()
        })
        .await
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(summaries))
}

/// GET /api/v1/history/:index/csv
pub async fn handle_history_csv(
    State(state): State<AppState>,
    CurrentSession(id): CurrentSession,
    Path(index): Path<usize>,
) -> Result<Response, AppError> {
    let entry = state
        .sessions
        .with_session(id, |session| session.history.get(index).cloned())
        .await
        .ok_or(AppError::Unauthorized)?
        .ok_or_else(|| AppError::NotFound(format!("History entry {index} not found")))?;

    let filename = format!("History_{}.csv", entry.timestamp);
    Ok(csv_download(&entry.records, &filename))
}
