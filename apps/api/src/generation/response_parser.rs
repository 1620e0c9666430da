//! Response Parser — pulls the JSON array of CEP records out of raw model text.
//!
//! The model is asked for schema-constrained JSON, so the trimmed text normally
//! parses as-is. Prose or code fences around the array are handled by two
//! fallbacks, both logged: slicing from the first `[` to the last `]`, then
//! stripping known fence markers and parsing the whole text.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::cep::CepRecord;

#[derive(Debug, Error)]
#[error("JSON 파싱 실패: {message}")]
pub struct ParseError {
    pub message: String,
    /// Untouched model output, kept for manual inspection.
    pub raw_text: String,
}

/// Which extraction path produced the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    Direct,
    BracketSlice,
    FenceStripped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub records: Vec<CepRecord>,
    pub mode: ExtractionMode,
}

/// Parses raw model output into CEP records. The record count is not checked.
pub fn parse_cep_response(raw_text: &str) -> Result<ParsedResponse, ParseError> {
    let trimmed = raw_text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if value.is_array() {
            return to_records(value, raw_text, ExtractionMode::Direct);
        }
    }

    if let Some(slice) = bracket_slice(raw_text) {
        match serde_json::from_str::<Value>(slice) {
            Ok(value) => {
                warn!("Model output was not bare JSON; extracted array by bracket scan");
                return to_records(value, raw_text, ExtractionMode::BracketSlice);
            }
            Err(e) => warn!("Bracket slice failed to parse ({e}); trying fence strip"),
        }
    }

    let stripped = raw_text.replace("```json", "").replace("```", "");
    let value = serde_json::from_str::<Value>(stripped.trim()).map_err(|e| ParseError {
        message: e.to_string(),
        raw_text: raw_text.to_string(),
    })?;
    warn!("Extracted model output by stripping code fences");
    to_records(value, raw_text, ExtractionMode::FenceStripped)
}

/// Substring from the first `[` through the last `]`, if both exist in that order.
fn bracket_slice(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

fn to_records(
    value: Value,
    raw_text: &str,
    mode: ExtractionMode,
) -> Result<ParsedResponse, ParseError> {
    let fail = |message: String| ParseError {
        message,
        raw_text: raw_text.to_string(),
    };

    let Value::Array(items) = value else {
        return Err(fail("top-level JSON value is not an array".to_string()));
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_object()
                .map(CepRecord::from_object)
                .ok_or_else(|| fail(format!("array element {idx} is not an object")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedResponse { records, mode })
}
