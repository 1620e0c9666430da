//! CSV export of CEP records, UTF-8 with BOM so spreadsheet apps detect the encoding.

use std::borrow::Cow;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::cep::{CepRecord, CEP_FIELDS};

pub const UTF8_BOM: &str = "\u{feff}";

/// `filename*` escape set: alphanumerics and `-._~` stay literal.
const RFC5987_ATTR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Header row plus one row per record, columns in `CEP_FIELDS` order.
pub fn records_to_csv(records: &[CepRecord]) -> String {
    let mut out = String::from(UTF8_BOM);
    push_row(&mut out, CEP_FIELDS.iter().copied());
    for record in records {
        push_row(&mut out, record.values().into_iter());
    }
    out
}

fn push_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let row = fields.map(escape_field).collect::<Vec<_>>().join(",");
    out.push_str(&row);
    out.push('\n');
}

/// RFC 4180 quoting: fields with a comma, quote or line break are quoted,
/// embedded quotes doubled.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// `Content-Disposition` value with an ASCII fallback and the UTF-8 name in `filename*`.
fn content_disposition(filename: &str) -> String {
    let ascii_fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || "-._".contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect();

    let encoded = utf8_percent_encode(filename, RFC5987_ATTR);

    format!("attachment; filename=\"{ascii_fallback}\"; filename*=UTF-8''{encoded}")
}

/// Builds a downloadable CSV response.
pub fn csv_download(records: &[CepRecord], filename: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(filename)),
        ],
        records_to_csv(records),
    )
        .into_response()
}
