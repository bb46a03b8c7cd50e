//! Decoding of JSON-mode CDX responses.
//!
//! The body is an array of string arrays. Row 0 carries the field labels,
//! data rows carry the seven CDX fields in fixed order and a trailing
//! single-field row carries the resumption key when one was requested.

use log::{debug, trace};

use crate::config::{CDX_ROW_FIELDS, UNKNOWN_FIELD_SENTINEL};
use crate::error_handling::CdxError;
use crate::query::parse_timestamp;
use crate::record::Capture;

/// Captures and resumption key found in one response body.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct DecodedRows {
    pub captures: Vec<Capture>,
    pub resume_key: Option<String>,
}

/// Decodes a buffered response body.
///
/// Any parse failure aborts the whole decode; no partial result is returned.
pub(crate) fn decode_rows(body: &[u8]) -> Result<DecodedRows, CdxError> {
    // The archive answers an empty result set with an empty body
    if body.iter().all(u8::is_ascii_whitespace) {
        debug!("Empty CDX response body");
        return Ok(DecodedRows::default());
    }

    let rows: Vec<Vec<String>> = serde_json::from_slice(body)?;
    let mut decoded = DecodedRows::default();

    for (index, row) in rows.into_iter().enumerate().skip(1) {
        match row.len() {
            0 => trace!("Skipping empty row {}", index),
            1 => {
                let key = row.into_iter().next().unwrap_or_default();
                trace!("Row {} carries resumption key {}", index, key);
                decoded.resume_key = Some(key);
            }
            CDX_ROW_FIELDS => decoded.captures.push(decode_capture(index, row)?),
            fields => return Err(CdxError::MalformedRow { index, fields }),
        }
    }

    debug!(
        "Decoded {} captures (resumption key: {})",
        decoded.captures.len(),
        decoded.resume_key.is_some()
    );
    Ok(decoded)
}

fn decode_capture(index: usize, row: Vec<String>) -> Result<Capture, CdxError> {
    let fields: [String; CDX_ROW_FIELDS] =
        row.try_into().map_err(|row: Vec<String>| CdxError::MalformedRow {
            index,
            fields: row.len(),
        })?;
    let [url_key, timestamp, original, mime_type, status_code, digest, length] = fields;

    Ok(Capture {
        timestamp: parse_timestamp(&timestamp)?,
        status_code: parse_or_zero(&status_code)?,
        length: parse_or_zero(&length)?,
        url_key,
        original,
        mime_type,
        digest,
    })
}

fn parse_or_zero<T>(field: &str) -> Result<T, std::num::ParseIntError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError> + Default,
{
    if field == UNKNOWN_FIELD_SENTINEL {
        Ok(T::default())
    } else {
        field.parse()
    }
}
