pub mod eruptions;
pub mod hypocenters;

pub use eruptions::load_eruptions;
pub use hypocenters::{load_hypocenters, load_hypocenters_with_format, load_wovodat_hypocenters};

use crate::utils::error::{PrepError, Result};
use chrono::NaiveDateTime;
use csv::StringRecord;

pub(crate) fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| PrepError::MissingColumn {
            name: name.to_string(),
        })
}

pub(crate) fn field<'a>(record: &'a StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or("").trim()
}

pub(crate) fn parse_f64(record: &StringRecord, row: usize, index: usize, column: &str) -> Result<f64> {
    let raw = field(record, index);
    raw.parse::<f64>().map_err(|_| PrepError::InvalidField {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Parse a catalogue timestamp, discarding fractional seconds and a trailing
/// `Z` suffix before matching against `format`.
pub(crate) fn parse_timestamp(raw: &str, format: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim().trim_end_matches('Z');
    let raw = raw.split('.').next().unwrap_or(raw);
    Ok(NaiveDateTime::parse_from_str(raw, format)?)
}
