use super::{column_index, field, parse_f64};
use crate::domain::model::Eruption;
use crate::utils::error::{PrepError, Result};
use chrono::{NaiveDate, NaiveTime};
use csv::ReaderBuilder;
use std::io::Read;

/// Load an eruption catalogue CSV (`Number`, `Date`, `Repose`, `Length`,
/// `Flow Area`, `Flow Volume`, `Rate`, `Location`). Onset dates carry no
/// time of day and are anchored at midnight.
pub fn load_eruptions<R: Read>(reader: R) -> Result<Vec<Eruption>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let ncol = column_index(&headers, "Number")?;
    let dcol = column_index(&headers, "Date")?;
    let repcol = column_index(&headers, "Repose")?;
    let lencol = column_index(&headers, "Length")?;
    let facol = column_index(&headers, "Flow Area")?;
    let fvcol = column_index(&headers, "Flow Volume")?;
    let ratecol = column_index(&headers, "Rate")?;
    let loccol = column_index(&headers, "Location")?;

    let mut eruptions = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 2;

        let onset = NaiveDate::parse_from_str(field(&record, dcol), "%m/%d/%y")?
            .and_time(NaiveTime::MIN);

        eruptions.push(Eruption {
            number: parse_f64(&record, row, ncol, "Number")? as u32,
            onset,
            length_hours: parse_length_hours(field(&record, lencol), row)?,
            repose_days: parse_f64(&record, row, repcol, "Repose")?,
            flow_area_km2: parse_f64(&record, row, facol, "Flow Area")?,
            flow_volume_km3: parse_f64(&record, row, fvcol, "Flow Volume")?,
            effusion_rate: parse_f64(&record, row, ratecol, "Rate")?,
            location: field(&record, loccol).to_string(),
        });
    }

    Ok(eruptions)
}

// Length cells read either "190 hrs" or a bare number.
fn parse_length_hours(raw: &str, row: usize) -> Result<f64> {
    let hours = raw.split(" hrs").next().unwrap_or(raw).trim();
    hours.parse::<f64>().map_err(|_| PrepError::InvalidField {
        row,
        column: "Length".to_string(),
        value: raw.to_string(),
    })
}
