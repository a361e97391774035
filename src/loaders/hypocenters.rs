use super::{column_index, field, parse_f64, parse_timestamp};
use crate::domain::model::{Hypocenter, HypocenterFormat};
use crate::utils::error::Result;
use csv::ReaderBuilder;
use std::io::Read;

struct Layout {
    time: &'static str,
    latitude: &'static str,
    longitude: &'static str,
    depth: &'static str,
    magnitude: &'static str,
    time_format: &'static str,
}

const USGS: Layout = Layout {
    time: "time",
    latitude: "latitude",
    longitude: "longitude",
    depth: "depth",
    magnitude: "mag",
    time_format: "%Y-%m-%dT%H:%M:%S",
};

const WOVODAT: Layout = Layout {
    time: "Date-time",
    latitude: "Latitude",
    longitude: "Longitude",
    depth: "Depth",
    magnitude: "Magnitude",
    time_format: "%m/%d/%Y %H:%M:%S",
};

/// Load a USGS event-export CSV. Columns are located by header name, so
/// column order is irrelevant and extra columns are ignored.
pub fn load_hypocenters<R: Read>(reader: R) -> Result<Vec<Hypocenter>> {
    load_with_layout(reader, &USGS)
}

/// Load a WOVOdat earthquake export (`Date-time`, `Latitude`, ... headers,
/// `%m/%d/%Y %H:%M:%S` timestamps).
pub fn load_wovodat_hypocenters<R: Read>(reader: R) -> Result<Vec<Hypocenter>> {
    load_with_layout(reader, &WOVODAT)
}

pub fn load_hypocenters_with_format<R: Read>(
    reader: R,
    format: HypocenterFormat,
) -> Result<Vec<Hypocenter>> {
    match format {
        HypocenterFormat::Usgs => load_hypocenters(reader),
        HypocenterFormat::Wovodat => load_wovodat_hypocenters(reader),
    }
}

fn load_with_layout<R: Read>(reader: R, layout: &Layout) -> Result<Vec<Hypocenter>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let tcol = column_index(&headers, layout.time)?;
    let latcol = column_index(&headers, layout.latitude)?;
    let loncol = column_index(&headers, layout.longitude)?;
    let depcol = column_index(&headers, layout.depth)?;
    let magcol = column_index(&headers, layout.magnitude)?;

    let mut hypocenters = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // 1-based file line, counting the header row
        let row = i + 2;

        hypocenters.push(Hypocenter {
            time: parse_timestamp(field(&record, tcol), layout.time_format)?,
            latitude: parse_f64(&record, row, latcol, layout.latitude)?,
            longitude: parse_f64(&record, row, loncol, layout.longitude)?,
            depth_km: parse_f64(&record, row, depcol, layout.depth)?,
            magnitude: parse_f64(&record, row, magcol, layout.magnitude)?,
        });
    }

    Ok(hypocenters)
}
