//! Load NAV history from fund JSON documents or `date,nav` CSV files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::Reader;

use super::data::{parse_nav_date, parse_nav_value, FundHistoryDocument, FundSeries, HistoricalPricePoint};
use crate::error::DataError;

/// Raw CSV row: `date,nav` with provider-formatted dates
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "date")]
    date: String,
    #[serde(rename = "nav")]
    nav: String,
}

impl CsvRow {
    fn to_point(&self) -> Result<HistoricalPricePoint, DataError> {
        let date = parse_nav_date(&self.date)?;
        let value = parse_nav_value(date, &self.nav)?;
        Ok(HistoricalPricePoint::new(date, value))
    }
}

/// Load a `date,nav` CSV file
pub fn load_series_csv<P: AsRef<Path>>(path: P) -> Result<Vec<HistoricalPricePoint>, DataError> {
    load_series_from_reader(File::open(path)?)
}

/// Load `date,nav` CSV rows from any reader
pub fn load_series_from_reader<R: Read>(reader: R) -> Result<Vec<HistoricalPricePoint>, DataError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut points = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        points.push(row.to_point()?);
    }

    Ok(points)
}

/// Load a fund history JSON document
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<FundHistoryDocument, DataError> {
    load_document_from_reader(BufReader::new(File::open(path)?))
}

pub fn load_document_from_reader<R: Read>(reader: R) -> Result<FundHistoryDocument, DataError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load history from `.json` documents or CSV files, naming the series after
/// the file stem when the data does not carry a scheme code
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<FundSeries, DataError> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        load_document(path)?.into_series(&stem)
    } else {
        Ok(FundSeries::new(stem, load_series_csv(path)?))
    }
}
