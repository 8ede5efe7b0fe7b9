use std::path::Path;

use chrono::NaiveDate;

use super::model::{Dataset, Event, Language};
use crate::error::LoadError;

/// Column names of the GDELT export, in file order. Also used verbatim by
/// the export encoder so a round trip keeps the original header.
pub const COLUMNS: [&str; 15] = [
    "GLOBALEVENTID",
    "Date",
    "Is_Translated",
    "EventRootDescription",
    "EventDescription",
    "Actor1Name",
    "Actor2Name",
    "ActionGeo_CountryName",
    "ActionGeo_Lat",
    "ActionGeo_Long",
    "AvgTone",
    "NumArticles",
    "GoldsteinScale",
    "SOURCEURL",
    "SourceName",
];

/// Per-file positions of the required columns. The export is allowed to
/// carry extra columns and to order them freely; lookup is by header name.
struct ColumnIndex {
    id: usize,
    date: usize,
    translated: usize,
    category: usize,
    subcategory: usize,
    actor1: usize,
    actor2: usize,
    country: usize,
    latitude: usize,
    longitude: usize,
    tone: usize,
    num_articles: usize,
    goldstein: usize,
    source_url: usize,
    source_name: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, path: &Path) -> Result<Self, LoadError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };
        Ok(ColumnIndex {
            id: find("GLOBALEVENTID")?,
            date: find("Date")?,
            translated: find("Is_Translated")?,
            category: find("EventRootDescription")?,
            subcategory: find("EventDescription")?,
            actor1: find("Actor1Name")?,
            actor2: find("Actor2Name")?,
            country: find("ActionGeo_CountryName")?,
            latitude: find("ActionGeo_Lat")?,
            longitude: find("ActionGeo_Long")?,
            tone: find("AvgTone")?,
            num_articles: find("NumArticles")?,
            goldstein: find("GoldsteinScale")?,
            source_url: find("SOURCEURL")?,
            source_name: find("SourceName")?,
        })
    }
}

/// Load a GDELT event export. Called once per session; the returned
/// [`Dataset`] is never mutated afterwards.
///
/// Fails with [`LoadError`] on a missing/unreadable file, a missing
/// required column, a file with no data rows, or a malformed cell in the
/// typed columns. Missing numeric cells are fine and load as `None`.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let read_err = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
    let headers = reader.headers().map_err(read_err)?.clone();
    let cols = ColumnIndex::resolve(&headers, path)?;

    let mut events = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = row_no + 1;
        let record = result.map_err(read_err)?;
        events.push(parse_row(&record, &cols, path, row)?);
    }

    if events.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    log::info!("loaded {} events from {}", events.len(), path.display());
    Ok(Dataset::new(events))
}

fn parse_row(
    record: &csv::StringRecord,
    cols: &ColumnIndex,
    path: &Path,
    row: usize,
) -> Result<Event, LoadError> {
    let cell = |idx: usize| record.get(idx).unwrap_or("").trim();
    let row_err = |message: String| LoadError::Row {
        path: path.to_path_buf(),
        row,
        message,
    };

    let id = cell(cols.id)
        .parse::<i64>()
        .map_err(|_| row_err(format!("'{}' is not an event id", cell(cols.id))))?;

    let date = NaiveDate::parse_from_str(cell(cols.date), "%Y-%m-%d")
        .map_err(|_| row_err(format!("'{}' is not a YYYY-MM-DD date", cell(cols.date))))?;

    let flag = cell(cols.translated)
        .parse::<u8>()
        .ok()
        .and_then(|f| Language::try_from(f).ok())
        .ok_or_else(|| {
            row_err(format!(
                "Is_Translated must be 0 or 1, got '{}'",
                cell(cols.translated)
            ))
        })?;

    Ok(Event {
        id,
        date,
        language: flag,
        category: cell(cols.category).to_string(),
        subcategory: cell(cols.subcategory).to_string(),
        country: cell(cols.country).to_string(),
        latitude: parse_optional_f64(cell(cols.latitude), "ActionGeo_Lat", &row_err)?,
        longitude: parse_optional_f64(cell(cols.longitude), "ActionGeo_Long", &row_err)?,
        tone: parse_optional_f64(cell(cols.tone), "AvgTone", &row_err)?,
        num_articles: parse_optional_u32(cell(cols.num_articles), &row_err)?,
        goldstein: parse_optional_f64(cell(cols.goldstein), "GoldsteinScale", &row_err)?,
        source_url: cell(cols.source_url).to_string(),
        source_name: cell(cols.source_name).to_string(),
        actor1_name: cell(cols.actor1).to_string(),
        actor2_name: cell(cols.actor2).to_string(),
    })
}

fn parse_optional_f64(
    s: &str,
    column: &str,
    row_err: &impl Fn(String) -> LoadError,
) -> Result<Option<f64>, LoadError> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<f64>()
        .map(Some)
        .map_err(|_| row_err(format!("{column}: '{s}' is not a number")))
}

fn parse_optional_u32(
    s: &str,
    row_err: &impl Fn(String) -> LoadError,
) -> Result<Option<u32>, LoadError> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<u32>()
        .map(Some)
        .map_err(|_| row_err(format!("NumArticles: '{s}' is not a count")))
}
