use super::loader::COLUMNS;
use super::model::Language;
use super::select::Subset;

/// Serialise a subset to a spreadsheet-compatible CSV byte stream, with the
/// original export's header and column order, rows in subset order. The
/// caller decides what to do with the bytes (download, attach, pipe).
pub fn write_csv(subset: &Subset) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;

    for event in subset.iter() {
        let flag = match event.language {
            Language::English => "0",
            Language::Native => "1",
        };
        writer.write_record([
            event.id.to_string(),
            event.date.format("%Y-%m-%d").to_string(),
            flag.to_string(),
            event.category.clone(),
            event.subcategory.clone(),
            event.actor1_name.clone(),
            event.actor2_name.clone(),
            event.country.clone(),
            optional(event.latitude),
            optional(event.longitude),
            optional(event.tone),
            event
                .num_articles
                .map(|n| n.to_string())
                .unwrap_or_default(),
            optional(event.goldstein),
            event.source_url.clone(),
            event.source_name.clone(),
        ])?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
