//! Shared fixtures for unit tests.

use chrono::NaiveDate;

use crate::data::model::{Dataset, Event, Language};

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Minimal event with sensible defaults; tests override fields as needed.
pub(crate) fn event(id: i64, day: &str, language: Language) -> Event {
    Event {
        id,
        date: date(day),
        language,
        category: "PROTEST".to_string(),
        subcategory: "Demonstrate or rally".to_string(),
        country: "Portugal".to_string(),
        latitude: Some(38.7),
        longitude: Some(-9.1),
        tone: Some(-2.0),
        num_articles: Some(4),
        goldstein: Some(-6.5),
        source_url: format!("https://news.example/{id}"),
        source_name: "example".to_string(),
        actor1_name: String::new(),
        actor2_name: String::new(),
    }
}

fn row(
    id: i64,
    day: &str,
    language: Language,
    category: &str,
    subcategory: &str,
    country: &str,
) -> Event {
    let mut e = event(id, day, language);
    e.category = category.to_string();
    e.subcategory = subcategory.to_string();
    e.country = country.to_string();
    e
}

/// Eight events over four days, three categories, four countries. Used by the
/// catalog, filter, selection, and session tests.
pub(crate) fn fixture_dataset() -> Dataset {
    use Language::{English, Native};
    Dataset::new(vec![
        row(1, "2022-03-01", English, "PROTEST", "Demonstrate or rally", "Portugal"),
        row(2, "2022-03-01", Native, "PROTEST", "Hunger strike", "Portugal"),
        row(3, "2022-03-02", English, "APPEAL", "Appeal for aid", "Spain"),
        row(4, "2022-03-02", English, "PROTEST", "Demonstrate or rally", "Brazil"),
        row(5, "2022-03-03", Native, "FIGHT", "Use conventional force", "Angola"),
        row(6, "2022-03-03", English, "APPEAL", "Appeal for change", "Portugal"),
        row(7, "2022-03-04", Native, "FIGHT", "Impose blockade", "Spain"),
        row(8, "2022-03-04", English, "PROTEST", "Obstruct passage", "Portugal"),
    ])
}
