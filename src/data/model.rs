use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

// ---------------------------------------------------------------------------
// Language – the Is_Translated flag
// ---------------------------------------------------------------------------

/// Source-language flag of an event: `0` = scraped from an English source,
/// `1` = machine-translated from a native source. No other flag values are
/// meaningful and the loader rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Native,
}

impl Language {
    /// Display label, matching the chart legend of the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English Articles",
            Language::Native => "Native Articles",
        }
    }
}

impl TryFrom<u8> for Language {
    type Error = u8;

    fn try_from(flag: u8) -> Result<Self, u8> {
        match flag {
            0 => Ok(Language::English),
            1 => Ok(Language::Native),
            other => Err(other),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Event – one row of the GDELT export
// ---------------------------------------------------------------------------

/// A single geo-tagged news event (one row of the source table).
///
/// Numeric cells may be missing in the export; those load as `None` and are
/// skipped when averaging.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub date: NaiveDate,
    pub language: Language,
    /// Coarse CAMEO root classification ("Event Category").
    pub category: String,
    /// Fine CAMEO classification; each subcategory belongs to exactly one
    /// category.
    pub subcategory: String,
    /// Country of the event's action location.
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tone: Option<f64>,
    pub num_articles: Option<u32>,
    pub goldstein: Option<f64>,
    pub source_url: String,
    pub source_name: String,
    // Actor fields carried through for display/export only.
    pub actor1_name: String,
    pub actor2_name: String,
}

// ---------------------------------------------------------------------------
// Dimension – the closed set of facetable columns
// ---------------------------------------------------------------------------

/// A filterable/groupable dimension of the dataset.
///
/// The presentation layer refers to dimensions by name; parsing an unknown
/// name is the schema-mismatch case and yields
/// [`SelectionError::UnknownDimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Language,
    Country,
    Category,
    Subcategory,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Language,
        Dimension::Country,
        Dimension::Category,
        Dimension::Subcategory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Language => "language",
            Dimension::Country => "country",
            Dimension::Category => "category",
            Dimension::Subcategory => "subcategory",
        }
    }

    /// The event's value on this dimension, as the display string used for
    /// facet widgets and grouped counts.
    pub fn value_of(self, event: &Event) -> String {
        match self {
            Dimension::Language => event.language.label().to_string(),
            Dimension::Country => event.country.clone(),
            Dimension::Category => event.category.clone(),
            Dimension::Subcategory => event.subcategory.clone(),
        }
    }
}

impl FromStr for Dimension {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "language" => Ok(Dimension::Language),
            "country" => Ok(Dimension::Country),
            "category" => Ok(Dimension::Category),
            "subcategory" => Ok(Dimension::Subcategory),
            other => Err(SelectionError::UnknownDimension(other.to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded event table. Immutable after load: every filter run
/// produces a new index set over it, never a mutation of it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    events: Vec<Event>,
}

impl Dataset {
    pub fn new(events: Vec<Event>) -> Self {
        Dataset { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct dates present, newest first.
    pub fn dates_desc(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.events.iter().map(|e| e.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates.reverse();
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_flag_roundtrip() {
        assert_eq!(Language::try_from(0u8), Ok(Language::English));
        assert_eq!(Language::try_from(1u8), Ok(Language::Native));
        assert_eq!(Language::try_from(2u8), Err(2));
    }

    #[test]
    fn test_dimension_from_str() {
        assert_eq!("country".parse::<Dimension>().unwrap(), Dimension::Country);
        assert_eq!(
            "subcategory".parse::<Dimension>().unwrap(),
            Dimension::Subcategory
        );
        let err = "tone".parse::<Dimension>().unwrap_err();
        assert!(matches!(err, SelectionError::UnknownDimension(name) if name == "tone"));
    }

    #[test]
    fn test_dates_desc_dedups_and_orders() {
        use crate::test_utils::{date, event};
        let mk = |day: &str| event(1, day, Language::English);
        let ds = Dataset::new(vec![
            mk("2022-03-02"),
            mk("2022-03-01"),
            mk("2022-03-02"),
            mk("2022-03-03"),
        ]);
        assert_eq!(
            ds.dates_desc(),
            vec![date("2022-03-03"), date("2022-03-02"), date("2022-03-01")]
        );
    }
}
