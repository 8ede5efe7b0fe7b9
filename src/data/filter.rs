use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::FacetCatalog;
use super::model::{Dataset, Event, Language};

/// Countries pre-selected when a session starts: Portugal plus its watch
/// list of diplomatically/economically linked countries.
pub const DEFAULT_COUNTRIES: [&str; 5] = ["Portugal", "Spain", "Brazil", "Angola", "Cape Verde"];

/// How many distinct trailing dates the default window covers (the export
/// holds one week of scrapes, D-1 through D-7).
const DEFAULT_WINDOW_DAYS: usize = 7;

// ---------------------------------------------------------------------------
// FacetSelection – tri-state per-dimension selection
// ---------------------------------------------------------------------------

/// Selection state of one facet: either no filter at all, or an explicit
/// value subset. An explicit subset equal to the full universe behaves
/// identically to `All`; an explicit empty subset matches nothing.
///
/// The tri-state replaces comparing selected-count against universe-count,
/// which breaks the moment the universe changes size between loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetSelection<T: Ord> {
    All,
    Only(BTreeSet<T>),
}

impl<T: Ord> FacetSelection<T> {
    pub fn only(values: impl IntoIterator<Item = T>) -> Self {
        FacetSelection::Only(values.into_iter().collect())
    }

    pub fn matches(&self, value: &T) -> bool {
        match self {
            FacetSelection::All => true,
            FacetSelection::Only(selected) => selected.contains(value),
        }
    }

    /// True when this selection can never match any record.
    pub fn excludes_everything(&self) -> bool {
        matches!(self, FacetSelection::Only(selected) if selected.is_empty())
    }
}

// ---------------------------------------------------------------------------
// DateInterval – inclusive day range
// ---------------------------------------------------------------------------

/// Closed date interval at day granularity; both endpoints included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateInterval { start, end }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        DateInterval::new(day, day)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

// ---------------------------------------------------------------------------
// FilterSpec – the per-session filter state
// ---------------------------------------------------------------------------

/// The complete filter choice of one refresh. Replaced wholesale on every
/// submit; never merged field-by-field into the previous spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub dates: DateInterval,
    pub languages: FacetSelection<Language>,
    pub countries: FacetSelection<String>,
    pub categories: FacetSelection<String>,
    pub subcategories: FacetSelection<String>,
}

impl FilterSpec {
    /// Session-start defaults: the span of the most recent week of distinct
    /// dates, all languages, the fixed country watch list, and no category
    /// or subcategory restriction.
    pub fn default_for(dataset: &Dataset) -> Self {
        let recent = dataset.dates_desc();
        let window: Vec<NaiveDate> = recent.into_iter().take(DEFAULT_WINDOW_DAYS).collect();
        let dates = match (window.last(), window.first()) {
            (Some(&start), Some(&end)) => DateInterval::new(start, end),
            _ => DateInterval::single_day(NaiveDate::MIN),
        };
        FilterSpec {
            dates,
            languages: FacetSelection::All,
            countries: FacetSelection::only(DEFAULT_COUNTRIES.map(String::from)),
            categories: FacetSelection::All,
            subcategories: FacetSelection::All,
        }
    }
}

// ---------------------------------------------------------------------------
// Predicate – the compiled conjunction over one event
// ---------------------------------------------------------------------------

/// A filter spec compiled against a catalog: matches a record iff every
/// dimension matches (AND of per-dimension OR-sets).
#[derive(Debug, Clone)]
pub struct Predicate {
    dates: DateInterval,
    languages: FacetSelection<Language>,
    countries: FacetSelection<String>,
    categories: FacetSelection<String>,
    subcategories: FacetSelection<String>,
}

impl Predicate {
    /// Compile a spec, applying the cascade consistency rule: an explicit
    /// subcategory selection is intersected with the subcategory universe
    /// valid under the spec's category selection, so picks that reference a
    /// now-excluded category drop out silently instead of erroring.
    pub fn build(spec: &FilterSpec, catalog: &FacetCatalog) -> Self {
        let subcategories = match &spec.subcategories {
            FacetSelection::All => FacetSelection::All,
            FacetSelection::Only(picked) => {
                let valid: BTreeSet<String> =
                    catalog.subcategories_for(&spec.categories).into_iter().collect();
                FacetSelection::Only(picked.intersection(&valid).cloned().collect())
            }
        };
        Predicate {
            dates: spec.dates,
            languages: spec.languages.clone(),
            countries: spec.countries.clone(),
            categories: spec.categories.clone(),
            subcategories,
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.dates.contains(event.date)
            && self.languages.matches(&event.language)
            && self.countries.matches(&event.country)
            && self.categories.matches(&event.category)
            && self.subcategories.matches(&event.subcategory)
    }

    /// The subcategory set actually in force after the cascade intersection.
    pub fn effective_subcategories(&self) -> &FacetSelection<String> {
        &self.subcategories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, fixture_dataset};

    fn catalog() -> FacetCatalog {
        FacetCatalog::new(&fixture_dataset())
    }

    fn all_spec() -> FilterSpec {
        FilterSpec {
            dates: DateInterval::new(date("2022-03-01"), date("2022-03-04")),
            languages: FacetSelection::All,
            countries: FacetSelection::All,
            categories: FacetSelection::All,
            subcategories: FacetSelection::All,
        }
    }

    #[test]
    fn test_predicate_is_conjunction_of_all_dimensions() {
        let ds = fixture_dataset();
        let mut spec = all_spec();
        spec.languages = FacetSelection::only([Language::English]);
        spec.countries = FacetSelection::only(["Portugal".to_string()]);
        let pred = Predicate::build(&spec, &catalog());

        for event in ds.events() {
            let expected = event.language == Language::English && event.country == "Portugal";
            assert_eq!(pred.matches(event), expected, "event {}", event.id);
        }
    }

    #[test]
    fn test_date_interval_inclusive_both_ends() {
        let interval = DateInterval::new(date("2022-03-01"), date("2022-03-03"));
        assert!(interval.contains(date("2022-03-01")));
        assert!(interval.contains(date("2022-03-03")));
        assert!(!interval.contains(date("2022-02-28")));
        assert!(!interval.contains(date("2022-03-04")));
    }

    #[test]
    fn test_stale_subcategory_selection_is_intersected_away() {
        // Subcategories picked while FIGHT was selected, then the category
        // selection narrows to PROTEST only.
        let mut spec = all_spec();
        spec.categories = FacetSelection::only(["PROTEST".to_string()]);
        spec.subcategories = FacetSelection::only([
            "Hunger strike".to_string(),
            "Impose blockade".to_string(), // parent FIGHT, now excluded
        ]);
        let pred = Predicate::build(&spec, &catalog());

        assert_eq!(
            pred.effective_subcategories(),
            &FacetSelection::only(["Hunger strike".to_string()])
        );

        let ds = fixture_dataset();
        let matched: Vec<i64> = ds
            .events()
            .iter()
            .filter(|e| pred.matches(e))
            .map(|e| e.id)
            .collect();
        assert_eq!(matched, [2]);
    }

    #[test]
    fn test_empty_dimension_set_matches_nothing() {
        let mut spec = all_spec();
        spec.countries = FacetSelection::only([]);
        assert!(spec.countries.excludes_everything());
        let pred = Predicate::build(&spec, &catalog());
        assert!(fixture_dataset().events().iter().all(|e| !pred.matches(e)));
    }

    #[test]
    fn test_default_spec_covers_trailing_week_and_watch_list() {
        let ds = fixture_dataset();
        let spec = FilterSpec::default_for(&ds);
        // Fixture has four distinct dates, all within the week window.
        assert_eq!(spec.dates, DateInterval::new(date("2022-03-01"), date("2022-03-04")));
        assert!(spec.countries.matches(&"Portugal".to_string()));
        assert!(spec.countries.matches(&"Cape Verde".to_string()));
        assert!(!spec.countries.matches(&"France".to_string()));
        assert_eq!(spec.categories, FacetSelection::All);
    }

    #[test]
    fn test_spec_json_roundtrip() {
        let spec = FilterSpec::default_for(&fixture_dataset());
        let json = serde_json::to_string(&spec).unwrap();
        let back: FilterSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
