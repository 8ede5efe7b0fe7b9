use std::collections::{BTreeMap, HashSet};

use super::filter::FacetSelection;
use super::model::{Dataset, Dimension, Language};

// ---------------------------------------------------------------------------
// FacetCatalog – distinct values per dimension + the category cascade
// ---------------------------------------------------------------------------

/// Distinct value sets for every facetable dimension, derived once from the
/// full table, plus the subcategory→category mapping that drives the
/// cascading filter.
///
/// Value order is first-seen load order. That matches what the source table
/// itself displays and is stable across refreshes because the table is
/// immutable.
#[derive(Debug, Clone)]
pub struct FacetCatalog {
    languages: Vec<Language>,
    countries: Vec<String>,
    categories: Vec<String>,
    subcategories: Vec<String>,
    /// Subcategory → parent category. Many-to-one by dataset invariant;
    /// the first pairing seen wins.
    parent: BTreeMap<String, String>,
}

impl FacetCatalog {
    pub fn new(dataset: &Dataset) -> Self {
        let mut languages = Vec::new();
        let mut countries = Vec::new();
        let mut categories = Vec::new();
        let mut subcategories = Vec::new();
        let mut parent = BTreeMap::new();

        let mut seen_lang = HashSet::new();
        let mut seen_country = HashSet::new();
        let mut seen_cat = HashSet::new();
        let mut seen_sub = HashSet::new();

        for event in dataset.events() {
            if seen_lang.insert(event.language) {
                languages.push(event.language);
            }
            if seen_country.insert(event.country.clone()) {
                countries.push(event.country.clone());
            }
            if seen_cat.insert(event.category.clone()) {
                categories.push(event.category.clone());
            }
            if seen_sub.insert(event.subcategory.clone()) {
                subcategories.push(event.subcategory.clone());
                parent.insert(event.subcategory.clone(), event.category.clone());
            }
        }

        FacetCatalog {
            languages,
            countries,
            categories,
            subcategories,
            parent,
        }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn subcategories(&self) -> &[String] {
        &self.subcategories
    }

    /// Parent category of a subcategory, if the subcategory exists at all.
    pub fn parent_category(&self, subcategory: &str) -> Option<&str> {
        self.parent.get(subcategory).map(String::as_str)
    }

    /// Distinct display values for a dimension, duplicate-free and in
    /// first-seen order. Feeds the filter widgets.
    pub fn distinct_values(&self, dimension: Dimension) -> Vec<String> {
        match dimension {
            Dimension::Language => self
                .languages
                .iter()
                .map(|l| l.label().to_string())
                .collect(),
            Dimension::Country => self.countries.clone(),
            Dimension::Category => self.categories.clone(),
            Dimension::Subcategory => self.subcategories.clone(),
        }
    }

    /// Valid subcategory options under a category selection: exactly the
    /// subcategories whose parent category is selected, in catalog order.
    ///
    /// `All` (and, equivalently, an explicit selection covering every
    /// category) yields the full subcategory universe; an explicit empty
    /// selection yields no options at all.
    pub fn subcategories_for(&self, categories: &FacetSelection<String>) -> Vec<String> {
        match categories {
            FacetSelection::All => self.subcategories.clone(),
            FacetSelection::Only(selected) => self
                .subcategories
                .iter()
                .filter(|sub| {
                    self.parent
                        .get(*sub)
                        .is_some_and(|cat| selected.contains(cat))
                })
                .cloned()
                .collect(),
        }
    }
}
