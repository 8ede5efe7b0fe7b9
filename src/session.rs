use std::sync::Arc;

use crate::data::aggregate::{grouped_counts, summarize, GroupedCount, Metrics};
use crate::data::catalog::FacetCatalog;
use crate::data::filter::{FilterSpec, Predicate};
use crate::data::model::{Dataset, Dimension, Event};
use crate::data::select::{select, Subset};
use crate::error::SelectionError;

// ---------------------------------------------------------------------------
// Session – per-user filter state and the published view
// ---------------------------------------------------------------------------

/// Everything one refresh derives from one subset. Built as a whole and
/// swapped in as a whole, so no reader can pair metrics from one subset
/// with a chart from another.
#[derive(Debug, Clone)]
struct View {
    subset: Subset,
    metrics: Metrics,
    category_language: Vec<GroupedCount>,
}

/// One user's exploration session: the current filter spec plus the view
/// derived from it. The base dataset and its catalog sit behind `Arc` and
/// may be shared read-only by any number of concurrent sessions; each
/// session owns its spec, view and row pick.
pub struct Session {
    dataset: Arc<Dataset>,
    catalog: Arc<FacetCatalog>,
    spec: FilterSpec,
    view: View,
    /// Position within the current subset picked for the article viewer.
    selected_row: Option<usize>,
}

impl Session {
    /// Start a session with the default filter spec and run the first
    /// refresh. The catalog is computed here, once per dataset instance.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let catalog = Arc::new(FacetCatalog::new(&dataset));
        Session::with_catalog(dataset, catalog)
    }

    /// Start a session against an already-derived catalog (sessions sharing
    /// one dataset share its catalog too).
    pub fn with_catalog(dataset: Arc<Dataset>, catalog: Arc<FacetCatalog>) -> Self {
        let spec = FilterSpec::default_for(&dataset);
        let view = derive_view(&dataset, &catalog, &spec);
        Session {
            dataset,
            catalog,
            spec,
            view,
            selected_row: None,
        }
    }

    /// Replace the filter spec wholesale and refresh synchronously. All
    /// derived outputs are rebuilt from the new subset before anything is
    /// published; the row pick resets because it indexed the old subset.
    pub fn apply(&mut self, spec: FilterSpec) {
        let view = derive_view(&self.dataset, &self.catalog, &spec);
        log::info!(
            "refresh: {} of {} events match",
            view.subset.len(),
            self.dataset.len()
        );
        self.spec = spec;
        self.view = view;
        self.selected_row = None;
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn catalog(&self) -> &FacetCatalog {
        &self.catalog
    }

    /// The current filtered subset, shared by every view of this refresh.
    pub fn subset(&self) -> &Subset {
        &self.view.subset
    }

    pub fn metrics(&self) -> &Metrics {
        &self.view.metrics
    }

    /// Grouped counts feeding the category × language bar chart.
    pub fn category_language_counts(&self) -> &[GroupedCount] {
        &self.view.category_language
    }

    /// Grouped counts over caller-named dimensions. An unknown dimension
    /// name fails this call only; the published view stays as it was.
    pub fn grouped_by(&self, first: &str, second: &str) -> Result<Vec<GroupedCount>, SelectionError> {
        let first: Dimension = first.parse()?;
        let second: Dimension = second.parse()?;
        Ok(grouped_counts(&self.view.subset, first, second))
    }

    /// Subcategory options valid under the spec's current category
    /// selection, for the cascading subcategory widget.
    pub fn subcategory_options(&self) -> Vec<String> {
        self.catalog.subcategories_for(&self.spec.categories)
    }

    /// Pick (or clear) the nth row of the current subset for the article
    /// viewer. Out-of-range picks clear the selection.
    pub fn pick_row(&mut self, nth: Option<usize>) {
        self.selected_row = nth.filter(|&n| n < self.view.subset.len());
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.selected_row.and_then(|n| self.view.subset.get(n))
    }

    pub fn selected_url(&self) -> Option<&str> {
        self.selected_event().map(|e| e.source_url.as_str())
    }
}

fn derive_view(dataset: &Arc<Dataset>, catalog: &FacetCatalog, spec: &FilterSpec) -> View {
    let predicate = Predicate::build(spec, catalog);
    let subset = select(dataset, &predicate);
    let metrics = summarize(&subset);
    let category_language = grouped_counts(&subset, Dimension::Category, Dimension::Language);
    View {
        subset,
        metrics,
        category_language,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{DateInterval, FacetSelection};
    use crate::data::model::Language;
    use crate::test_utils::{date, fixture_dataset};

    fn open_spec() -> FilterSpec {
        FilterSpec {
            dates: DateInterval::new(date("2022-03-01"), date("2022-03-04")),
            languages: FacetSelection::All,
            countries: FacetSelection::All,
            categories: FacetSelection::All,
            subcategories: FacetSelection::All,
        }
    }

    #[test]
    fn test_new_session_uses_defaults_and_publishes_a_view() {
        let session = Session::new(Arc::new(fixture_dataset()));
        assert!(session.spec().countries.matches(&"Portugal".to_string()));
        // Fixture rows are all within the default window and watch list.
        assert_eq!(session.metrics().count, session.subset().len());
        assert_eq!(session.subset().len(), 8);
    }

    #[test]
    fn test_apply_replaces_spec_wholesale_and_keeps_views_consistent() {
        let mut session = Session::new(Arc::new(fixture_dataset()));
        let mut spec = open_spec();
        spec.languages = FacetSelection::only([Language::English]);
        session.apply(spec.clone());

        assert_eq!(session.spec(), &spec);
        assert_eq!(session.subset().len(), 5);
        assert_eq!(session.metrics().count, 5);
        let chart_total: usize = session
            .category_language_counts()
            .iter()
            .map(|g| g.count)
            .sum();
        assert_eq!(chart_total, 5);
    }

    #[test]
    fn test_subcategory_options_follow_category_selection() {
        let mut session = Session::new(Arc::new(fixture_dataset()));
        let mut spec = open_spec();
        spec.categories = FacetSelection::only(["FIGHT".to_string()]);
        session.apply(spec);
        assert_eq!(
            session.subcategory_options(),
            ["Use conventional force", "Impose blockade"]
        );
    }

    #[test]
    fn test_row_pick_exposes_single_record_and_resets_on_refresh() {
        let mut session = Session::new(Arc::new(fixture_dataset()));
        session.apply(open_spec());
        session.pick_row(Some(0));
        assert_eq!(session.selected_event().map(|e| e.id), Some(1));
        assert_eq!(session.selected_url(), Some("https://news.example/1"));

        // Out-of-range pick clears.
        session.pick_row(Some(999));
        assert!(session.selected_event().is_none());

        session.pick_row(Some(0));
        session.apply(open_spec());
        assert!(session.selected_event().is_none());
    }

    #[test]
    fn test_grouped_by_rejects_unknown_dimension_and_keeps_view() {
        let mut session = Session::new(Arc::new(fixture_dataset()));
        session.apply(open_spec());
        let before = session.metrics().clone();

        let err = session.grouped_by("category", "tone").unwrap_err();
        assert!(matches!(err, SelectionError::UnknownDimension(_)));
        assert_eq!(session.metrics(), &before);

        let counts = session.grouped_by("category", "language").unwrap();
        assert_eq!(counts, session.category_language_counts());
    }

    #[test]
    fn test_sessions_share_dataset_but_not_filter_state() {
        let dataset = Arc::new(fixture_dataset());
        let catalog = Arc::new(FacetCatalog::new(&dataset));
        let mut a = Session::with_catalog(Arc::clone(&dataset), Arc::clone(&catalog));
        let b = Session::with_catalog(Arc::clone(&dataset), catalog);

        let mut spec = open_spec();
        spec.countries = FacetSelection::only(["Spain".to_string()]);
        a.apply(spec);

        assert_eq!(a.subset().len(), 2);
        assert_eq!(b.subset().len(), 8);
        assert_eq!(dataset.len(), 8);
    }
}
