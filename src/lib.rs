//! Faceted filtering and aggregation engine for GDELT event exports.
//!
//! The crate loads a static table of geo-tagged news events once per
//! session, derives the distinct option sets for every filterable
//! dimension (including the category → subcategory cascade), compiles a
//! declarative [`FilterSpec`] into a conjunction [`Predicate`], selects
//! the matching subset, and aggregates it into scorecard metrics and
//! grouped counts. Rendering (charts, map, grid, article viewer) and the
//! spreadsheet download are external collaborators consuming these
//! outputs; see [`data::export`] for the byte-stream boundary.

pub mod data;
pub mod error;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;

pub use data::aggregate::{grouped_counts, summarize, GroupedCount, Metrics};
pub use data::catalog::FacetCatalog;
pub use data::export::write_csv;
pub use data::filter::{
    DateInterval, FacetSelection, FilterSpec, Predicate, DEFAULT_COUNTRIES,
};
pub use data::loader::load_csv;
pub use data::model::{Dataset, Dimension, Event, Language};
pub use data::select::{select, Subset};
pub use error::{LoadError, SelectionError};
pub use session::Session;
