use std::sync::Arc;

use super::filter::Predicate;
use super::model::{Dataset, Event};

// ---------------------------------------------------------------------------
// Subset – a filtered, order-preserving view of the dataset
// ---------------------------------------------------------------------------

/// The rows passing a predicate, as indices into the shared immutable
/// dataset. Row order is the dataset's load order; any display ordering is
/// applied by the presentation layer afterwards.
///
/// Every downstream output of one refresh (metrics, grouped counts, table,
/// map, export) is computed from one `Subset` value, so they can never
/// disagree about which rows are in view.
#[derive(Debug, Clone)]
pub struct Subset {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
}

impl Subset {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Positions of the selected rows in the source table, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.indices.iter().map(|&i| &self.dataset.events()[i])
    }

    /// The nth row of the subset (presentation row picks).
    pub fn get(&self, nth: usize) -> Option<&Event> {
        self.indices
            .get(nth)
            .map(|&i| &self.dataset.events()[i])
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

/// Apply a predicate to the full table. One linear pass; the source table
/// is read-only and shared, so the subset only records matching positions.
pub fn select(dataset: &Arc<Dataset>, predicate: &Predicate) -> Subset {
    let indices: Vec<usize> = dataset
        .events()
        .iter()
        .enumerate()
        .filter(|(_, event)| predicate.matches(event))
        .map(|(i, _)| i)
        .collect();
    log::debug!("selected {} of {} events", indices.len(), dataset.len());
    Subset {
        dataset: Arc::clone(dataset),
        indices,
    }
}
