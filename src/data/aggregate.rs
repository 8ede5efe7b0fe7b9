use std::collections::BTreeMap;

use serde::Serialize;

use super::model::Dimension;
use super::select::Subset;

// ---------------------------------------------------------------------------
// Metrics – the scorecard row
// ---------------------------------------------------------------------------

/// Summary metrics over one subset. A mean is `None` when the subset holds
/// no value for it ("no data"), never NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub count: usize,
    pub mean_tone: Option<f64>,
    pub mean_articles: Option<f64>,
    pub mean_goldstein: Option<f64>,
}

/// One bar segment of a two-dimensional grouped count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedCount {
    pub first: String,
    pub second: String,
    pub count: usize,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Scorecard metrics for a subset. Means skip missing cells; an empty
/// subset reports `count == 0` and no-data means instead of dividing by
/// zero.
pub fn summarize(subset: &Subset) -> Metrics {
    Metrics {
        count: subset.len(),
        mean_tone: mean(subset.iter().filter_map(|e| e.tone)),
        mean_articles: mean(subset.iter().filter_map(|e| e.num_articles.map(f64::from))),
        mean_goldstein: mean(subset.iter().filter_map(|e| e.goldstein)),
    }
}

/// Row counts grouped by the cross-product of two dimensions (the
/// category × language bar chart), sorted ascending by count. Ties keep
/// the value-pair order so repeated runs render identically. An empty
/// subset yields an empty sequence.
pub fn grouped_counts(subset: &Subset, first: Dimension, second: Dimension) -> Vec<GroupedCount> {
    let mut groups: BTreeMap<(String, String), usize> = BTreeMap::new();
    for event in subset.iter() {
        let key = (first.value_of(event), second.value_of(event));
        *groups.entry(key).or_insert(0) += 1;
    }

    let mut counts: Vec<GroupedCount> = groups
        .into_iter()
        .map(|((first, second), count)| GroupedCount {
            first,
            second,
            count,
        })
        .collect();
    // Stable sort over the BTreeMap's key order gives a deterministic
    // tie-break.
    counts.sort_by_key(|g| g.count);
    counts
}
