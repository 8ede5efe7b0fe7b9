use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use gdelt_explorer::{Dimension, FilterSpec, Session};

/// Console stand-in for the dashboard: load an export, optionally apply a
/// JSON filter spec, and print what the widgets would show.
///
/// Usage: `gdelt-explorer <events.csv> [filter-spec.json]`
fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (events_path, spec_path) = match args.as_slice() {
        [events] => (events.as_str(), None),
        [events, spec] => (events.as_str(), Some(spec.as_str())),
        _ => bail!("usage: gdelt-explorer <events.csv> [filter-spec.json]"),
    };

    let dataset = gdelt_explorer::load_csv(Path::new(events_path))?;
    let mut session = Session::new(Arc::new(dataset));

    if let Some(path) = spec_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading filter spec {path}"))?;
        let spec: FilterSpec =
            serde_json::from_str(&text).with_context(|| format!("parsing filter spec {path}"))?;
        session.apply(spec);
    }

    println!("Facets:");
    for dimension in Dimension::ALL {
        let values = session.catalog().distinct_values(dimension);
        println!("  {dimension}: {} distinct values", values.len());
    }
    println!(
        "  subcategories under current category selection: {}",
        session.subcategory_options().len()
    );

    let metrics = session.metrics();
    println!("\nMetrics over {} matching events:", metrics.count);
    println!("  mean tone:            {}", format_mean(metrics.mean_tone));
    println!("  mean article count:   {}", format_mean(metrics.mean_articles));
    println!("  mean Goldstein scale: {}", format_mean(metrics.mean_goldstein));

    println!("\nEvents by category and source language:");
    if session.category_language_counts().is_empty() {
        println!("  (no results)");
    }
    for group in session.category_language_counts() {
        println!("  {:>6}  {} / {}", group.count, group.first, group.second);
    }

    Ok(())
}

fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "no data".to_string(),
    }
}
