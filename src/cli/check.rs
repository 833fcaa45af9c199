//! `rigfit check` - re-check a build after manual part swaps

use anyhow::Result;

use crate::cli::FormArgs;
use crate::engine::{compute_recommendation, diy};
use crate::error::RigError;
use crate::loader::Documents;
use crate::models::Category;

/// Split a `category=part-id` override into its halves.
fn parse_override(spec: &str) -> Result<(Category, &str), RigError> {
    let (category, id) = spec
        .split_once('=')
        .ok_or_else(|| RigError::BadOverride(spec.to_string()))?;
    let category: Category = category.trim().parse()?;
    let id = id.trim();
    if id.is_empty() {
        return Err(RigError::BadOverride(spec.to_string()));
    }
    Ok((category, id))
}

pub fn run(docs: &Documents, overrides: &[String], args: &FormArgs) -> Result<()> {
    let form = args.resolve(&docs.rules)?;
    let result = compute_recommendation(&docs.rules, &docs.catalog, &form)?;

    let mut selection = result.selection;
    for spec in overrides {
        let (category, id) = parse_override(spec)?;
        let pick = docs.catalog.find(category, id)?;
        selection = diy::apply_override(&selection, pick);
    }

    println!("Build:");
    for summary in selection.summaries(&Category::DISPLAY_ORDER) {
        println!(
            "  {:<12} {:<28} ¥{:.0}-{:.0}",
            summary.category.label(),
            summary.name,
            summary.price_range.min,
            summary.price_range.max
        );
    }
    println!(
        "\nTotal: ¥{:.0}-{:.0}  Estimated power: {:.0} W",
        selection.total_min(),
        selection.total_max(),
        selection.estimated_power().round()
    );

    let warnings = diy::diy_warnings(&selection, &docs.rules);
    if warnings.is_empty() {
        println!("\nNo compatibility issues.");
    } else {
        println!("\nCompatibility warnings:");
        for warning in &warnings {
            println!("  ! {warning}");
        }
    }
    Ok(())
}
