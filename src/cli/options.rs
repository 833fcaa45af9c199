//! `rigfit options` - compatible parts for one category

use anyhow::Result;

use crate::cli::FormArgs;
use crate::engine::{compute_recommendation, diy};
use crate::loader::Documents;
use crate::models::Category;

pub fn run(docs: &Documents, category: &str, args: &FormArgs) -> Result<()> {
    let category: Category = category.parse()?;
    let form = args.resolve(&docs.rules)?;
    let result = compute_recommendation(&docs.rules, &docs.catalog, &form)?;

    let options = diy::options_for(category, &docs.catalog, &result.selection, &docs.rules);
    let current = result.selection.summary(category);

    println!("Options for {} ({} compatible):", category.label(), options.len());
    for option in options {
        let marker = match &current {
            Some(picked) if picked.id == option.id => "*",
            _ => " ",
        };
        println!(
            " {marker} {:<16} {:<28} ¥{:.0}-{:.0}  score {:.0}",
            option.id, option.name, option.price_range.min, option.price_range.max, option.score
        );
    }
    Ok(())
}
