//! `rigfit recommend` - compute and render a full build

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::cli::FormArgs;
use crate::engine::compute_recommendation;
use crate::loader::Documents;
use crate::reporters::{self, OutputFormat};

pub fn run(docs: &Documents, args: &FormArgs, format: &str, output: Option<&Path>) -> Result<()> {
    let form = args.resolve(&docs.rules)?;
    let result = compute_recommendation(&docs.rules, &docs.catalog, &form)?;
    info!(source = %docs.source, "recommendation computed");

    let format: OutputFormat = format.parse()?;
    let rendered = reporters::render(&result, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {format} report to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
