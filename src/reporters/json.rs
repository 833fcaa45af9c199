//! JSON reporter for machine consumption

use anyhow::Result;

use crate::models::BuildResult;

pub fn render(result: &BuildResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
