//! Text (terminal) reporter with colors and formatting

use anyhow::Result;

use crate::models::{BuildResult, Category};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Render a build result as formatted terminal output
pub fn render(result: &BuildResult) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Build Recommendation{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Budget: {BOLD}{}{RESET} (¥{:.0}-{:.0})  Scenario: {BOLD}{}{RESET}  Mode: {BOLD}{}{RESET}\n\n",
        result.budget.id, result.budget.min, result.budget.max, result.scenario.id, result.mode.id
    ));

    out.push_str(&format!("{BOLD}PARTS{RESET}\n"));
    for summary in result.selection.summaries(&Category::DISPLAY_ORDER) {
        let mut line = format!(
            "  {:<12} {:<28} ¥{:.0}-{:.0}",
            summary.category.label(),
            summary.name,
            summary.price_range.min,
            summary.price_range.max
        );
        if summary.category == Category::Memory {
            line.push_str(&format!("  ({} sticks)", result.memory_sticks));
        }
        line.push('\n');
        out.push_str(&line);
    }
    out.push('\n');

    out.push_str(&format!(
        "Total: {BOLD}¥{:.0}-{:.0}{RESET}  Estimated power: {BOLD}{:.0} W{RESET}\n",
        result.total_min, result.total_max, result.estimated_power
    ));

    if !result.reasons.is_empty() {
        out.push_str(&format!("\n{BOLD}REASONS{RESET}\n"));
        for reason in &result.reasons {
            out.push_str(&format!("  {DIM}-{RESET} {reason}\n"));
        }
    }

    if !result.risks.is_empty() {
        out.push_str(&format!("\n{BOLD}RISKS{RESET}\n"));
        for risk in &result.risks {
            out.push_str(&format!("  {YELLOW}!{RESET} {risk}\n"));
        }
    }

    if !result.warnings.is_empty() {
        out.push_str(&format!("\n{BOLD}WARNINGS{RESET}\n"));
        for warning in &result.warnings {
            out.push_str(&format!("  {RED}!{RESET} {warning}\n"));
        }
    }

    Ok(out)
}
