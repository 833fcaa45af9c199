//! Manual-override helpers
//!
//! A user can swap any single part of a resolved build. Option listings
//! narrow each category to parts compatible with what is already picked,
//! falling back to the full catalog array rather than offering nothing,
//! and cross-part mismatches surface as warnings instead of being
//! rejected outright.

use crate::catalog::Catalog;
use crate::models::{Category, PartPick, PartSummary, Selection};
use crate::rules::RuleTable;

/// Compatible choices for one category given the current selection.
pub fn options_for(
    category: Category,
    catalog: &Catalog,
    selection: &Selection,
    rules: &RuleTable,
) -> Vec<PartSummary> {
    let constraints = &rules.constraints;
    match category {
        Category::Motherboard => {
            let Some(cpu) = selection.cpu.as_ref() else {
                return catalog.summaries(category);
            };
            let matched: Vec<PartSummary> = catalog
                .motherboards
                .iter()
                .filter(|b| b.platform == cpu.platform)
                .map(|b| PartSummary::of(category, b))
                .collect();
            non_empty_or_all(matched, catalog, category)
        }
        Category::Memory => {
            let Some(board) = selection.motherboard.as_ref() else {
                return catalog.summaries(category);
            };
            let matched: Vec<PartSummary> = catalog
                .memory
                .iter()
                .filter(|m| m.memory_type == board.memory_type)
                .map(|m| PartSummary::of(category, m))
                .collect();
            non_empty_or_all(matched, catalog, category)
        }
        Category::Case => {
            let Some(board) = selection.motherboard.as_ref() else {
                return catalog.summaries(category);
            };
            let matched: Vec<PartSummary> = catalog
                .cases
                .iter()
                .filter(|c| c.form_factor == board.form_factor)
                .map(|c| PartSummary::of(category, c))
                .collect();
            non_empty_or_all(matched, catalog, category)
        }
        Category::Psu => {
            let need = selection.estimated_power().round() * constraints.psu_headroom();
            let matched: Vec<PartSummary> = catalog
                .psu
                .iter()
                .filter(|p| p.watt >= need)
                .map(|p| PartSummary::of(category, p))
                .collect();
            non_empty_or_all(matched, catalog, category)
        }
        Category::Cooler => {
            let cpu_tdp = selection.cpu.as_ref().map(|c| c.tdp).unwrap_or(0.0);
            let need = cpu_tdp * constraints.cooler_tdp_ratio();
            let matched: Vec<PartSummary> = catalog
                .coolers
                .iter()
                .filter(|c| c.tdp_support >= need)
                .map(|c| PartSummary::of(category, c))
                .collect();
            non_empty_or_all(matched, catalog, category)
        }
        // CPU, GPU, and storage are unconstrained by the rest of the build.
        _ => catalog.summaries(category),
    }
}

fn non_empty_or_all(
    matched: Vec<PartSummary>,
    catalog: &Catalog,
    category: Category,
) -> Vec<PartSummary> {
    if matched.is_empty() {
        catalog.summaries(category)
    } else {
        matched
    }
}

/// A new selection with one category replaced. The rest of the build is
/// untouched; compatibility is re-checked via [`diy_warnings`].
pub fn apply_override(selection: &Selection, pick: PartPick) -> Selection {
    let mut next = selection.clone();
    match pick {
        PartPick::Cpu(p) => next.cpu = Some(p),
        PartPick::Gpu(p) => next.gpu = Some(p),
        PartPick::Motherboard(p) => next.motherboard = Some(p),
        PartPick::Memory(p) => next.memory = Some(p),
        PartPick::Storage(p) => next.storage = Some(p),
        PartPick::Psu(p) => next.psu = Some(p),
        PartPick::Cooler(p) => next.cooler = Some(p),
        PartPick::Case(p) => next.case = Some(p),
    }
    next
}

/// Cross-part compatibility warnings for a (possibly hand-edited) build.
/// Checks involving an absent part are skipped.
pub fn diy_warnings(selection: &Selection, rules: &RuleTable) -> Vec<String> {
    let mut warnings = Vec::new();
    let constraints = &rules.constraints;

    if let (Some(cpu), Some(board)) = (&selection.cpu, &selection.motherboard) {
        if cpu.platform != board.platform {
            warnings.push("CPU and motherboard platforms do not match.".to_string());
        }
    }
    if let (Some(board), Some(memory)) = (&selection.motherboard, &selection.memory) {
        if board.memory_type != memory.memory_type {
            warnings.push("Memory generation does not match the motherboard.".to_string());
        }
    }
    if let (Some(board), Some(case)) = (&selection.motherboard, &selection.case) {
        if board.form_factor != case.form_factor {
            warnings.push("Motherboard form factor does not match the case.".to_string());
        }
    }
    if let Some(psu) = &selection.psu {
        let need = selection.estimated_power().round() * constraints.psu_headroom();
        if psu.watt < need {
            warnings.push("PSU wattage is too low; pick a higher tier.".to_string());
        }
    }
    if let (Some(cooler), Some(cpu)) = (&selection.cooler, &selection.cpu) {
        let need = cpu.tdp * constraints.cooler_tdp_ratio();
        if cooler.tdp_support < need {
            warnings.push("Cooler rating is marginal; consider an upgrade.".to_string());
        }
    }
    warnings
}
