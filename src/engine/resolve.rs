//! Per-category candidate pipelines
//!
//! Each resolver narrows its category's catalog array using scenario,
//! form, and cross-part constraints, then hands the pool to
//! [`pick_best`]. Wherever a constraint could strand the user with
//! nothing, the step falls back to the wider pool instead of failing;
//! hard eligibility rules (brand, minimum score, VRAM) do not fall back
//! and surface as an unresolved category upstream.

use crate::catalog::Catalog;
use crate::engine::select::pick_best;
use crate::models::{
    CaseShell, Category, Cooler, Cpu, Form, Gpu, GpuBrandPref, MemoryKit, MemoryTypePref,
    Motherboard, Psu, StorageDrive,
};
use crate::rules::{Constraints, Mode, RuleTable, Scenario};

/// Budget midpoint above which design/AI builds prefer bigger drives.
pub const LARGE_STORAGE_BUDGET: f64 = 9000.0;

/// Preferred drive capacity (TB) for those builds.
pub const LARGE_STORAGE_TB: f64 = 2.0;

/// DDR generation that triggers the dedicated stick-count rule.
pub const DDR5: &str = "DDR5";

pub fn resolve_gpu<'a>(
    catalog: &'a Catalog,
    rules: &RuleTable,
    scenario: &Scenario,
    form: &Form,
    target: f64,
    mode: &Mode,
    tolerance: f64,
) -> Option<&'a Gpu> {
    let pool: Vec<&Gpu> = match &form.gpu_brand {
        GpuBrandPref::None => catalog.gpus.iter().filter(|g| g.is_integrated()).collect(),
        pref => catalog
            .gpus
            .iter()
            .filter(|g| match pref {
                GpuBrandPref::Brand(b) => &g.brand == b,
                _ => true,
            })
            .filter(|g| g.score >= scenario.min_score(Category::Gpu))
            .filter(|g| g.vram >= rules.min_vram_for(scenario, &g.brand))
            .collect(),
    };
    pick_best(&pool, target, mode, tolerance)
}

pub fn resolve_cpu<'a>(
    catalog: &'a Catalog,
    scenario: &Scenario,
    memory_pref: &MemoryTypePref,
    target: f64,
    mode: &Mode,
    tolerance: f64,
) -> Option<&'a Cpu> {
    let pool: Vec<&Cpu> = catalog
        .cpus
        .iter()
        .filter(|c| c.score >= scenario.min_score(Category::Cpu))
        .filter(|c| match memory_pref.explicit() {
            Some(wanted) => c.supports_memory_type(wanted),
            None => true,
        })
        .collect();
    pick_best(&pool, target, mode, tolerance)
}

pub fn resolve_motherboard<'a>(
    catalog: &'a Catalog,
    cpu: Option<&Cpu>,
    memory_pref: &MemoryTypePref,
    target: f64,
    mode: &Mode,
    tolerance: f64,
) -> Option<&'a Motherboard> {
    let by_platform: Vec<&Motherboard> = match cpu {
        Some(cpu) => {
            let matched: Vec<&Motherboard> = catalog
                .motherboards
                .iter()
                .filter(|b| b.platform == cpu.platform)
                .collect();
            if matched.is_empty() {
                catalog.motherboards.iter().collect()
            } else {
                matched
            }
        }
        None => catalog.motherboards.iter().collect(),
    };
    let pool: Vec<&Motherboard> = match memory_pref.explicit() {
        Some(wanted) => by_platform
            .into_iter()
            .filter(|b| b.memory_type == wanted)
            .collect(),
        None => by_platform,
    };
    pick_best(&pool, target, mode, tolerance)
}

pub fn resolve_memory<'a>(
    catalog: &'a Catalog,
    motherboard: Option<&Motherboard>,
    memory_pref: &MemoryTypePref,
    scenario: &Scenario,
    target: f64,
    mode: &Mode,
    tolerance: f64,
) -> Option<&'a MemoryKit> {
    let by_board: Vec<&MemoryKit> = match motherboard {
        Some(board) => catalog
            .memory
            .iter()
            .filter(|m| m.memory_type == board.memory_type)
            .collect(),
        None => catalog.memory.iter().collect(),
    };
    let by_pref: Vec<&MemoryKit> = match memory_pref.explicit() {
        Some(wanted) => by_board
            .into_iter()
            .filter(|m| m.memory_type == wanted)
            .collect(),
        None => by_board,
    };
    let preferred_size = scenario.preferred_memory_size();
    let sized: Vec<&MemoryKit> = by_pref
        .iter()
        .copied()
        .filter(|m| m.size >= preferred_size)
        .collect();
    let pool = if sized.is_empty() { by_pref } else { sized };
    pick_best(&pool, target, mode, tolerance)
}

pub fn resolve_storage<'a>(
    catalog: &'a Catalog,
    scenario: &Scenario,
    budget_mid: f64,
    target: f64,
    mode: &Mode,
    tolerance: f64,
) -> Option<&'a StorageDrive> {
    let all: Vec<&StorageDrive> = catalog.storage.iter().collect();
    let preferred: Vec<&StorageDrive> =
        if scenario.prefers_large_storage() && budget_mid >= LARGE_STORAGE_BUDGET {
            all.iter()
                .copied()
                .filter(|s| s.size >= LARGE_STORAGE_TB)
                .collect()
        } else {
            all.clone()
        };
    let pool = if preferred.is_empty() { all } else { preferred };
    pick_best(&pool, target, mode, tolerance)
}

pub fn resolve_psu<'a>(
    catalog: &'a Catalog,
    constraints: &Constraints,
    estimated_power: f64,
    target: f64,
    mode: &Mode,
    tolerance: f64,
) -> Option<&'a Psu> {
    let min_watt = estimated_power * constraints.psu_headroom();
    let matched: Vec<&Psu> = catalog.psu.iter().filter(|p| p.watt >= min_watt).collect();
    let pool = if matched.is_empty() {
        catalog.psu.iter().collect()
    } else {
        matched
    };
    pick_best(&pool, target, mode, tolerance)
}

pub fn resolve_cooler<'a>(
    catalog: &'a Catalog,
    constraints: &Constraints,
    cpu: Option<&Cpu>,
    target: f64,
    mode: &Mode,
    tolerance: f64,
) -> Option<&'a Cooler> {
    let cpu_tdp = cpu.map(|c| c.tdp).unwrap_or(0.0);
    let min_support = cpu_tdp * constraints.cooler_tdp_ratio();
    let matched: Vec<&Cooler> = catalog
        .coolers
        .iter()
        .filter(|c| c.tdp_support >= min_support)
        .collect();
    let pool = if matched.is_empty() {
        catalog.coolers.iter().collect()
    } else {
        matched
    };
    pick_best(&pool, target, mode, tolerance)
}

pub fn resolve_case<'a>(
    catalog: &'a Catalog,
    motherboard: Option<&Motherboard>,
    target: f64,
    mode: &Mode,
    tolerance: f64,
) -> Option<&'a CaseShell> {
    let pool: Vec<&CaseShell> = match motherboard {
        Some(board) => {
            let matched: Vec<&CaseShell> = catalog
                .cases
                .iter()
                .filter(|c| c.form_factor == board.form_factor)
                .collect();
            if matched.is_empty() {
                catalog.cases.iter().collect()
            } else {
                matched
            }
        }
        None => catalog.cases.iter().collect(),
    };
    pick_best(&pool, target, mode, tolerance)
}

/// Derived memory stick count.
///
/// Explicit form choice wins; DDR5 kits take the DDR5 rule; large kits
/// take the high-capacity rule; everything else the default.
pub fn derive_memory_sticks(rules: &RuleTable, form: &Form, memory: Option<&MemoryKit>) -> u32 {
    if let Some(count) = form.memory_sticks.explicit_count() {
        return count;
    }
    let cfg = &rules.selection.memory_sticks;
    if memory.map(|m| m.memory_type == DDR5).unwrap_or(false) {
        return cfg.ddr5_sticks();
    }
    let size = memory.map(|m| m.size).unwrap_or(0.0);
    if size >= cfg.high_capacity_threshold() {
        cfg.high_capacity_sticks()
    } else {
        cfg.default_sticks()
    }
}
