//! Full-build orchestration
//!
//! Resolves the form against the rule table, runs every category pipeline
//! in dependency order, and snapshots the outcome as a [`BuildResult`]
//! with human-readable reasons, risks, and warnings.

use tracing::debug;

use crate::catalog::Catalog;
use crate::engine::resolve::{
    self, derive_memory_sticks, LARGE_STORAGE_BUDGET, LARGE_STORAGE_TB,
};
use crate::error::RigError;
use crate::models::{BuildResult, Category, Form, GpuBrandPref, Selection};
use crate::rules::RuleTable;
use crate::scoring::BASELINE_POWER_W;

fn shortfall(category: Category, power_bound: bool) -> String {
    let bound = if power_bound {
        "budget or power draw"
    } else {
        "budget or preferences"
    };
    format!("{}: no candidate fits the current {bound}.", category.label())
}

/// Compute a complete build for the form.
///
/// Unknown budget/scenario/mode ids are the only failure paths; every
/// category shortfall inside the pipeline degrades to a warning instead.
pub fn compute_recommendation(
    rules: &RuleTable,
    catalog: &Catalog,
    form: &Form,
) -> Result<BuildResult, RigError> {
    let budget = rules
        .budget(&form.budget_id)
        .ok_or_else(|| RigError::UnknownBudget(form.budget_id.clone()))?;
    let scenario = rules
        .scenario(&form.scenario_id)
        .ok_or_else(|| RigError::UnknownScenario(form.scenario_id.clone()))?;
    let mode = rules
        .mode(&form.mode_id)
        .ok_or_else(|| RigError::UnknownMode(form.mode_id.clone()))?;

    let budget_mid = budget.midpoint();
    let tolerance = rules.budget_tolerance();
    let target = |category: Category| budget_mid * scenario.weight(category);

    debug!(
        budget = %budget.id,
        scenario = %scenario.id,
        mode = %mode.id,
        budget_mid,
        tolerance,
        "computing recommendation"
    );

    let mut warnings: Vec<String> = Vec::new();

    let gpu = resolve::resolve_gpu(
        catalog,
        rules,
        scenario,
        form,
        target(Category::Gpu),
        mode,
        tolerance,
    );
    if gpu.is_none() {
        warnings.push(shortfall(Category::Gpu, false));
    }
    if let Some(g) = gpu {
        if g.is_integrated() && scenario.min_score(Category::Gpu) > 10.0 {
            warnings.push(
                "GPU: this scenario expects a discrete card; the integrated pick may fall short."
                    .to_string(),
            );
        }
        if g.is_integrated() && scenario.min_vram > 0.0 {
            warnings.push(
                "GPU: this scenario sets a VRAM requirement that integrated graphics cannot meet."
                    .to_string(),
            );
        }
    }

    let cpu = resolve::resolve_cpu(
        catalog,
        scenario,
        &form.memory_type,
        target(Category::Cpu),
        mode,
        tolerance,
    );
    if cpu.is_none() {
        warnings.push(shortfall(Category::Cpu, false));
    }

    let motherboard = resolve::resolve_motherboard(
        catalog,
        cpu,
        &form.memory_type,
        target(Category::Motherboard),
        mode,
        tolerance,
    );
    if motherboard.is_none() {
        warnings.push(shortfall(Category::Motherboard, false));
    }

    let memory = resolve::resolve_memory(
        catalog,
        motherboard,
        &form.memory_type,
        scenario,
        target(Category::Memory),
        mode,
        tolerance,
    );
    if memory.is_none() {
        warnings.push(shortfall(Category::Memory, false));
    }

    let memory_sticks = derive_memory_sticks(rules, form, memory);

    let storage = resolve::resolve_storage(
        catalog,
        scenario,
        budget_mid,
        target(Category::Storage),
        mode,
        tolerance,
    );
    if storage.is_none() {
        warnings.push(shortfall(Category::Storage, false));
    }

    let estimated_power = cpu.map(|c| c.tdp).unwrap_or(0.0)
        + gpu.map(|g| g.power).unwrap_or(0.0)
        + BASELINE_POWER_W;

    let psu = resolve::resolve_psu(
        catalog,
        &rules.constraints,
        estimated_power,
        target(Category::Psu),
        mode,
        tolerance,
    );
    if psu.is_none() {
        warnings.push(shortfall(Category::Psu, true));
    }

    let cooler = resolve::resolve_cooler(
        catalog,
        &rules.constraints,
        cpu,
        target(Category::Cooler),
        mode,
        tolerance,
    );
    if cooler.is_none() {
        warnings.push(shortfall(Category::Cooler, true));
    }

    let case = resolve::resolve_case(catalog, motherboard, target(Category::Case), mode, tolerance);
    if case.is_none() {
        warnings.push(shortfall(Category::Case, false));
    }

    let selection = Selection {
        cpu: cpu.cloned(),
        gpu: gpu.cloned(),
        motherboard: motherboard.cloned(),
        memory: memory.cloned(),
        storage: storage.cloned(),
        psu: psu.cloned(),
        cooler: cooler.cloned(),
        case: case.cloned(),
    };
    let total_min = selection.total_min();
    let total_max = selection.total_max();

    let mut reasons: Vec<String> = Vec::new();

    let top = scenario.top_weights(2);
    if !top.is_empty() {
        let labels: Vec<&str> = top.iter().map(|c| c.label()).collect();
        reasons.push(format!("Spending is weighted toward {}.", labels.join(" / ")));
    }

    let bias = &mode.score_bias;
    if bias.price > bias.performance {
        reasons.push("This mode favors value for money.".to_string());
    } else if bias.performance > bias.price {
        reasons.push("This mode favors raw performance.".to_string());
    } else {
        reasons.push("This mode balances price and performance.".to_string());
    }

    if mode.prefers_low_power() {
        reasons.push("Power draw and thermal load are kept low.".to_string());
    }

    if let GpuBrandPref::Brand(brand) = &form.gpu_brand {
        if brand == "AMD" || brand == "NVIDIA" {
            reasons.push(format!("GPU brand preference: {brand}."));
        }
    }

    if let Some(generation) = form.memory_type.explicit() {
        if generation == "DDR4" || generation == "DDR5" {
            reasons.push(format!("Memory generation preference: {generation}."));
        }
    }

    match gpu {
        Some(g) if g.is_integrated() => {
            reasons.push("Skipping a discrete GPU keeps cost and power down.".to_string());
        }
        _ => {
            // The headline requirement quotes the NVIDIA floor even when an
            // AMD card was picked; the per-card filter stays brand-keyed.
            let min_vram = if scenario.is_ai() {
                rules
                    .selection
                    .min_gpu_vram
                    .as_ref()
                    .and_then(|m| m.ai.as_ref())
                    .and_then(|o| o.nvidia)
                    .unwrap_or(scenario.min_vram)
            } else {
                scenario.min_vram
            };
            if min_vram > 0.0 {
                reasons.push(format!("Scenario VRAM requirement: at least {min_vram:.0} GB."));
            }
        }
    }

    let preferred_size = scenario.preferred_memory_size();
    if memory.map(|m| m.size >= preferred_size).unwrap_or(false) && preferred_size >= 32.0 {
        reasons.push(format!(
            "Memory targets {preferred_size:.0} GB for heavy multitasking."
        ));
    }
    reasons.push(format!("Memory is configured as {memory_sticks} sticks."));
    if memory_sticks == 4 && memory.map(|m| m.memory_type == resolve::DDR5).unwrap_or(false) {
        warnings.push(
            "Memory: four DDR5 sticks can hurt stability; two sticks are preferred.".to_string(),
        );
    }

    if storage.map(|s| s.size >= LARGE_STORAGE_TB).unwrap_or(false)
        && scenario.prefers_large_storage()
        && budget_mid >= LARGE_STORAGE_BUDGET
    {
        reasons.push("Leaning toward a 2 TB drive for assets and projects.".to_string());
    }

    let mut risks: Vec<String> = Vec::new();
    if total_max > budget.max {
        risks.push(format!(
            "The price ceiling may exceed the budget limit (¥{:.0}).",
            budget.max
        ));
    }
    if total_min < budget.min {
        risks.push(format!(
            "The price floor sits below the budget minimum (¥{:.0}).",
            budget.min
        ));
    }

    Ok(BuildResult {
        budget: budget.clone(),
        scenario: scenario.clone(),
        mode: mode.clone(),
        selection,
        memory_sticks,
        total_min,
        total_max,
        estimated_power: estimated_power.round(),
        reasons,
        risks,
        warnings,
    })
}
