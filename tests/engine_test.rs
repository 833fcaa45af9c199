//! End-to-end engine tests over the bundled data documents

use std::path::PathBuf;

use rigfit::engine::{compute_recommendation, diy};
use rigfit::loader::{load_documents, DataSource, Documents};
use rigfit::models::{Category, Form, GpuBrandPref};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn docs() -> Documents {
    load_documents(None, &data_dir()).unwrap()
}

fn form(budget: &str, scenario: &str, mode: &str) -> Form {
    Form {
        budget_id: budget.to_string(),
        scenario_id: scenario.to_string(),
        mode_id: mode.to_string(),
        ..Default::default()
    }
}

#[test]
fn bundled_documents_load_locally() {
    let docs = docs();
    assert_eq!(docs.source, DataSource::Local(data_dir()));
    assert_eq!(docs.rules.budgets.len(), 3);
    assert_eq!(docs.rules.scenarios.len(), 5);
    assert!(!docs.catalog.is_empty());
}

#[test]
fn mid_gaming_build_is_complete_and_compatible() {
    let docs = docs();
    let result =
        compute_recommendation(&docs.rules, &docs.catalog, &form("mid", "gaming", "balanced"))
            .unwrap();

    let sel = &result.selection;
    for category in Category::DISPLAY_ORDER {
        assert!(
            sel.summary(category).is_some(),
            "{category} left unresolved"
        );
    }
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);

    // Scenario floors hold.
    let gpu = sel.gpu.as_ref().unwrap();
    assert!(!gpu.is_integrated());
    assert!(gpu.vram >= 8.0);
    assert!(gpu.score >= 50.0);
    assert!(sel.cpu.as_ref().unwrap().score >= 45.0);

    // Cross-part constraints hold.
    let cpu = sel.cpu.as_ref().unwrap();
    let board = sel.motherboard.as_ref().unwrap();
    assert_eq!(cpu.platform, board.platform);
    assert_eq!(board.memory_type, sel.memory.as_ref().unwrap().memory_type);
    assert_eq!(board.form_factor, sel.case.as_ref().unwrap().form_factor);
    assert!(sel.psu.as_ref().unwrap().watt >= sel.estimated_power() * 1.4);
    assert!(sel.cooler.as_ref().unwrap().tdp_support >= cpu.tdp * 1.2);

    // A build within the bracket carries no risks.
    assert!(result.total_min >= result.budget.min);
    assert!(result.total_max <= result.budget.max);
    assert!(result.risks.is_empty(), "risks: {:?}", result.risks);

    assert_eq!(
        result.estimated_power,
        (cpu.tdp + gpu.power + 120.0).round()
    );
}

#[test]
fn same_form_yields_the_same_build() {
    let docs = docs();
    let f = form("mid", "gaming", "balanced");
    let first = compute_recommendation(&docs.rules, &docs.catalog, &f).unwrap();
    for _ in 0..5 {
        let next = compute_recommendation(&docs.rules, &docs.catalog, &f).unwrap();
        assert_eq!(
            serde_json::to_string(&first.selection).unwrap(),
            serde_json::to_string(&next.selection).unwrap()
        );
    }
}

#[test]
fn ai_scenario_enforces_nvidia_vram_floor() {
    let docs = docs();
    let mut f = form("high", "ai", "performance");
    f.gpu_brand = GpuBrandPref::Brand("NVIDIA".to_string());
    let result = compute_recommendation(&docs.rules, &docs.catalog, &f).unwrap();
    let gpu = result.selection.gpu.as_ref().unwrap();
    assert_eq!(gpu.brand, "NVIDIA");
    // rules set a 12 GB floor for NVIDIA cards under "ai".
    assert!(gpu.vram >= 12.0, "picked {} with {} GB", gpu.id, gpu.vram);
}

#[test]
fn ai_scenario_enforces_amd_vram_floor() {
    let docs = docs();
    let mut f = form("mid", "ai", "balanced");
    f.gpu_brand = GpuBrandPref::Brand("AMD".to_string());
    let result = compute_recommendation(&docs.rules, &docs.catalog, &f).unwrap();
    let gpu = result.selection.gpu.as_ref().unwrap();
    // rules set a 16 GB floor for non-NVIDIA cards under "ai".
    assert!(gpu.vram >= 16.0, "picked {} with {} GB", gpu.id, gpu.vram);
}

#[test]
fn no_gpu_office_build_uses_integrated_graphics() {
    let docs = docs();
    let mut f = form("entry", "office", "value");
    f.gpu_brand = GpuBrandPref::None;
    let result = compute_recommendation(&docs.rules, &docs.catalog, &f).unwrap();

    let gpu = result.selection.gpu.as_ref().unwrap();
    assert!(gpu.is_integrated());
    // The sentinel costs nothing but still counts as a resolved category.
    assert_eq!(gpu.price_range.min, 0.0);
    assert!(!result.warnings.iter().any(|w| w.starts_with("GPU:")));
}

#[test]
fn high_design_build_gets_a_two_terabyte_drive() {
    let docs = docs();
    let result =
        compute_recommendation(&docs.rules, &docs.catalog, &form("high", "design", "balanced"))
            .unwrap();
    assert!(result.selection.storage.as_ref().unwrap().size >= 2.0);
    assert!(result
        .reasons
        .iter()
        .any(|r| r.contains("2 TB")));
}

#[test]
fn quiet_mode_prefers_lower_power_on_score_ties() {
    let docs = docs();
    assert!(docs.rules.mode("quiet").unwrap().prefers_low_power());
    // No tie in the bundled catalog is guaranteed, but the mode must still
    // produce a complete build.
    let result =
        compute_recommendation(&docs.rules, &docs.catalog, &form("mid", "dev", "quiet")).unwrap();
    assert!(result.selection.cpu.is_some());
    assert!(result
        .reasons
        .iter()
        .any(|r| r.contains("Power draw")));
}

#[test]
fn manual_psu_downgrade_is_flagged() {
    let docs = docs();
    let result =
        compute_recommendation(&docs.rules, &docs.catalog, &form("mid", "gaming", "balanced"))
            .unwrap();

    let pick = docs.catalog.find(Category::Psu, "psu-450").unwrap();
    let edited = diy::apply_override(&result.selection, pick);
    let warnings = diy::diy_warnings(&edited, &docs.rules);
    assert!(warnings.iter().any(|w| w.contains("PSU wattage")));

    // The original selection stays clean.
    assert!(diy::diy_warnings(&result.selection, &docs.rules).is_empty());
}

#[test]
fn options_narrow_to_the_picked_platform() {
    let docs = docs();
    let result =
        compute_recommendation(&docs.rules, &docs.catalog, &form("mid", "gaming", "balanced"))
            .unwrap();
    let cpu_platform = result.selection.cpu.as_ref().unwrap().platform.clone();

    let boards = diy::options_for(
        Category::Motherboard,
        &docs.catalog,
        &result.selection,
        &docs.rules,
    );
    assert!(!boards.is_empty());
    for board in &boards {
        let full = docs
            .catalog
            .motherboards
            .iter()
            .find(|b| b.id == board.id)
            .unwrap();
        assert_eq!(full.platform, cpu_platform);
    }
}
