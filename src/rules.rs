//! Rule table: budgets, scenarios, modes, and tuning parameters
//!
//! Deserialized from the `rules` config document. Every optional field has
//! its default in one place here — either a `default_*` fn wired through
//! `#[serde(default = "...")]` or an accessor on the owning struct — so
//! resolvers never hard-code fallbacks inline.
//!
//! # Document format
//!
//! ```json
//! {
//!   "budgets": [{ "id": "mid", "min": 6000, "max": 9000 }],
//!   "scenarios": [{
//!     "id": "gaming",
//!     "weights": { "gpu": 0.4, "cpu": 0.3, "...": 0.0 },
//!     "minScores": { "gpu": 50 },
//!     "minVram": 8
//!   }],
//!   "modes": [{
//!     "id": "balanced",
//!     "scoreBias": { "price": 0.5, "performance": 0.5 },
//!     "powerBias": "low"
//!   }],
//!   "selection": {
//!     "budgetTolerance": 0.15,
//!     "minGpuVram": { "ai": { "nvidia": 12, "amd": 16 } },
//!     "memorySticks": { "default": 2, "ddr5": 2, "highCapacityThreshold": 32, "highCapacity": 4 }
//!   },
//!   "pricing": { "rangeTolerance": 0.1 },
//!   "constraints": { "psuHeadroom": 1.4, "coolerTdpRatio": 1.2 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Category;

fn default_half() -> f64 {
    0.5
}

fn default_budget_tolerance() -> f64 {
    0.1
}

fn default_psu_headroom() -> f64 {
    1.4
}

fn default_cooler_tdp_ratio() -> f64 {
    1.2
}

fn default_sticks() -> u32 {
    2
}

fn default_high_capacity_sticks() -> u32 {
    4
}

fn default_high_capacity_threshold() -> f64 {
    32.0
}

/// Named price bracket; its midpoint is the total build target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub min: f64,
    pub max: f64,
}

impl Budget {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Usage profile: per-category spend weights plus minimum performance and
/// VRAM thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    /// Fraction of the budget midpoint allocated per category; fractions
    /// are expected to sum to roughly 1.
    pub weights: BTreeMap<Category, f64>,
    #[serde(default)]
    pub min_scores: BTreeMap<Category, f64>,
    #[serde(default)]
    pub min_vram: f64,
}

impl Scenario {
    pub fn weight(&self, category: Category) -> f64 {
        self.weights.get(&category).copied().unwrap_or(0.0)
    }

    pub fn min_score(&self, category: Category) -> f64 {
        self.min_scores.get(&category).copied().unwrap_or(0.0)
    }

    /// Dev, design, and AI workloads prefer 32 GB kits; everything else 16.
    pub fn preferred_memory_size(&self) -> f64 {
        if matches!(self.id.as_str(), "dev" | "design" | "ai") {
            32.0
        } else {
            16.0
        }
    }

    /// Design and AI builds lean toward 2 TB drives at high budgets.
    pub fn prefers_large_storage(&self) -> bool {
        matches!(self.id.as_str(), "design" | "ai")
    }

    pub fn is_ai(&self) -> bool {
        self.id == "ai"
    }

    /// Categories with the `count` largest weights, descending. Ties keep
    /// map order, which is unspecified by the format.
    pub fn top_weights(&self, count: usize) -> Vec<Category> {
        let mut entries: Vec<(Category, f64)> =
            self.weights.iter().map(|(c, w)| (*c, *w)).collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries.into_iter().take(count).map(|(c, _)| c).collect()
    }
}

/// Price-vs-performance weighting applied to the final score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBias {
    #[serde(default = "default_half")]
    pub price: f64,
    #[serde(default = "default_half")]
    pub performance: f64,
}

impl Default for ScoreBias {
    fn default() -> Self {
        Self {
            price: default_half(),
            performance: default_half(),
        }
    }
}

/// Power preference. Anything other than `low` means no preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PowerBias {
    Low,
    #[default]
    Balanced,
}

impl From<String> for PowerBias {
    fn from(s: String) -> Self {
        if s == "low" {
            PowerBias::Low
        } else {
            PowerBias::Balanced
        }
    }
}

impl From<PowerBias> for String {
    fn from(b: PowerBias) -> Self {
        match b {
            PowerBias::Low => "low".to_string(),
            PowerBias::Balanced => "balanced".to_string(),
        }
    }
}

/// Scoring mode: price/performance bias and power preference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub id: String,
    #[serde(default)]
    pub score_bias: ScoreBias,
    #[serde(default)]
    pub power_bias: PowerBias,
}

impl Mode {
    pub fn prefers_low_power(&self) -> bool {
        self.power_bias == PowerBias::Low
    }
}

/// Brand-keyed VRAM minimums for the "ai" scenario.
///
/// The filter only ever distinguishes NVIDIA from everything else; the
/// `amd` key therefore covers all non-NVIDIA brands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiVramOverride {
    #[serde(default)]
    pub nvidia: Option<f64>,
    #[serde(default)]
    pub amd: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinGpuVram {
    #[serde(default)]
    pub ai: Option<AiVramOverride>,
}

/// Memory stick count rules. All fields optional; accessors apply the
/// documented defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySticksRule {
    #[serde(default)]
    pub default: Option<u32>,
    #[serde(default)]
    pub ddr5: Option<u32>,
    #[serde(default)]
    pub high_capacity_threshold: Option<f64>,
    #[serde(default)]
    pub high_capacity: Option<u32>,
}

impl MemorySticksRule {
    pub fn default_sticks(&self) -> u32 {
        self.default.unwrap_or_else(default_sticks)
    }

    /// DDR5 stick count falls back to the default count, not the constant.
    pub fn ddr5_sticks(&self) -> u32 {
        self.ddr5.unwrap_or_else(|| self.default_sticks())
    }

    pub fn high_capacity_threshold(&self) -> f64 {
        self.high_capacity_threshold
            .unwrap_or_else(default_high_capacity_threshold)
    }

    pub fn high_capacity_sticks(&self) -> u32 {
        self.high_capacity
            .unwrap_or_else(default_high_capacity_sticks)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRules {
    #[serde(default)]
    pub budget_tolerance: Option<f64>,
    #[serde(default)]
    pub min_gpu_vram: Option<MinGpuVram>,
    #[serde(default)]
    pub memory_sticks: MemorySticksRule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRules {
    #[serde(default)]
    pub range_tolerance: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default)]
    pub psu_headroom: Option<f64>,
    #[serde(default)]
    pub cooler_tdp_ratio: Option<f64>,
}

impl Constraints {
    pub fn psu_headroom(&self) -> f64 {
        self.psu_headroom.unwrap_or_else(default_psu_headroom)
    }

    pub fn cooler_tdp_ratio(&self) -> f64 {
        self.cooler_tdp_ratio
            .unwrap_or_else(default_cooler_tdp_ratio)
    }
}

/// The full rule table document. Loaded once, read-only for the engine's
/// lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTable {
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub modes: Vec<Mode>,
    #[serde(default)]
    pub selection: SelectionRules,
    #[serde(default)]
    pub pricing: PricingRules,
    #[serde(default)]
    pub constraints: Constraints,
}

impl RuleTable {
    pub fn budget(&self, id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn mode(&self, id: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.id == id)
    }

    /// Shared budget-window tolerance:
    /// `selection.budgetTolerance`, then `pricing.rangeTolerance`, then 0.1.
    pub fn budget_tolerance(&self) -> f64 {
        self.selection
            .budget_tolerance
            .or(self.pricing.range_tolerance)
            .unwrap_or_else(default_budget_tolerance)
    }

    /// Minimum VRAM for a GPU of `brand` under `scenario`.
    ///
    /// For the "ai" scenario, NVIDIA cards read the `nvidia` key and every
    /// other brand reads the `amd` key, each falling back to the
    /// scenario's own minimum.
    pub fn min_vram_for(&self, scenario: &Scenario, brand: &str) -> f64 {
        if !scenario.is_ai() {
            return scenario.min_vram;
        }
        let ai = self
            .selection
            .min_gpu_vram
            .as_ref()
            .and_then(|m| m.ai.as_ref());
        let keyed = if brand == "NVIDIA" {
            ai.and_then(|o| o.nvidia)
        } else {
            ai.and_then(|o| o.amd)
        };
        keyed.unwrap_or(scenario.min_vram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_from(json: &str) -> RuleTable {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn tolerance_prefers_selection_then_pricing_then_default() {
        let both = rules_from(
            r#"{"selection": {"budgetTolerance": 0.2}, "pricing": {"rangeTolerance": 0.05}}"#,
        );
        assert_eq!(both.budget_tolerance(), 0.2);

        let pricing_only = rules_from(r#"{"pricing": {"rangeTolerance": 0.05}}"#);
        assert_eq!(pricing_only.budget_tolerance(), 0.05);

        let empty = rules_from("{}");
        assert_eq!(empty.budget_tolerance(), 0.1);
    }

    #[test]
    fn stick_defaults_apply_when_config_absent() {
        let rules = rules_from("{}");
        let sticks = &rules.selection.memory_sticks;
        assert_eq!(sticks.default_sticks(), 2);
        assert_eq!(sticks.ddr5_sticks(), 2);
        assert_eq!(sticks.high_capacity_threshold(), 32.0);
        assert_eq!(sticks.high_capacity_sticks(), 4);
    }

    #[test]
    fn ddr5_sticks_fall_back_to_configured_default() {
        let rules = rules_from(r#"{"selection": {"memorySticks": {"default": 1}}}"#);
        assert_eq!(rules.selection.memory_sticks.ddr5_sticks(), 1);
    }

    #[test]
    fn constraint_defaults() {
        let rules = rules_from("{}");
        assert_eq!(rules.constraints.psu_headroom(), 1.4);
        assert_eq!(rules.constraints.cooler_tdp_ratio(), 1.2);
    }

    #[test]
    fn power_bias_parses_low_and_everything_else() {
        let rules = rules_from(
            r#"{"modes": [
                {"id": "quiet", "powerBias": "low"},
                {"id": "perf", "powerBias": "max"},
                {"id": "plain"}
            ]}"#,
        );
        assert!(rules.mode("quiet").unwrap().prefers_low_power());
        assert!(!rules.mode("perf").unwrap().prefers_low_power());
        assert!(!rules.mode("plain").unwrap().prefers_low_power());
    }

    #[test]
    fn score_bias_defaults_to_half_each() {
        let rules = rules_from(r#"{"modes": [{"id": "m", "scoreBias": {"price": 0.8}}]}"#);
        let bias = &rules.mode("m").unwrap().score_bias;
        assert_eq!(bias.price, 0.8);
        assert_eq!(bias.performance, 0.5);
    }

    #[test]
    fn ai_vram_override_is_a_two_way_branch() {
        let rules = rules_from(
            r#"{
                "scenarios": [
                    {"id": "ai", "weights": {"gpu": 1.0}, "minVram": 8},
                    {"id": "gaming", "weights": {"gpu": 1.0}, "minVram": 6}
                ],
                "selection": {"minGpuVram": {"ai": {"nvidia": 12, "amd": 16}}}
            }"#,
        );
        let ai = rules.scenario("ai").unwrap();
        assert_eq!(rules.min_vram_for(ai, "NVIDIA"), 12.0);
        assert_eq!(rules.min_vram_for(ai, "AMD"), 16.0);
        // Non-NVIDIA, non-AMD brands take the amd-keyed minimum too.
        assert_eq!(rules.min_vram_for(ai, "Intel"), 16.0);

        let gaming = rules.scenario("gaming").unwrap();
        assert_eq!(rules.min_vram_for(gaming, "NVIDIA"), 6.0);
    }

    #[test]
    fn ai_override_falls_back_to_scenario_minimum() {
        let rules = rules_from(
            r#"{
                "scenarios": [{"id": "ai", "weights": {"gpu": 1.0}, "minVram": 10}],
                "selection": {"minGpuVram": {"ai": {"nvidia": 12}}}
            }"#,
        );
        let ai = rules.scenario("ai").unwrap();
        assert_eq!(rules.min_vram_for(ai, "NVIDIA"), 12.0);
        assert_eq!(rules.min_vram_for(ai, "AMD"), 10.0);
    }

    #[test]
    fn top_weights_sorted_descending() {
        let rules = rules_from(
            r#"{"scenarios": [{
                "id": "gaming",
                "weights": {"gpu": 0.4, "cpu": 0.3, "motherboard": 0.1, "memory": 0.1}
            }]}"#,
        );
        let top = rules.scenario("gaming").unwrap().top_weights(2);
        assert_eq!(top, vec![Category::Gpu, Category::Cpu]);
    }

    #[test]
    fn unknown_weight_category_is_rejected() {
        let res: Result<RuleTable, _> = serde_json::from_str(
            r#"{"scenarios": [{"id": "x", "weights": {"flux-capacitor": 1.0}}]}"#,
        );
        assert!(res.is_err());
    }
}
