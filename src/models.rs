//! Core data models for rigfit
//!
//! Typed parts per hardware category, the user form, the per-category
//! selection map, and the immutable build result snapshot. The rule table
//! lives in [`crate::rules`], the catalog document in [`crate::catalog`].

use serde::{Deserialize, Serialize};

use crate::rules::{Budget, Mode, Scenario};

/// Id of the catalog sentinel standing in for "no discrete GPU".
pub const NO_GPU_ID: &str = "no-gpu";

/// Brand carried by integrated-graphics catalog entries.
pub const INTEGRATED_BRAND: &str = "Integrated";

/// Hardware categories.
///
/// Catalog lookup and scenario weights are keyed by this enum rather than
/// by strings; unknown category keys fail at deserialization time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpu,
    Gpu,
    Motherboard,
    Memory,
    Storage,
    Psu,
    Cooler,
    Case,
}

impl Category {
    /// Resolution order: motherboard needs the CPU's platform, memory and
    /// case need the motherboard, PSU and cooler need the power draw.
    pub const RESOLUTION_ORDER: [Category; 8] = [
        Category::Gpu,
        Category::Cpu,
        Category::Motherboard,
        Category::Memory,
        Category::Storage,
        Category::Psu,
        Category::Cooler,
        Category::Case,
    ];

    /// Order used when rendering a build.
    pub const DISPLAY_ORDER: [Category; 8] = [
        Category::Cpu,
        Category::Gpu,
        Category::Motherboard,
        Category::Memory,
        Category::Storage,
        Category::Psu,
        Category::Cooler,
        Category::Case,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "GPU",
            Category::Motherboard => "motherboard",
            Category::Memory => "memory",
            Category::Storage => "storage",
            Category::Psu => "PSU",
            Category::Cooler => "cooler",
            Category::Case => "case",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Cpu => "cpu",
            Category::Gpu => "gpu",
            Category::Motherboard => "motherboard",
            Category::Memory => "memory",
            Category::Storage => "storage",
            Category::Psu => "psu",
            Category::Cooler => "cooler",
            Category::Case => "case",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Category {
    type Err = crate::error::RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpu" => Ok(Category::Cpu),
            "gpu" => Ok(Category::Gpu),
            "motherboard" | "board" | "mb" => Ok(Category::Motherboard),
            "memory" | "ram" => Ok(Category::Memory),
            "storage" | "ssd" => Ok(Category::Storage),
            "psu" | "power" => Ok(Category::Psu),
            "cooler" | "cooling" => Ok(Category::Cooler),
            "case" | "chassis" => Ok(Category::Case),
            _ => Err(crate::error::RigError::UnknownCategory(s.to_string())),
        }
    }
}

/// Retail price bracket of a part. `min <= max`; the midpoint is the
/// canonical price used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Common surface every part exposes to the candidate selector.
pub trait Component {
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn price_range(&self) -> PriceRange;
    /// Performance rating, roughly 0-100.
    fn perf_score(&self) -> f64;
    /// Power/TDP/wattage figure used only for the low-power tie-break.
    fn power_value(&self) -> f64 {
        0.0
    }
}

macro_rules! impl_component {
    ($ty:ty) => {
        impl Component for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn display_name(&self) -> &str {
                if self.name.is_empty() {
                    &self.id
                } else {
                    &self.name
                }
            }
            fn price_range(&self) -> PriceRange {
                self.price_range
            }
            fn perf_score(&self) -> f64 {
                self.score
            }
        }
    };
    ($ty:ty, $power:ident) => {
        impl Component for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn display_name(&self) -> &str {
                if self.name.is_empty() {
                    &self.id
                } else {
                    &self.name
                }
            }
            fn price_range(&self) -> PriceRange {
                self.price_range
            }
            fn perf_score(&self) -> f64 {
                self.score
            }
            fn power_value(&self) -> f64 {
                self.$power
            }
        }
    };
}

/// Discrete graphics card, or the integrated-graphics sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Gpu {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub brand: String,
    /// VRAM in GB.
    #[serde(default)]
    pub vram: f64,
    /// Board power in watts.
    #[serde(default)]
    pub power: f64,
}

/// Classification of a picked GPU. The sentinel catalog entry is mapped to
/// `Integrated` in exactly one place instead of id checks scattered around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuClass {
    Discrete,
    Integrated,
}

impl Gpu {
    pub fn class(&self) -> GpuClass {
        if self.id == NO_GPU_ID || self.brand == INTEGRATED_BRAND {
            GpuClass::Integrated
        } else {
            GpuClass::Discrete
        }
    }

    pub fn is_integrated(&self) -> bool {
        self.class() == GpuClass::Integrated
    }
}

impl_component!(Gpu, power);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cpu {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub score: f64,
    /// Socket platform, e.g. "AM5" or "LGA1700".
    #[serde(default)]
    pub platform: String,
    /// Supported memory generations, `/`-delimited, e.g. "DDR4/DDR5".
    #[serde(default)]
    pub memory_type: String,
    #[serde(default)]
    pub tdp: f64,
}

impl Cpu {
    /// Whether the `/`-delimited memory-type field includes `wanted`.
    pub fn supports_memory_type(&self, wanted: &str) -> bool {
        self.memory_type
            .split('/')
            .map(str::trim)
            .any(|t| t == wanted)
    }
}

impl_component!(Cpu, tdp);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Motherboard {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub memory_type: String,
    #[serde(default)]
    pub form_factor: String,
}

impl_component!(Motherboard);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemoryKit {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub memory_type: String,
    /// Kit capacity in GB.
    #[serde(default)]
    pub size: f64,
}

impl_component!(MemoryKit);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StorageDrive {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub score: f64,
    /// Capacity in TB.
    #[serde(default)]
    pub size: f64,
}

impl_component!(StorageDrive);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Psu {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub watt: f64,
}

impl_component!(Psu, watt);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cooler {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub score: f64,
    /// Maximum CPU TDP the cooler is rated for.
    #[serde(default)]
    pub tdp_support: f64,
}

impl_component!(Cooler);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CaseShell {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub form_factor: String,
}

impl_component!(CaseShell);

/// A part of any category, used where selections cross category lines
/// (manual overrides, option listings).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartPick {
    Cpu(Cpu),
    Gpu(Gpu),
    Motherboard(Motherboard),
    Memory(MemoryKit),
    Storage(StorageDrive),
    Psu(Psu),
    Cooler(Cooler),
    Case(CaseShell),
}

impl PartPick {
    pub fn category(&self) -> Category {
        match self {
            PartPick::Cpu(_) => Category::Cpu,
            PartPick::Gpu(_) => Category::Gpu,
            PartPick::Motherboard(_) => Category::Motherboard,
            PartPick::Memory(_) => Category::Memory,
            PartPick::Storage(_) => Category::Storage,
            PartPick::Psu(_) => Category::Psu,
            PartPick::Cooler(_) => Category::Cooler,
            PartPick::Case(_) => Category::Case,
        }
    }

    pub fn summary(&self) -> PartSummary {
        match self {
            PartPick::Cpu(p) => PartSummary::of(Category::Cpu, p),
            PartPick::Gpu(p) => PartSummary::of(Category::Gpu, p),
            PartPick::Motherboard(p) => PartSummary::of(Category::Motherboard, p),
            PartPick::Memory(p) => PartSummary::of(Category::Memory, p),
            PartPick::Storage(p) => PartSummary::of(Category::Storage, p),
            PartPick::Psu(p) => PartSummary::of(Category::Psu, p),
            PartPick::Cooler(p) => PartSummary::of(Category::Cooler, p),
            PartPick::Case(p) => PartSummary::of(Category::Case, p),
        }
    }
}

/// Flat, category-tagged view of a part for rendering and option listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartSummary {
    pub category: Category,
    pub id: String,
    pub name: String,
    pub price_range: PriceRange,
    pub score: f64,
}

impl PartSummary {
    pub fn of<C: Component>(category: Category, part: &C) -> Self {
        Self {
            category,
            id: part.id().to_string(),
            name: part.display_name().to_string(),
            price_range: part.price_range(),
            score: part.perf_score(),
        }
    }
}

/// GPU brand preference from the form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GpuBrandPref {
    #[default]
    Any,
    /// No discrete GPU; only the integrated sentinel qualifies.
    None,
    Brand(String),
}

impl From<String> for GpuBrandPref {
    fn from(s: String) -> Self {
        match s.as_str() {
            "any" | "" => GpuBrandPref::Any,
            "none" => GpuBrandPref::None,
            _ => GpuBrandPref::Brand(s),
        }
    }
}

impl From<GpuBrandPref> for String {
    fn from(p: GpuBrandPref) -> Self {
        match p {
            GpuBrandPref::Any => "any".to_string(),
            GpuBrandPref::None => "none".to_string(),
            GpuBrandPref::Brand(b) => b,
        }
    }
}

/// Memory generation preference from the form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemoryTypePref {
    #[default]
    Auto,
    Generation(String),
}

impl MemoryTypePref {
    pub fn explicit(&self) -> Option<&str> {
        match self {
            MemoryTypePref::Auto => None,
            MemoryTypePref::Generation(g) => Some(g),
        }
    }
}

impl From<String> for MemoryTypePref {
    fn from(s: String) -> Self {
        match s.as_str() {
            "auto" | "" => MemoryTypePref::Auto,
            _ => MemoryTypePref::Generation(s),
        }
    }
}

impl From<MemoryTypePref> for String {
    fn from(p: MemoryTypePref) -> Self {
        match p {
            MemoryTypePref::Auto => "auto".to_string(),
            MemoryTypePref::Generation(g) => g,
        }
    }
}

/// Memory stick count preference from the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SticksPref {
    #[default]
    Auto,
    Two,
    Four,
}

impl SticksPref {
    pub fn explicit_count(&self) -> Option<u32> {
        match self {
            SticksPref::Auto => None,
            SticksPref::Two => Some(2),
            SticksPref::Four => Some(4),
        }
    }
}

impl From<String> for SticksPref {
    fn from(s: String) -> Self {
        match s.as_str() {
            "2" => SticksPref::Two,
            "4" => SticksPref::Four,
            _ => SticksPref::Auto,
        }
    }
}

impl From<SticksPref> for String {
    fn from(p: SticksPref) -> Self {
        match p {
            SticksPref::Auto => "auto".to_string(),
            SticksPref::Two => "2".to_string(),
            SticksPref::Four => "4".to_string(),
        }
    }
}

/// The user's current choices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub budget_id: String,
    pub scenario_id: String,
    pub mode_id: String,
    #[serde(default)]
    pub gpu_brand: GpuBrandPref,
    #[serde(default)]
    pub memory_type: MemoryTypePref,
    #[serde(default)]
    pub memory_sticks: SticksPref,
}

/// One part per category, each optional. Replaced wholesale on every
/// recomputation or override, never mutated field-by-field.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub cpu: Option<Cpu>,
    pub gpu: Option<Gpu>,
    pub motherboard: Option<Motherboard>,
    pub memory: Option<MemoryKit>,
    pub storage: Option<StorageDrive>,
    pub psu: Option<Psu>,
    pub cooler: Option<Cooler>,
    pub case: Option<CaseShell>,
}

impl Selection {
    /// Category-tagged summaries of the resolved parts, in `order`.
    pub fn summaries(&self, order: &[Category]) -> Vec<PartSummary> {
        order.iter().filter_map(|cat| self.summary(*cat)).collect()
    }

    pub fn summary(&self, category: Category) -> Option<PartSummary> {
        match category {
            Category::Cpu => self.cpu.as_ref().map(|p| PartSummary::of(category, p)),
            Category::Gpu => self.gpu.as_ref().map(|p| PartSummary::of(category, p)),
            Category::Motherboard => self
                .motherboard
                .as_ref()
                .map(|p| PartSummary::of(category, p)),
            Category::Memory => self.memory.as_ref().map(|p| PartSummary::of(category, p)),
            Category::Storage => self.storage.as_ref().map(|p| PartSummary::of(category, p)),
            Category::Psu => self.psu.as_ref().map(|p| PartSummary::of(category, p)),
            Category::Cooler => self.cooler.as_ref().map(|p| PartSummary::of(category, p)),
            Category::Case => self.case.as_ref().map(|p| PartSummary::of(category, p)),
        }
    }

    /// Sum of resolved parts' price-range minimums. Unresolved categories
    /// are omitted, not treated as zero-cost entries.
    pub fn total_min(&self) -> f64 {
        self.summaries(&Category::DISPLAY_ORDER)
            .iter()
            .map(|s| s.price_range.min)
            .sum()
    }

    /// Sum of resolved parts' price-range maximums.
    pub fn total_max(&self) -> f64 {
        self.summaries(&Category::DISPLAY_ORDER)
            .iter()
            .map(|s| s.price_range.max)
            .sum()
    }

    /// Estimated wall draw: CPU TDP + GPU board power + a fixed baseline
    /// for board, storage, and fans. Unrounded; round only for display.
    pub fn estimated_power(&self) -> f64 {
        let cpu = self.cpu.as_ref().map(|c| c.tdp).unwrap_or(0.0);
        let gpu = self.gpu.as_ref().map(|g| g.power).unwrap_or(0.0);
        cpu + gpu + crate::scoring::BASELINE_POWER_W
    }
}

/// Immutable result of one recommendation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    pub budget: Budget,
    pub scenario: Scenario,
    pub mode: Mode,
    pub selection: Selection,
    pub memory_sticks: u32,
    pub total_min: f64,
    pub total_max: f64,
    /// Rounded to the nearest watt for display.
    pub estimated_power: f64,
    pub reasons: Vec<String>,
    pub risks: Vec<String>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_midpoint() {
        let r = PriceRange {
            min: 1000.0,
            max: 2000.0,
        };
        assert_eq!(r.midpoint(), 1500.0);
    }

    #[test]
    fn gpu_sentinel_classifies_as_integrated() {
        let sentinel = Gpu {
            id: NO_GPU_ID.to_string(),
            brand: INTEGRATED_BRAND.to_string(),
            ..Default::default()
        };
        assert_eq!(sentinel.class(), GpuClass::Integrated);

        let by_brand = Gpu {
            id: "igpu-780m".to_string(),
            brand: INTEGRATED_BRAND.to_string(),
            ..Default::default()
        };
        assert!(by_brand.is_integrated());

        let discrete = Gpu {
            id: "rtx-4070".to_string(),
            brand: "NVIDIA".to_string(),
            ..Default::default()
        };
        assert_eq!(discrete.class(), GpuClass::Discrete);
    }

    #[test]
    fn cpu_memory_type_is_slash_delimited() {
        let cpu = Cpu {
            memory_type: "DDR4 / DDR5".to_string(),
            ..Default::default()
        };
        assert!(cpu.supports_memory_type("DDR4"));
        assert!(cpu.supports_memory_type("DDR5"));
        assert!(!cpu.supports_memory_type("DDR3"));
    }

    #[test]
    fn form_prefs_parse_from_strings() {
        assert_eq!(GpuBrandPref::from("any".to_string()), GpuBrandPref::Any);
        assert_eq!(GpuBrandPref::from("none".to_string()), GpuBrandPref::None);
        assert_eq!(
            GpuBrandPref::from("NVIDIA".to_string()),
            GpuBrandPref::Brand("NVIDIA".to_string())
        );
        assert_eq!(SticksPref::from("4".to_string()).explicit_count(), Some(4));
        assert_eq!(SticksPref::from("auto".to_string()).explicit_count(), None);
    }

    #[test]
    fn selection_totals_skip_absent_categories() {
        let sel = Selection {
            cpu: Some(Cpu {
                price_range: PriceRange {
                    min: 1000.0,
                    max: 1200.0,
                },
                ..Default::default()
            }),
            memory: Some(MemoryKit {
                price_range: PriceRange {
                    min: 400.0,
                    max: 500.0,
                },
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(sel.total_min(), 1400.0);
        assert_eq!(sel.total_max(), 1700.0);
    }

    #[test]
    fn estimated_power_includes_baseline() {
        let sel = Selection {
            cpu: Some(Cpu {
                tdp: 105.0,
                ..Default::default()
            }),
            gpu: Some(Gpu {
                power: 200.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(sel.estimated_power(), 425.0);
        assert_eq!(Selection::default().estimated_power(), 120.0);
    }
}
