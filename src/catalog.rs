//! Component catalog document
//!
//! One array of typed parts per hardware category, deserialized from the
//! `components` config document. Category access goes through the
//! [`Category`] enum, not string keys.

use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::models::{
    CaseShell, Category, Cooler, Cpu, Gpu, MemoryKit, Motherboard, PartPick, PartSummary, Psu,
    StorageDrive,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub gpus: Vec<Gpu>,
    #[serde(default)]
    pub cpus: Vec<Cpu>,
    #[serde(default)]
    pub motherboards: Vec<Motherboard>,
    #[serde(default)]
    pub memory: Vec<MemoryKit>,
    #[serde(default)]
    pub storage: Vec<StorageDrive>,
    #[serde(default)]
    pub psu: Vec<Psu>,
    #[serde(default)]
    pub coolers: Vec<Cooler>,
    #[serde(default)]
    pub cases: Vec<CaseShell>,
}

impl Catalog {
    /// Number of parts in one category's array.
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Cpu => self.cpus.len(),
            Category::Gpu => self.gpus.len(),
            Category::Motherboard => self.motherboards.len(),
            Category::Memory => self.memory.len(),
            Category::Storage => self.storage.len(),
            Category::Psu => self.psu.len(),
            Category::Cooler => self.coolers.len(),
            Category::Case => self.cases.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::DISPLAY_ORDER.iter().all(|c| self.len(*c) == 0)
    }

    /// Flat summaries of one category's array, in catalog order.
    pub fn summaries(&self, category: Category) -> Vec<PartSummary> {
        match category {
            Category::Cpu => self
                .cpus
                .iter()
                .map(|p| PartSummary::of(category, p))
                .collect(),
            Category::Gpu => self
                .gpus
                .iter()
                .map(|p| PartSummary::of(category, p))
                .collect(),
            Category::Motherboard => self
                .motherboards
                .iter()
                .map(|p| PartSummary::of(category, p))
                .collect(),
            Category::Memory => self
                .memory
                .iter()
                .map(|p| PartSummary::of(category, p))
                .collect(),
            Category::Storage => self
                .storage
                .iter()
                .map(|p| PartSummary::of(category, p))
                .collect(),
            Category::Psu => self
                .psu
                .iter()
                .map(|p| PartSummary::of(category, p))
                .collect(),
            Category::Cooler => self
                .coolers
                .iter()
                .map(|p| PartSummary::of(category, p))
                .collect(),
            Category::Case => self
                .cases
                .iter()
                .map(|p| PartSummary::of(category, p))
                .collect(),
        }
    }

    /// Look up a part by category and id, as a category-tagged clone.
    pub fn find(&self, category: Category, id: &str) -> Result<PartPick, RigError> {
        let missing = || RigError::UnknownPart {
            category: category.to_string(),
            id: id.to_string(),
        };
        let pick = match category {
            Category::Cpu => self
                .cpus
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .map(PartPick::Cpu),
            Category::Gpu => self
                .gpus
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .map(PartPick::Gpu),
            Category::Motherboard => self
                .motherboards
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .map(PartPick::Motherboard),
            Category::Memory => self
                .memory
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .map(PartPick::Memory),
            Category::Storage => self
                .storage
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .map(PartPick::Storage),
            Category::Psu => self
                .psu
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .map(PartPick::Psu),
            Category::Cooler => self
                .coolers
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .map(PartPick::Cooler),
            Category::Case => self
                .cases
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .map(PartPick::Case),
        };
        pick.ok_or_else(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        serde_json::from_str(
            r#"{
                "cpus": [
                    {"id": "r5-7600", "name": "Ryzen 5 7600", "priceRange": {"min": 1300, "max": 1500},
                     "score": 72, "platform": "AM5", "memoryType": "DDR5", "tdp": 65}
                ],
                "gpus": [
                    {"id": "rtx-4060", "priceRange": {"min": 2300, "max": 2600},
                     "score": 60, "brand": "NVIDIA", "vram": 8, "power": 115}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn camel_case_documents_deserialize() {
        let cat = catalog();
        assert_eq!(cat.len(Category::Cpu), 1);
        assert_eq!(cat.cpus[0].platform, "AM5");
        assert_eq!(cat.gpus[0].power, 115.0);
        assert_eq!(cat.len(Category::Case), 0);
    }

    #[test]
    fn find_returns_tagged_part() {
        let cat = catalog();
        let pick = cat.find(Category::Gpu, "rtx-4060").unwrap();
        assert_eq!(pick.category(), Category::Gpu);
        assert_eq!(pick.summary().id, "rtx-4060");

        assert!(cat.find(Category::Gpu, "gtx-690").is_err());
    }
}
