//! Bonus plants granted by events. Append-only.

use serde::{Deserialize, Serialize};

use crate::catalog::PlantSpec;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    plants: Vec<PlantSpec>,
}

impl Inventory {
    pub fn new(plants: Vec<PlantSpec>) -> Self {
        Self { plants }
    }

    pub fn grant(&mut self, spec: PlantSpec) {
        self.plants.push(spec);
    }

    pub fn plants(&self) -> &[PlantSpec] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// How many of a species the player holds.
    pub fn count(&self, species: &str) -> usize {
        self.plants.iter().filter(|p| p.id == species).count()
    }
}
