//! Plant catalog — species definitions, growth stages, costs and profits.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Immutable description of a plant species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSpec {
    /// Species id, doubles as the display name ("Sunflower").
    pub id: String,
    pub emoji: String,
    /// Stage symbols in growth order; the last one is the grown plant.
    pub stages: Vec<String>,
    /// Total growth time in seconds.
    pub growth_duration: f64,
    pub cost: u32,
    pub profit: u32,
}

impl PlantSpec {
    pub fn new(
        id: &str,
        emoji: &str,
        stages: &[&str],
        growth_duration: f64,
        cost: u32,
        profit: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            emoji: emoji.to_string(),
            stages: stages.iter().map(|s| s.to_string()).collect(),
            growth_duration,
            cost,
            profit,
        }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Index of the grown stage.
    pub fn last_stage(&self) -> usize {
        self.stages.len().saturating_sub(1)
    }

    /// Seconds spent in each non-final stage. Stages are equal-width.
    pub fn phase_duration(&self) -> f64 {
        self.growth_duration / self.stages.len().max(1) as f64
    }

    /// Symbol for a stage, falling back to the species emoji.
    pub fn stage_symbol(&self, stage: usize) -> &str {
        self.stages
            .get(stage)
            .map(String::as_str)
            .unwrap_or(&self.emoji)
    }

    /// Check the species is usable by the growth clock.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::NoStages(self.id.clone()));
        }
        if !(self.growth_duration.is_finite() && self.growth_duration > 0.0) {
            return Err(ConfigError::InvalidDuration(self.id.clone()));
        }
        Ok(())
    }
}

/// The set of species a player can buy. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantCatalog {
    species: Vec<PlantSpec>,
}

impl Default for PlantCatalog {
    fn default() -> Self {
        Self {
            species: standard_species(),
        }
    }
}

impl PlantCatalog {
    /// Build a catalog, rejecting empty lists, duplicate ids and invalid species.
    pub fn new(species: Vec<PlantSpec>) -> Result<Self, ConfigError> {
        if species.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, spec) in species.iter().enumerate() {
            spec.validate()?;
            if species[..i].iter().any(|other| other.id == spec.id) {
                return Err(ConfigError::DuplicateSpecies(spec.id.clone()));
            }
        }
        Ok(Self { species })
    }

    pub fn species(&self) -> &[PlantSpec] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PlantSpec> {
        self.species.iter().find(|s| s.id == id)
    }

    /// Species the player can currently pay for.
    pub fn affordable(&self, points: u32) -> impl Iterator<Item = &PlantSpec> {
        self.species.iter().filter(move |s| s.cost <= points)
    }

    /// Uniformly random species.
    pub fn pick(&self, rng: &mut impl Rng) -> &PlantSpec {
        &self.species[rng.gen_range(0..self.species.len())]
    }
}

/// The three species shipped with the app.
pub fn standard_species() -> Vec<PlantSpec> {
    vec![
        PlantSpec::new("Sprout", "🌱", &["🌱", "🌿", "🌸"], 30.0, 10, 20),
        PlantSpec::new("Sunflower", "🌻", &["🌻", "🌼", "🌼"], 45.0, 15, 30),
        PlantSpec::new("Flower", "🌸", &["🌸", "🌷", "🌹"], 60.0, 20, 40),
    ]
}
