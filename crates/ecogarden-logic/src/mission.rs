//! Missions — progress-tracked objectives with a one-time point reward.
//!
//! Each mission carries an explicit [`MissionGoal`] that says which garden
//! action advances it. The description is display text only.

use serde::{Deserialize, Serialize};

use crate::catalog::PlantSpec;
use crate::economy::UserEconomy;
use crate::error::GardenError;

/// Which garden action counts toward a mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissionGoal {
    /// Planting a specific species.
    PlantSpecies { species: String },
    /// Harvesting any fully grown plant.
    Harvest,
}

impl MissionGoal {
    fn counts_planting(&self, spec: &PlantSpec) -> bool {
        matches!(self, MissionGoal::PlantSpecies { species } if *species == spec.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub description: String,
    pub goal: MissionGoal,
    pub target: u32,
    /// May exceed `target`; it is not clamped.
    pub progress: u32,
    pub reward: u32,
}

impl Mission {
    pub fn new(description: &str, goal: MissionGoal, target: u32, reward: u32) -> Self {
        Self {
            description: description.to_string(),
            goal,
            target: target.max(1),
            progress: 0,
            reward,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.progress >= self.target
    }
}

/// The canonical starter missions for a new player.
pub fn starter_missions() -> Vec<Mission> {
    vec![
        Mission::new(
            "Plant 3 Sunflowers",
            MissionGoal::PlantSpecies {
                species: "Sunflower".into(),
            },
            3,
            30,
        ),
        Mission::new("Harvest 5 fully grown plants", MissionGoal::Harvest, 5, 50),
    ]
}

/// Active missions, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionTracker {
    missions: Vec<Mission>,
}

impl Default for MissionTracker {
    fn default() -> Self {
        Self::new(starter_missions())
    }
}

impl MissionTracker {
    pub fn new(missions: Vec<Mission>) -> Self {
        Self { missions }
    }

    /// Rebuild from stored missions. `None` if any has a zero target, which
    /// would make it claimable without progress.
    pub fn from_missions(missions: Vec<Mission>) -> Option<Self> {
        missions
            .iter()
            .all(|m| m.target > 0)
            .then_some(Self { missions })
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn add(&mut self, mission: Mission) {
        self.missions.push(mission);
    }

    /// Count a planting toward every matching mission. Returns how many advanced.
    pub fn record_planting(&mut self, spec: &PlantSpec) -> usize {
        self.advance(|goal| goal.counts_planting(spec))
    }

    /// Count a harvest toward every harvest mission. Returns how many advanced.
    pub fn record_harvest(&mut self) -> usize {
        self.advance(|goal| *goal == MissionGoal::Harvest)
    }

    fn advance(&mut self, matches: impl Fn(&MissionGoal) -> bool) -> usize {
        let mut advanced = 0;
        for mission in self.missions.iter_mut().filter(|m| matches(&m.goal)) {
            mission.progress = mission.progress.saturating_add(1);
            advanced += 1;
        }
        advanced
    }

    /// Pay out a completed mission and remove it from the active list.
    pub fn claim(
        &mut self,
        index: usize,
        economy: &mut UserEconomy,
    ) -> Result<Mission, GardenError> {
        let mission = self
            .missions
            .get(index)
            .ok_or(GardenError::MissionOutOfRange {
                index,
                len: self.missions.len(),
            })?;
        if !mission.is_completed() {
            return Err(GardenError::MissionIncomplete(index));
        }

        let mission = self.missions.remove(index);
        economy.credit(mission.reward);
        log::debug!(
            "claimed mission '{}' for {} pts",
            mission.description,
            mission.reward
        );
        Ok(mission)
    }
}
