//! Growth clock — advances every growing plant by a time step.
//!
//! There is no timer in here. A host calls [`tick`] with the elapsed seconds
//! (normally the 1-second interval from `GardenConfig`); a thread-backed
//! driver lives in [`crate::ticker`].
//!
//! Each plant is a monotonic state machine:
//! Growing → (stage advances) → Grown, awaiting harvest → removed.
//! A species with `n` stages spends `duration / n` seconds in each
//! non-final stage. Overshoot carries into the next stage, so one 20-second
//! tick lands in the same place as twenty 1-second ticks.

use crate::garden::{GardenGrid, PlantInstance};

/// A plant that moved to a new stage during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageAdvance {
    pub slot: usize,
    pub species: String,
    pub stage: usize,
    /// True when this advance reached the final stage.
    pub grown: bool,
}

/// Summary of one tick across the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub advanced: Vec<StageAdvance>,
    /// Plants still growing after the tick.
    pub still_growing: usize,
}

impl TickReport {
    /// Slots whose plant became harvestable this tick.
    pub fn newly_grown(&self) -> impl Iterator<Item = usize> + '_ {
        self.advanced.iter().filter(|a| a.grown).map(|a| a.slot)
    }
}

/// Advance one plant by `delta` seconds. Returns how many stages it moved.
pub fn advance_plant(plant: &mut PlantInstance, delta: f64) -> usize {
    if !plant.growing || !(delta > 0.0) {
        return 0;
    }

    let last = plant.spec.last_stage();
    let phase = plant.spec.phase_duration();
    let mut moved = 0;

    plant.time_remaining -= delta;
    while plant.time_remaining <= 0.0 && plant.stage < last {
        plant.stage += 1;
        plant.time_remaining += phase;
        moved += 1;
    }

    if plant.stage >= last {
        plant.stage = last;
        plant.growing = false;
        plant.time_remaining = 0.0;
        plant.progress = 1.0;
    } else {
        plant.progress = plant.progress.max(plant.compute_progress());
    }

    moved
}

/// Advance every growing plant in the grid by `delta` seconds.
pub fn tick(grid: &mut GardenGrid, delta: f64) -> TickReport {
    let mut report = TickReport::default();

    for (slot, plant) in grid.plants_mut() {
        let moved = advance_plant(plant, delta);
        if moved > 0 {
            log::debug!(
                "slot {}: {} reached stage {}{}",
                slot,
                plant.spec.id,
                plant.stage,
                if plant.growing { "" } else { " (grown)" }
            );
            report.advanced.push(StageAdvance {
                slot,
                species: plant.spec.id.clone(),
                stage: plant.stage,
                grown: !plant.growing,
            });
        }
        if plant.growing {
            report.still_growing += 1;
        }
    }

    report
}
