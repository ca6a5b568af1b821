//! Garden grid — slots, plant instances, planting, harvesting, expansion.
//!
//! The grid exclusively owns its slots and the plants in them. Points are
//! paid through a borrowed [`UserEconomy`]; mission bookkeeping is left to the
//! caller (see [`crate::session`]) so the grid stays a plain state container.

use serde::{Deserialize, Serialize};

use crate::catalog::PlantSpec;
use crate::economy::UserEconomy;
use crate::error::{GardenError, SlotIssue};

// ============================================================================
// PLANT INSTANCE
// ============================================================================

/// A plant growing (or grown) in a slot.
///
/// `growing` is false exactly when `stage` is the species' last stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantInstance {
    pub(crate) spec: PlantSpec,
    pub(crate) stage: usize,
    pub(crate) progress: f64,
    pub(crate) growing: bool,
    pub(crate) time_remaining: f64,
}

impl PlantInstance {
    /// Fresh seedling at stage 0. Single-stage species are grown immediately.
    pub fn sow(spec: &PlantSpec) -> Self {
        let grown = spec.last_stage() == 0;
        Self {
            spec: spec.clone(),
            stage: 0,
            progress: if grown { 1.0 } else { 0.0 },
            growing: !grown,
            time_remaining: if grown { 0.0 } else { spec.phase_duration() },
        }
    }

    pub fn spec(&self) -> &PlantSpec {
        &self.spec
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    /// Overall growth fraction, 0.0..=1.0, reaching 1.0 at the final stage.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Seconds left in the current stage.
    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn is_grown(&self) -> bool {
        self.stage == self.spec.last_stage()
    }

    pub fn symbol(&self) -> &str {
        self.spec.stage_symbol(self.stage)
    }

    /// Scale the time left in the current stage. Grown plants are untouched.
    pub(crate) fn scale_remaining(&mut self, factor: f64) -> bool {
        if !self.growing {
            return false;
        }
        self.time_remaining *= factor;
        self.progress = self.progress.max(self.compute_progress());
        true
    }

    pub(crate) fn compute_progress(&self) -> f64 {
        let last = self.spec.last_stage();
        if last == 0 || self.stage >= last {
            return 1.0;
        }
        let phase = self.spec.phase_duration();
        let within = (1.0 - self.time_remaining / phase).clamp(0.0, 1.0);
        ((self.stage as f64 + within) / last as f64).clamp(0.0, 1.0)
    }

    /// Whether a deserialized instance satisfies the growth invariants.
    fn is_consistent(&self) -> bool {
        self.spec.validate().is_ok()
            && self.stage <= self.spec.last_stage()
            && self.growing != self.is_grown()
            && self.time_remaining.is_finite()
            && self.time_remaining >= 0.0
            && (0.0..=1.0).contains(&self.progress)
    }
}

// ============================================================================
// SLOTS
// ============================================================================

/// One cell of the grid. A locked slot never holds a plant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GardenSlot {
    #[serde(default)]
    pub(crate) plant: Option<PlantInstance>,
    #[serde(default)]
    pub(crate) locked: bool,
}

/// What a UI needs to draw a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotView<'a> {
    Locked,
    Empty,
    Growing {
        symbol: &'a str,
        progress: f64,
        seconds_left: u32,
    },
    Ready {
        symbol: &'a str,
    },
}

impl GardenSlot {
    pub fn locked() -> Self {
        Self {
            plant: None,
            locked: true,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_empty(&self) -> bool {
        self.plant.is_none()
    }

    pub fn plant(&self) -> Option<&PlantInstance> {
        self.plant.as_ref()
    }

    pub fn view(&self) -> SlotView<'_> {
        if self.locked {
            return SlotView::Locked;
        }
        match &self.plant {
            None => SlotView::Empty,
            Some(p) if p.is_growing() => SlotView::Growing {
                symbol: p.symbol(),
                progress: p.progress(),
                seconds_left: p.time_remaining().ceil() as u32,
            },
            Some(p) => SlotView::Ready { symbol: p.symbol() },
        }
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Result of a successful harvest.
#[derive(Debug, Clone, PartialEq)]
pub struct Harvest {
    pub slot: usize,
    pub species: String,
    pub profit: u32,
}

/// Fixed-capacity array of slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GardenGrid {
    slots: Vec<GardenSlot>,
}

impl Default for GardenGrid {
    fn default() -> Self {
        Self::new(9, 9)
    }
}

impl GardenGrid {
    /// Grid of `total` slots whose first `unlocked` are open.
    pub fn new(total: usize, unlocked: usize) -> Self {
        let slots = (0..total)
            .map(|i| {
                if i < unlocked {
                    GardenSlot::default()
                } else {
                    GardenSlot::locked()
                }
            })
            .collect();
        Self { slots }
    }

    /// Wrap previously saved slots. Returns `None` if they break an invariant.
    pub fn from_slots(slots: Vec<GardenSlot>) -> Option<Self> {
        let grid = Self { slots };
        grid.is_consistent().then_some(grid)
    }

    pub fn is_consistent(&self) -> bool {
        !self.slots.is_empty()
            && self.slots.iter().all(|slot| match &slot.plant {
                Some(plant) => !slot.locked && plant.is_consistent(),
                None => true,
            })
    }

    pub fn slots(&self) -> &[GardenSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GardenSlot> {
        self.slots.get(index)
    }

    pub fn locked_count(&self) -> usize {
        self.slots.iter().filter(|s| s.locked).count()
    }

    pub fn growing_count(&self) -> usize {
        self.plants().filter(|p| p.is_growing()).count()
    }

    pub fn plants(&self) -> impl Iterator<Item = &PlantInstance> {
        self.slots.iter().filter_map(|s| s.plant.as_ref())
    }

    pub(crate) fn plants_mut(&mut self) -> impl Iterator<Item = (usize, &mut PlantInstance)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.plant.as_mut().map(|p| (i, p)))
    }

    /// Sow `spec` into an empty unlocked slot, paying its cost.
    pub fn plant(
        &mut self,
        index: usize,
        spec: &PlantSpec,
        economy: &mut UserEconomy,
    ) -> Result<&PlantInstance, GardenError> {
        let slot = self.slots.get_mut(index).ok_or(GardenError::SlotUnavailable {
            index,
            issue: SlotIssue::OutOfRange,
        })?;
        if slot.locked {
            return Err(GardenError::SlotUnavailable {
                index,
                issue: SlotIssue::Locked,
            });
        }
        if slot.plant.is_some() {
            return Err(GardenError::SlotUnavailable {
                index,
                issue: SlotIssue::Occupied,
            });
        }
        economy.spend(spec.cost)?;

        log::debug!("planted {} in slot {} for {} pts", spec.id, index, spec.cost);
        let plant: &PlantInstance = slot.plant.insert(PlantInstance::sow(spec));
        Ok(plant)
    }

    /// Pick a fully grown plant, crediting its profit and emptying the slot.
    pub fn harvest(
        &mut self,
        index: usize,
        economy: &mut UserEconomy,
    ) -> Result<Harvest, GardenError> {
        let slot = self.slots.get_mut(index).ok_or(GardenError::SlotUnavailable {
            index,
            issue: SlotIssue::OutOfRange,
        })?;
        match &slot.plant {
            None => return Err(GardenError::SlotEmpty(index)),
            Some(plant) if !plant.is_grown() => return Err(GardenError::NotReady(index)),
            Some(_) => {}
        }
        let Some(plant) = slot.plant.take() else {
            return Err(GardenError::SlotEmpty(index));
        };
        economy.credit(plant.spec.profit);

        log::debug!(
            "harvested {} from slot {} for {} pts",
            plant.spec.id,
            index,
            plant.spec.profit
        );
        Ok(Harvest {
            slot: index,
            species: plant.spec.id,
            profit: plant.spec.profit,
        })
    }

    /// Unlock the first locked slot for `cost` points. Returns its index.
    pub fn expand(&mut self, cost: u32, economy: &mut UserEconomy) -> Result<usize, GardenError> {
        let index = self
            .slots
            .iter()
            .position(|s| s.locked)
            .ok_or(GardenError::NoLockedSlot)?;
        economy.spend(cost)?;
        self.slots[index].locked = false;

        log::debug!("unlocked slot {} for {} pts", index, cost);
        Ok(index)
    }
}
