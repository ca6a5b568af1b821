//! Precondition failures reported by garden operations.
//!
//! None of these are exceptional: they are the reasons a button in the UI
//! should have been disabled. Every public operation returns one instead of
//! silently doing nothing, and a failed operation never changes state.

/// Why a slot could not be planted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotIssue {
    /// Index is past the end of the grid.
    OutOfRange,
    /// Slot has not been unlocked yet.
    Locked,
    /// Slot already holds a plant.
    Occupied,
}

/// Error returned by a garden, mission, or habit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GardenError {
    /// Not enough points to pay for the action.
    InsufficientFunds { needed: u32, available: u32 },
    /// Slot cannot accept a new plant.
    SlotUnavailable { index: usize, issue: SlotIssue },
    /// Slot holds nothing to harvest.
    SlotEmpty(usize),
    /// Plant in this slot has not reached its final stage.
    NotReady(usize),
    /// Every slot is already unlocked.
    NoLockedSlot,
    /// Species id is not in the catalog.
    UnknownSpecies(String),
    /// No mission at this index.
    MissionOutOfRange { index: usize, len: usize },
    /// Mission has not reached its target yet.
    MissionIncomplete(usize),
    /// No habit at this index.
    HabitOutOfRange { index: usize, len: usize },
    /// Habit was completed recently and is still cooling down.
    HabitCoolingDown(usize),
}

impl std::fmt::Display for GardenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GardenError::InsufficientFunds { needed, available } => write!(
                f,
                "not enough points: need {}, have {}",
                needed, available
            ),
            GardenError::SlotUnavailable { index, issue } => match issue {
                SlotIssue::OutOfRange => write!(f, "slot {} does not exist", index),
                SlotIssue::Locked => write!(f, "slot {} is locked", index),
                SlotIssue::Occupied => write!(f, "slot {} is already planted", index),
            },
            GardenError::SlotEmpty(index) => write!(f, "slot {} has nothing to harvest", index),
            GardenError::NotReady(index) => write!(f, "plant in slot {} is still growing", index),
            GardenError::NoLockedSlot => write!(f, "garden is already fully expanded"),
            GardenError::UnknownSpecies(id) => write!(f, "unknown plant '{}'", id),
            GardenError::MissionOutOfRange { index, len } => {
                write!(f, "mission {} does not exist ({} active)", index, len)
            }
            GardenError::MissionIncomplete(index) => {
                write!(f, "mission {} is not complete yet", index)
            }
            GardenError::HabitOutOfRange { index, len } => {
                write!(f, "habit {} does not exist ({} habits)", index, len)
            }
            GardenError::HabitCoolingDown(index) => {
                write!(f, "habit {} was just completed", index)
            }
        }
    }
}

impl std::error::Error for GardenError {}
