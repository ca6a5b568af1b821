//! Eco habits — the everyday actions that earn the points the garden spends.
//!
//! A completed habit pays once, then cools down for a few seconds before it
//! can be completed again. Cooldowns advance on the same tick as the garden.

use crate::economy::UserEconomy;
use crate::error::GardenError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    pub name: String,
    pub points: u32,
    /// Icon identifier for the host UI.
    pub icon: String,
}

impl Habit {
    pub fn new(name: &str, points: u32, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            points,
            icon: icon.to_string(),
        }
    }
}

pub fn standard_habits() -> Vec<Habit> {
    vec![
        Habit::new("Use a Reusable Bottle", 10, "drop.fill"),
        Habit::new("Take Shorter Showers", 15, "shower.fill"),
        Habit::new("Recycle", 5, "arrow.2.circlepath"),
        Habit::new("Use Public Transport", 20, "bus"),
    ]
}

#[derive(Debug, Clone)]
struct HabitState {
    habit: Habit,
    cooldown: f64,
}

#[derive(Debug, Clone)]
pub struct HabitBoard {
    entries: Vec<HabitState>,
    cooldown_secs: f64,
}

impl Default for HabitBoard {
    fn default() -> Self {
        Self::new(standard_habits(), 5.0)
    }
}

impl HabitBoard {
    pub fn new(habits: Vec<Habit>, cooldown_secs: f64) -> Self {
        Self {
            entries: habits
                .into_iter()
                .map(|habit| HabitState {
                    habit,
                    cooldown: 0.0,
                })
                .collect(),
            cooldown_secs,
        }
    }

    pub fn habits(&self) -> impl Iterator<Item = &Habit> {
        self.entries.iter().map(|e| &e.habit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the habit at `index` was completed and is still cooling down.
    pub fn is_completed(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|e| e.cooldown > 0.0)
    }

    /// Mark a habit done and credit its points. Returns the points earned.
    pub fn complete(&mut self, index: usize, economy: &mut UserEconomy) -> Result<u32, GardenError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(GardenError::HabitOutOfRange { index, len })?;
        if entry.cooldown > 0.0 {
            return Err(GardenError::HabitCoolingDown(index));
        }

        entry.cooldown = self.cooldown_secs;
        economy.credit(entry.habit.points);
        log::debug!("habit '{}' done, +{} pts", entry.habit.name, entry.habit.points);
        Ok(entry.habit.points)
    }

    /// Run cooldowns down by `delta` seconds.
    pub fn tick(&mut self, delta: f64) {
        if !(delta > 0.0) {
            return;
        }
        for entry in &mut self.entries {
            entry.cooldown = (entry.cooldown - delta).max(0.0);
        }
    }
}
