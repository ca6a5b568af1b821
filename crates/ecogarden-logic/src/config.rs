//! Garden tunables — grid size, expansion price, tick length, event magnitudes.
//!
//! Every number the simulation treats as a balance knob lives here so a host
//! can load it from a settings file instead of recompiling. `validate` reports
//! all problems at once, the same way the profile screen wants to show them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Balance and timing configuration for one garden session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Total number of slots in a fresh grid.
    pub initial_slots: usize,
    /// How many of those slots start unlocked (index order).
    pub unlocked_slots: usize,
    /// Points charged by `expand`.
    pub expansion_cost: u32,
    /// Seconds between growth ticks when driven by `TickDriver::from_config`.
    pub tick_interval_secs: f64,
    /// Multiplier applied to remaining growth time by the rain event.
    pub weather_factor: f64,
    /// Points granted by the "Lucky Day" event.
    pub lucky_day_bonus: u32,
    /// Points granted by the "Friendly Animal Visit" event.
    pub animal_visit_bonus: u32,
    /// Points removed by the "Pest Attack" event (floored at zero).
    pub pest_penalty: u32,
    /// Seconds a completed habit stays locked before it can be done again.
    pub habit_cooldown_secs: f64,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            initial_slots: 9,
            unlocked_slots: 9,
            expansion_cost: 50,
            tick_interval_secs: 1.0,
            weather_factor: 0.9,
            lucky_day_bonus: 20,
            animal_visit_bonus: 15,
            pest_penalty: 10,
            habit_cooldown_secs: 5.0,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid must have at least one slot.
    NoSlots,
    /// More unlocked slots requested than the grid holds.
    UnlockedExceedsSlots { unlocked: usize, slots: usize },
    /// Tick interval must be a positive, finite number of seconds.
    InvalidTickInterval,
    /// Weather factor must lie in (0, 1].
    InvalidWeatherFactor,
    /// Habit cooldown must be finite and non-negative.
    InvalidHabitCooldown,
    /// Catalog has no species.
    EmptyCatalog,
    /// Species has no growth stages.
    NoStages(String),
    /// Species growth duration is not a positive, finite number.
    InvalidDuration(String),
    /// Two species share an id.
    DuplicateSpecies(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoSlots => write!(f, "garden needs at least one slot"),
            ConfigError::UnlockedExceedsSlots { unlocked, slots } => write!(
                f,
                "{} unlocked slots requested but the grid only has {}",
                unlocked, slots
            ),
            ConfigError::InvalidTickInterval => write!(f, "tick interval must be > 0 seconds"),
            ConfigError::InvalidWeatherFactor => write!(f, "weather factor must be in (0, 1]"),
            ConfigError::InvalidHabitCooldown => write!(f, "habit cooldown must be >= 0 seconds"),
            ConfigError::EmptyCatalog => write!(f, "plant catalog is empty"),
            ConfigError::NoStages(id) => write!(f, "plant '{}' has no growth stages", id),
            ConfigError::InvalidDuration(id) => {
                write!(f, "plant '{}' has a non-positive growth duration", id)
            }
            ConfigError::DuplicateSpecies(id) => write!(f, "plant '{}' is listed twice", id),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GardenConfig {
    /// Tick interval as a `Duration`, or `None` if it is not a positive, finite length.
    pub fn tick_interval(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.tick_interval_secs)
            .ok()
            .filter(|d| !d.is_zero())
    }

    /// Validate the configuration, returning all errors found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.initial_slots == 0 {
            errors.push(ConfigError::NoSlots);
        }
        if self.unlocked_slots > self.initial_slots {
            errors.push(ConfigError::UnlockedExceedsSlots {
                unlocked: self.unlocked_slots,
                slots: self.initial_slots,
            });
        }
        if !(self.tick_interval_secs.is_finite() && self.tick_interval_secs > 0.0) {
            errors.push(ConfigError::InvalidTickInterval);
        }
        if !(self.weather_factor > 0.0 && self.weather_factor <= 1.0) {
            errors.push(ConfigError::InvalidWeatherFactor);
        }
        if !(self.habit_cooldown_secs.is_finite() && self.habit_cooldown_secs >= 0.0) {
            errors.push(ConfigError::InvalidHabitCooldown);
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GardenConfig::default().validate().is_empty());
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(
            GardenConfig::default().tick_interval(),
            Some(Duration::from_secs(1))
        );
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = GardenConfig {
                tick_interval_secs: secs,
                ..GardenConfig::default()
            };
            assert_eq!(config.tick_interval(), None, "{} secs", secs);
        }
    }

    #[test]
    fn test_default_balance() {
        let config = GardenConfig::default();
        assert_eq!(config.initial_slots, 9);
        assert_eq!(config.unlocked_slots, 9);
        assert_eq!(config.expansion_cost, 50);
        assert_eq!(config.pest_penalty, 10);
    }

    #[test]
    fn test_collects_every_error() {
        let config = GardenConfig {
            initial_slots: 0,
            unlocked_slots: 3,
            tick_interval_secs: 0.0,
            weather_factor: 1.5,
            habit_cooldown_secs: f64::NAN,
            ..GardenConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ConfigError::NoSlots));
        assert!(errors.contains(&ConfigError::UnlockedExceedsSlots {
            unlocked: 3,
            slots: 0
        }));
        assert!(errors.contains(&ConfigError::InvalidWeatherFactor));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GardenConfig =
            serde_json::from_str(r#"{"initial_slots": 12, "unlocked_slots": 6}"#).unwrap();
        assert_eq!(config.initial_slots, 12);
        assert_eq!(config.unlocked_slots, 6);
        assert_eq!(config.expansion_cost, 50);
        assert!(config.validate().is_empty());
    }
}
