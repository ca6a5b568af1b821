//! Random garden events — one-shot effects on points, growth or inventory.
//!
//! `trigger` rolls one of five equally likely events and applies it. It
//! returns a structured [`EventOutcome`] with the numeric effect and the
//! title/message pair a UI shows in its alert; nothing here presents anything.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{PlantCatalog, PlantSpec};
use crate::config::GardenConfig;
use crate::economy::UserEconomy;
use crate::garden::GardenGrid;
use crate::inventory::Inventory;

/// The five random events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GardenEvent {
    /// Flat point bonus.
    LuckyDay,
    /// Rain shortens the remaining time of every growing plant.
    RainyDay,
    /// An animal leaves a smaller point bonus.
    AnimalVisit,
    /// Pests eat some points (never below zero).
    PestAttack,
    /// A free random plant lands in the inventory.
    Gift,
}

impl GardenEvent {
    pub const ALL: [GardenEvent; 5] = [
        GardenEvent::LuckyDay,
        GardenEvent::RainyDay,
        GardenEvent::AnimalVisit,
        GardenEvent::PestAttack,
        GardenEvent::Gift,
    ];

    /// Map a die roll in 1..=5 to an event.
    pub fn from_roll(roll: u8) -> Option<Self> {
        match roll {
            1 => Some(Self::LuckyDay),
            2 => Some(Self::RainyDay),
            3 => Some(Self::AnimalVisit),
            4 => Some(Self::PestAttack),
            5 => Some(Self::Gift),
            _ => None,
        }
    }

    pub fn roll(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::LuckyDay => "Lucky Day!",
            Self::RainyDay => "Rainy Day!",
            Self::AnimalVisit => "Friendly Animal Visit",
            Self::PestAttack => "Pest Attack!",
            Self::Gift => "Gift!",
        }
    }
}

/// What an event actually did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventEffect {
    PointsGained(u32),
    /// `plants` growing plants had their remaining time multiplied by `factor`.
    GrowthBoost { plants: usize, factor: f64 },
    /// Points actually removed (may be less than the nominal penalty).
    PointsLost(u32),
    PlantGranted(PlantSpec),
}

/// Structured result for the UI alert.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    pub event: GardenEvent,
    pub effect: EventEffect,
    pub title: &'static str,
    pub message: String,
}

/// Everything an event may touch.
pub struct EventTargets<'a> {
    pub grid: &'a mut GardenGrid,
    pub economy: &'a mut UserEconomy,
    pub inventory: &'a mut Inventory,
    pub catalog: &'a PlantCatalog,
    pub config: &'a GardenConfig,
}

/// Roll a random event and apply it.
pub fn trigger(targets: EventTargets<'_>, rng: &mut impl Rng) -> EventOutcome {
    let event = GardenEvent::roll(rng);
    apply(event, targets, rng)
}

/// Apply a specific event. `rng` is only used by the gift.
pub fn apply(event: GardenEvent, targets: EventTargets<'_>, rng: &mut impl Rng) -> EventOutcome {
    let config = targets.config;
    let (effect, message) = match event {
        GardenEvent::LuckyDay => {
            let bonus = config.lucky_day_bonus;
            targets.economy.credit(bonus);
            (
                EventEffect::PointsGained(bonus),
                format!("You've earned a bonus of {} points!", bonus),
            )
        }
        GardenEvent::RainyDay => {
            let factor = config.weather_factor;
            let mut plants = 0;
            for (_, plant) in targets.grid.plants_mut() {
                if plant.scale_remaining(factor) {
                    plants += 1;
                }
            }
            (
                EventEffect::GrowthBoost { plants, factor },
                "Plants are growing faster thanks to the rain!".to_string(),
            )
        }
        GardenEvent::AnimalVisit => {
            let reward = config.animal_visit_bonus;
            targets.economy.credit(reward);
            (
                EventEffect::PointsGained(reward),
                format!(
                    "An animal visited your garden and left you {} points!",
                    reward
                ),
            )
        }
        GardenEvent::PestAttack => {
            let lost = targets.economy.penalize(config.pest_penalty);
            (
                EventEffect::PointsLost(lost),
                format!("Pests attacked your garden. You lost {} points!", lost),
            )
        }
        GardenEvent::Gift => {
            let spec = targets.catalog.pick(rng).clone();
            let message = format!("You received a free {} in your inventory!", spec.id);
            targets.inventory.grant(spec.clone());
            (EventEffect::PlantGranted(spec), message)
        }
    };

    log::info!("event {:?}: {}", event, message);
    EventOutcome {
        event,
        effect,
        title: event.title(),
        message,
    }
}
