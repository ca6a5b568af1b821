//! Garden session — the single actor that owns all garden state.
//!
//! A session bundles the grid, missions, inventory, habits and the player's
//! economy and exposes the calls a UI makes. Every call mutates the bundle as
//! one unit; hosts that tick from another thread wrap the session in a mutex
//! (see [`crate::ticker::SharedSession`]).

use rand::Rng;

use crate::catalog::PlantCatalog;
use crate::config::{ConfigError, GardenConfig};
use crate::economy::UserEconomy;
use crate::error::GardenError;
use crate::events::{self, EventOutcome, EventTargets};
use crate::garden::GardenGrid;
use crate::growth::{self, TickReport};
use crate::habits::{standard_habits, HabitBoard};
use crate::inventory::Inventory;
use crate::mission::{Mission, MissionTracker};
use crate::persistence::{self, KeyValueStore, StoreError};

/// Returned by a successful `plant`.
#[derive(Debug, Clone, PartialEq)]
pub struct Planted {
    pub slot: usize,
    pub species: String,
    pub cost: u32,
    pub points: u32,
    pub missions_advanced: usize,
}

/// Returned by a successful `harvest`.
#[derive(Debug, Clone, PartialEq)]
pub struct Harvested {
    pub slot: usize,
    pub species: String,
    pub profit: u32,
    pub points: u32,
    pub missions_advanced: usize,
}

#[derive(Debug, Clone)]
pub struct GardenSession {
    config: GardenConfig,
    catalog: PlantCatalog,
    grid: GardenGrid,
    missions: MissionTracker,
    inventory: Inventory,
    habits: HabitBoard,
    economy: UserEconomy,
}

impl GardenSession {
    /// Fresh session: empty grid sized by `config`, starter missions.
    ///
    /// Rejects a config that fails [`GardenConfig::validate`].
    pub fn new(
        config: GardenConfig,
        catalog: PlantCatalog,
        economy: UserEconomy,
    ) -> Result<Self, Vec<ConfigError>> {
        check_config(&config)?;
        Ok(Self::assemble(config, catalog, economy))
    }

    fn assemble(config: GardenConfig, catalog: PlantCatalog, economy: UserEconomy) -> Self {
        let grid = GardenGrid::new(config.initial_slots, config.unlocked_slots);
        let habits = HabitBoard::new(standard_habits(), config.habit_cooldown_secs);
        Self {
            config,
            catalog,
            grid,
            missions: MissionTracker::default(),
            inventory: Inventory::default(),
            habits,
            economy,
        }
    }

    /// Hydrate from a store, falling back to defaults for anything missing.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &S,
        config: GardenConfig,
        catalog: PlantCatalog,
    ) -> Result<Self, Vec<ConfigError>> {
        check_config(&config)?;
        let grid = persistence::load_garden(store, &config);
        let missions = persistence::load_missions(store);
        let inventory = persistence::load_inventory(store);
        let economy = persistence::load_user(store);
        let habits = HabitBoard::new(standard_habits(), config.habit_cooldown_secs);

        log::info!(
            "loaded garden: {} slots ({} locked), {} growing, {} missions, {} pts",
            grid.len(),
            grid.locked_count(),
            grid.growing_count(),
            missions.len(),
            economy.points()
        );
        Ok(Self {
            config,
            catalog,
            grid,
            missions,
            inventory,
            habits,
            economy,
        })
    }

    /// Flush every blob to the store.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        persistence::save_garden(store, &self.grid)?;
        persistence::save_missions(store, &self.missions)?;
        persistence::save_inventory(store, &self.inventory)?;
        persistence::save_user(store, &self.economy)?;
        log::info!("saved garden ({} pts)", self.economy.points());
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PlantCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &GardenGrid {
        &self.grid
    }

    pub fn missions(&self) -> &MissionTracker {
        &self.missions
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn habits(&self) -> &HabitBoard {
        &self.habits
    }

    pub fn economy(&self) -> &UserEconomy {
        &self.economy
    }

    pub fn points(&self) -> u32 {
        self.economy.points()
    }

    /// Add points earned outside the garden.
    pub fn credit(&mut self, amount: u32) {
        self.economy.credit(amount);
    }

    pub fn add_mission(&mut self, mission: Mission) {
        self.missions.add(mission);
    }

    // ── Actions ─────────────────────────────────────────────────────────

    pub fn plant(&mut self, slot: usize, species: &str) -> Result<Planted, GardenError> {
        let spec = self
            .catalog
            .get(species)
            .ok_or_else(|| GardenError::UnknownSpecies(species.to_string()))?;
        self.grid.plant(slot, spec, &mut self.economy)?;
        let missions_advanced = self.missions.record_planting(spec);

        Ok(Planted {
            slot,
            species: spec.id.clone(),
            cost: spec.cost,
            points: self.economy.points(),
            missions_advanced,
        })
    }

    pub fn harvest(&mut self, slot: usize) -> Result<Harvested, GardenError> {
        let harvest = self.grid.harvest(slot, &mut self.economy)?;
        let missions_advanced = self.missions.record_harvest();

        Ok(Harvested {
            slot,
            species: harvest.species,
            profit: harvest.profit,
            points: self.economy.points(),
            missions_advanced,
        })
    }

    /// Unlock the next locked slot. Returns its index.
    pub fn expand(&mut self) -> Result<usize, GardenError> {
        self.grid.expand(self.config.expansion_cost, &mut self.economy)
    }

    pub fn claim_mission(&mut self, index: usize) -> Result<Mission, GardenError> {
        self.missions.claim(index, &mut self.economy)
    }

    pub fn complete_habit(&mut self, index: usize) -> Result<u32, GardenError> {
        self.habits.complete(index, &mut self.economy)
    }

    pub fn trigger_event(&mut self, rng: &mut impl Rng) -> EventOutcome {
        events::trigger(
            EventTargets {
                grid: &mut self.grid,
                economy: &mut self.economy,
                inventory: &mut self.inventory,
                catalog: &self.catalog,
                config: &self.config,
            },
            rng,
        )
    }

    /// Advance growth and habit cooldowns by `delta` seconds.
    pub fn tick(&mut self, delta: f64) -> TickReport {
        self.habits.tick(delta);
        growth::tick(&mut self.grid, delta)
    }
}

fn check_config(config: &GardenConfig) -> Result<(), Vec<ConfigError>> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        for error in &errors {
            log::error!("invalid garden config: {}", error);
        }
        Err(errors)
    }
}

impl Default for GardenSession {
    fn default() -> Self {
        Self::assemble(
            GardenConfig::default(),
            PlantCatalog::default(),
            UserEconomy::default(),
        )
    }
}
