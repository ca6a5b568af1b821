//! Save/load of garden state through an opaque key-value store.
//!
//! Each piece of state is its own JSON blob under a fixed key, the way the
//! app kept them in user defaults. Loading never fails: a missing, unreadable
//! or undecodable blob is logged and replaced by the default. Saving reports
//! its error so the host can decide whether to retry.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::GardenConfig;
use crate::economy::UserEconomy;
use crate::garden::{GardenGrid, GardenSlot};
use crate::inventory::Inventory;
use crate::mission::{Mission, MissionTracker};

pub const GARDEN_KEY: &str = "gardenGrid";
pub const MISSIONS_KEY: &str = "missions";
pub const INVENTORY_KEY: &str = "inventory";
pub const USER_KEY: &str = "ecoUser";

/// Byte-blob storage addressed by key.
pub trait KeyValueStore {
    /// Read the blob stored under `key`, or `None` if there is none.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    /// Replace the blob stored under `key`.
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

// ============================================================================
// STORES
// ============================================================================

/// In-process store, for tests and embedding hosts that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves a half-written blob.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

// ============================================================================
// TYPED LOAD / SAVE
// ============================================================================

fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let bytes = match store.load(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("could not read '{}', using defaults: {}", key, e);
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("'{}' is corrupt, using defaults: {}", key, e);
            None
        }
    }
}

fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let bytes = serde_json::to_vec(value)?;
    store.save(key, &bytes)
}

/// Saved grid, or a fresh one sized by `config`.
pub fn load_garden<S: KeyValueStore + ?Sized>(store: &S, config: &GardenConfig) -> GardenGrid {
    let fresh = || GardenGrid::new(config.initial_slots, config.unlocked_slots);
    match load_json::<Vec<GardenSlot>, _>(store, GARDEN_KEY) {
        Some(slots) => GardenGrid::from_slots(slots).unwrap_or_else(|| {
            log::warn!("'{}' breaks grid invariants, using defaults", GARDEN_KEY);
            fresh()
        }),
        None => fresh(),
    }
}

pub fn save_garden<S: KeyValueStore + ?Sized>(
    store: &mut S,
    grid: &GardenGrid,
) -> Result<(), StoreError> {
    save_json(store, GARDEN_KEY, grid)
}

/// Saved missions, or the starter pair.
pub fn load_missions<S: KeyValueStore + ?Sized>(store: &S) -> MissionTracker {
    match load_json::<Vec<Mission>, _>(store, MISSIONS_KEY) {
        Some(missions) => MissionTracker::from_missions(missions).unwrap_or_else(|| {
            log::warn!("'{}' has a mission with no target, using defaults", MISSIONS_KEY);
            MissionTracker::default()
        }),
        None => MissionTracker::default(),
    }
}

pub fn save_missions<S: KeyValueStore + ?Sized>(
    store: &mut S,
    missions: &MissionTracker,
) -> Result<(), StoreError> {
    save_json(store, MISSIONS_KEY, missions)
}

/// Saved inventory, or empty.
pub fn load_inventory<S: KeyValueStore + ?Sized>(store: &S) -> Inventory {
    load_json(store, INVENTORY_KEY).unwrap_or_default()
}

pub fn save_inventory<S: KeyValueStore + ?Sized>(
    store: &mut S,
    inventory: &Inventory,
) -> Result<(), StoreError> {
    save_json(store, INVENTORY_KEY, inventory)
}

/// Saved profile, or a new "Eco Enthusiast" with no points.
pub fn load_user<S: KeyValueStore + ?Sized>(store: &S) -> UserEconomy {
    load_json(store, USER_KEY).unwrap_or_default()
}

pub fn save_user<S: KeyValueStore + ?Sized>(
    store: &mut S,
    user: &UserEconomy,
) -> Result<(), StoreError> {
    save_json(store, USER_KEY, user)
}

// ============================================================================
// ERRORS
// ============================================================================

/// Errors that can occur while talking to a store.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Json(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlantCatalog;
    use crate::mission::{Mission, MissionGoal};

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let config = GardenConfig::default();
        assert_eq!(load_garden(&store, &config), GardenGrid::default());
        assert_eq!(load_missions(&store), MissionTracker::default());
        assert!(load_inventory(&store).is_empty());
        assert_eq!(load_user(&store), UserEconomy::default());
    }

    #[test]
    fn test_default_grid_follows_config() {
        let store = MemoryStore::new();
        let config = GardenConfig {
            initial_slots: 12,
            unlocked_slots: 4,
            ..GardenConfig::default()
        };
        let grid = load_garden(&store, &config);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.locked_count(), 8);
    }

    #[test]
    fn test_corrupt_blobs_fall_back() {
        let mut store = MemoryStore::new();
        store.save(GARDEN_KEY, b"{not json").unwrap();
        store.save(MISSIONS_KEY, b"[1, 2, 3]").unwrap();
        store.save(USER_KEY, b"null").unwrap();
        assert_eq!(
            load_garden(&store, &GardenConfig::default()),
            GardenGrid::default()
        );
        assert_eq!(load_missions(&store), MissionTracker::default());
        assert_eq!(load_user(&store), UserEconomy::default());
    }

    #[test]
    fn test_zero_target_mission_falls_back() {
        let mut store = MemoryStore::new();
        store
            .save(
                MISSIONS_KEY,
                br#"[{"description":"x","goal":{"kind":"harvest"},"target":0,"progress":0,"reward":999}]"#,
            )
            .unwrap();
        assert_eq!(load_missions(&store), MissionTracker::default());
    }

    #[test]
    fn test_inconsistent_grid_falls_back() {
        let mut store = MemoryStore::new();
        store.save(GARDEN_KEY, b"[]").unwrap();
        assert_eq!(
            load_garden(&store, &GardenConfig::default()).len(),
            GardenConfig::default().initial_slots
        );
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let catalog = PlantCatalog::default();
        let mut user = UserEconomy::new("Fern", 40);
        user.award_badge("Water Saver");
        let mut grid = GardenGrid::new(6, 5);
        grid.plant(2, catalog.get("Flower").unwrap(), &mut user).unwrap();
        let missions = MissionTracker::new(vec![Mission::new(
            "Harvest 2",
            MissionGoal::Harvest,
            2,
            10,
        )]);
        let mut inventory = Inventory::default();
        inventory.grant(catalog.get("Sprout").unwrap().clone());

        save_garden(&mut store, &grid).unwrap();
        save_missions(&mut store, &missions).unwrap();
        save_inventory(&mut store, &inventory).unwrap();
        save_user(&mut store, &user).unwrap();

        assert_eq!(load_garden(&store, &GardenConfig::default()), grid);
        assert_eq!(load_missions(&store), missions);
        assert_eq!(load_inventory(&store), inventory);
        let loaded = load_user(&store);
        assert_eq!(loaded.points(), 20);
        assert_eq!(loaded.nickname(), "Fern");
        assert_eq!(loaded.badges(), ["Water Saver".to_string()]);
    }

    #[test]
    fn test_file_store() {
        let dir = std::env::temp_dir().join(format!("ecogarden-store-{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert!(store.load("missing").unwrap().is_none());

        store.save("blob", b"[1]").unwrap();
        assert_eq!(store.load("blob").unwrap(), Some(b"[1]".to_vec()));
        assert!(dir.join("blob.json").exists());
        assert!(!dir.join("blob.json.tmp").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
