//! Integration tests for a full garden session.
//!
//! Exercises: plant → tick → harvest → missions → events → save/reload,
//! all through the public `GardenSession` API.

use ecogarden_logic::catalog::{PlantCatalog, PlantSpec};
use ecogarden_logic::config::{ConfigError, GardenConfig};
use ecogarden_logic::economy::UserEconomy;
use ecogarden_logic::error::GardenError;
use ecogarden_logic::events::{EventEffect, GardenEvent};
use ecogarden_logic::garden::SlotView;
use ecogarden_logic::persistence::{
    FileStore, KeyValueStore, MemoryStore, GARDEN_KEY, MISSIONS_KEY,
};
use ecogarden_logic::session::GardenSession;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ── Helpers ────────────────────────────────────────────────────────────

fn session(points: u32) -> GardenSession {
    GardenSession::new(
        GardenConfig::default(),
        PlantCatalog::default(),
        UserEconomy::new("Tester", points),
    )
    .unwrap()
}

fn test_catalog() -> PlantCatalog {
    PlantCatalog::new(vec![
        PlantSpec::new("Basil", "🌿", &["🌱", "🌿", "🪴"], 30.0, 10, 25),
        PlantSpec::new("Sunflower", "🌻", &["🌻", "🌼", "🌼"], 45.0, 15, 30),
    ])
    .unwrap()
}

fn tick_until_grown(session: &mut GardenSession, slot: usize) -> u32 {
    let mut ticks = 0;
    while session
        .grid()
        .get(slot)
        .and_then(|s| s.plant())
        .is_some_and(|p| p.is_growing())
    {
        session.tick(1.0);
        ticks += 1;
        assert!(ticks < 10_000, "plant never finished growing");
    }
    ticks
}

// ── Economy scenarios ──────────────────────────────────────────────────

#[test]
fn broke_player_cannot_plant_until_funded() {
    let mut session = GardenSession::new(
        GardenConfig::default(),
        test_catalog(),
        UserEconomy::new("Tester", 0),
    )
    .unwrap();
    assert_eq!(
        session.plant(0, "Basil"),
        Err(GardenError::InsufficientFunds {
            needed: 10,
            available: 0
        })
    );
    assert!(session.grid().get(0).unwrap().is_empty());

    session.credit(10);
    session.plant(0, "Basil").unwrap();
    assert_eq!(session.points(), 0);
    let plant = session.grid().get(0).unwrap().plant().unwrap();
    assert!(plant.is_growing());
}

#[test]
fn planting_never_overdraws() {
    let mut session = session(24);
    session.plant(0, "Sprout").unwrap();
    session.plant(1, "Sprout").unwrap();
    assert_eq!(session.points(), 4);
    assert!(matches!(
        session.plant(2, "Sprout"),
        Err(GardenError::InsufficientFunds { .. })
    ));
    assert_eq!(session.points(), 4);
}

// ── Growth scenarios ───────────────────────────────────────────────────

#[test]
fn thirty_second_three_stage_plant_grows_in_two_phases() {
    let mut session = GardenSession::new(
        GardenConfig::default(),
        test_catalog(),
        UserEconomy::new("Tester", 10),
    )
    .unwrap();
    session.plant(0, "Basil").unwrap();

    for _ in 0..10 {
        session.tick(1.0);
    }
    let plant = session.grid().get(0).unwrap().plant().unwrap();
    assert_eq!(plant.stage(), 1);
    assert!((plant.time_remaining() - 10.0).abs() < 1e-9);

    for _ in 0..10 {
        session.tick(1.0);
    }
    let plant = session.grid().get(0).unwrap().plant().unwrap();
    assert_eq!(plant.stage(), 2);
    assert!(!plant.is_growing());
    assert_eq!(plant.progress(), 1.0);
    assert_eq!(
        session.grid().get(0).unwrap().view(),
        SlotView::Ready { symbol: "🪴" }
    );
}

#[test]
fn harvest_credits_profit_and_empties_slot() {
    let mut session = session(20);
    session.plant(3, "Flower").unwrap();
    assert_eq!(session.harvest(3), Err(GardenError::NotReady(3)));
    assert_eq!(session.points(), 0);

    let ticks = tick_until_grown(&mut session, 3);
    assert_eq!(ticks, 40);

    let harvested = session.harvest(3).unwrap();
    assert_eq!(harvested.profit, 40);
    assert_eq!(session.points(), 40);
    assert!(session.grid().get(3).unwrap().is_empty());
    assert_eq!(session.harvest(3), Err(GardenError::SlotEmpty(3)));
}

// ── Missions ───────────────────────────────────────────────────────────

#[test]
fn sunflower_mission_completes_and_pays_once() {
    let mut session = session(45);
    for slot in 0..3 {
        session.plant(slot, "Sunflower").unwrap();
    }
    assert_eq!(session.points(), 0);
    let mission = &session.missions().missions()[0];
    assert_eq!(mission.progress, 3);
    assert!(mission.is_completed());

    let claimed = session.claim_mission(0).unwrap();
    assert_eq!(claimed.description, "Plant 3 Sunflowers");
    assert_eq!(session.points(), 30);
    assert_eq!(session.missions().len(), 1);
    assert_eq!(
        session.claim_mission(0),
        Err(GardenError::MissionIncomplete(0))
    );
}

#[test]
fn harvest_mission_tracks_every_harvest() {
    let mut session = session(50);
    for slot in 0..5 {
        session.plant(slot, "Sprout").unwrap();
    }
    for _ in 0..20 {
        session.tick(1.0);
    }
    for slot in 0..5 {
        session.harvest(slot).unwrap();
    }
    assert!(session.missions().missions()[1].is_completed());
    session.claim_mission(1).unwrap();
    assert_eq!(session.points(), 5 * 20 + 50);
}

// ── Events ─────────────────────────────────────────────────────────────

#[test]
fn events_respect_their_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut session = session(30);
    session.plant(0, "Sprout").unwrap();
    session.tick(3.0);

    for _ in 0..200 {
        let points_before = session.points();
        let stage_before = session.grid().get(0).unwrap().plant().unwrap().stage();
        let remaining_before = session
            .grid()
            .get(0)
            .unwrap()
            .plant()
            .unwrap()
            .time_remaining();
        let inventory_before = session.inventory().len();

        let outcome = session.trigger_event(&mut rng);
        let plant = session.grid().get(0).unwrap().plant().unwrap();
        assert_eq!(plant.stage(), stage_before);

        match outcome.effect {
            EventEffect::PointsGained(n) => assert_eq!(session.points(), points_before + n),
            EventEffect::PointsLost(n) => {
                assert_eq!(n, points_before.min(10));
                assert_eq!(session.points(), points_before - n);
            }
            EventEffect::GrowthBoost { factor, .. } => {
                assert!((plant.time_remaining() - remaining_before * factor).abs() < 1e-9);
            }
            EventEffect::PlantGranted(_) => {
                assert_eq!(session.inventory().len(), inventory_before + 1);
            }
        }
        assert_eq!(outcome.title, outcome.event.title());
    }
}

#[test]
fn pest_attack_never_drives_points_negative() {
    let config = GardenConfig {
        lucky_day_bonus: 0,
        animal_visit_bonus: 0,
        ..GardenConfig::default()
    };
    let mut session =
        GardenSession::new(config, PlantCatalog::default(), UserEconomy::new("Tester", 5))
            .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let mut pests = 0;
    for _ in 0..100 {
        let outcome = session.trigger_event(&mut rng);
        if outcome.event == GardenEvent::PestAttack {
            pests += 1;
            assert_eq!(session.points(), 0);
        }
    }
    assert!(pests > 0);
    assert_eq!(session.points(), 0);
}

// ── Persistence ────────────────────────────────────────────────────────

#[test]
fn session_survives_reload() {
    let mut store = MemoryStore::new();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut original = session(100);
    original.plant(0, "Sunflower").unwrap();
    original.plant(1, "Sprout").unwrap();
    original.tick(12.0);
    original.trigger_event(&mut rng);
    original.save(&mut store).unwrap();

    let mut reloaded =
        GardenSession::load(&store, GardenConfig::default(), PlantCatalog::default()).unwrap();
    assert_eq!(reloaded.points(), original.points());
    assert_eq!(reloaded.grid(), original.grid());
    assert_eq!(reloaded.missions(), original.missions());
    assert_eq!(reloaded.inventory(), original.inventory());

    for _ in 0..8 {
        original.tick(1.0);
        reloaded.tick(1.0);
    }
    assert_eq!(reloaded.grid(), original.grid());
}

#[test]
fn corrupt_store_falls_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.save(GARDEN_KEY, b"garbage").unwrap();
    store.save(MISSIONS_KEY, b"{}").unwrap();

    let session =
        GardenSession::load(&store, GardenConfig::default(), PlantCatalog::default()).unwrap();
    assert_eq!(session.grid().len(), 9);
    assert_eq!(session.grid().locked_count(), 0);
    assert_eq!(session.missions().len(), 2);
    assert_eq!(session.missions().missions()[0].description, "Plant 3 Sunflowers");
    assert!(session.inventory().is_empty());
    assert_eq!(session.points(), 0);
}

#[test]
fn stored_mission_without_target_cannot_be_claimed_for_free() {
    let mut store = MemoryStore::new();
    store
        .save(
            MISSIONS_KEY,
            br#"[{"description":"x","goal":{"kind":"harvest"},"target":0,"progress":0,"reward":999}]"#,
        )
        .unwrap();

    let mut session =
        GardenSession::load(&store, GardenConfig::default(), PlantCatalog::default()).unwrap();
    assert_eq!(session.missions().len(), 2);
    assert_eq!(
        session.claim_mission(0),
        Err(GardenError::MissionIncomplete(0))
    );
    assert_eq!(session.points(), 0);
}

#[test]
fn invalid_config_never_builds_a_session() {
    let config = GardenConfig {
        weather_factor: 2.0,
        initial_slots: 0,
        ..GardenConfig::default()
    };
    let errors = GardenSession::new(config, PlantCatalog::default(), UserEconomy::default())
        .unwrap_err();
    assert_eq!(
        errors,
        vec![
            ConfigError::NoSlots,
            ConfigError::UnlockedExceedsSlots {
                unlocked: 9,
                slots: 0
            },
            ConfigError::InvalidWeatherFactor,
        ]
    );
}

#[test]
fn file_store_round_trip() {
    let dir = std::env::temp_dir().join(format!("ecogarden-it-{}", std::process::id()));
    let mut store = FileStore::new(&dir);

    let mut session = session(40);
    session.plant(2, "Flower").unwrap();
    session.save(&mut store).unwrap();

    let reloaded =
        GardenSession::load(&store, GardenConfig::default(), PlantCatalog::default()).unwrap();
    assert_eq!(reloaded.grid(), session.grid());
    assert_eq!(reloaded.points(), 20);

    std::fs::remove_dir_all(&dir).unwrap();
}
