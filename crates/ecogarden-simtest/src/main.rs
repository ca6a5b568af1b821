//! EcoHabit Headless Garden Harness
//!
//! Plays a scripted garden session against the pure logic crate and checks
//! the economy, growth, mission, event and persistence rules along the way.
//! Runs entirely in-process with no UI and no platform timers.
//!
//! Usage:
//!   cargo run -p ecogarden-simtest
//!   cargo run -p ecogarden-simtest -- --verbose --seed 7 --data-dir /tmp/garden

use std::path::PathBuf;

use ecogarden_logic::catalog::PlantCatalog;
use ecogarden_logic::config::{ConfigError, GardenConfig};
use ecogarden_logic::economy::UserEconomy;
use ecogarden_logic::error::GardenError;
use ecogarden_logic::events::{EventEffect, GardenEvent};
use ecogarden_logic::persistence::FileStore;
use ecogarden_logic::session::GardenSession;
use log::{Level, Log, Metadata, Record};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ── Logging ─────────────────────────────────────────────────────────────

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::Debug } else { Level::Warn };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}

// ── Options ─────────────────────────────────────────────────────────────

struct Options {
    verbose: bool,
    seed: u64,
    data_dir: PathBuf,
}

fn parse_options() -> Options {
    let mut options = Options {
        verbose: false,
        seed: 42,
        data_dir: std::env::temp_dir().join("ecogarden-simtest"),
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--seed" => match args.next().map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => options.seed = seed,
                _ => eprintln!("--seed expects an integer, keeping {}", options.seed),
            },
            "--data-dir" => match args.next() {
                Some(dir) => options.data_dir = PathBuf::from(dir),
                None => eprintln!("--data-dir expects a path"),
            },
            other => eprintln!("ignoring unknown argument '{}'", other),
        }
    }
    options
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let options = parse_options();
    init_logging(options.verbose);
    println!("=== EcoHabit Garden Harness (seed {}) ===\n", options.seed);

    let mut results = Vec::new();

    // 1. Configuration and catalog
    results.extend(validate_config());

    // 2. Planting economy
    results.extend(validate_planting());

    // 3. Growth clock
    results.extend(validate_growth());

    // 4. Missions
    results.extend(validate_missions());

    // 5. Random events
    results.extend(validate_events(options.seed));

    // 6. Persistence round trip
    results.extend(validate_persistence(&options));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Default session with `points` to spend. The default config is checked in
/// `validate_config`, so this never builds from a rejected one.
fn fresh_session(points: u32) -> GardenSession {
    let mut session = GardenSession::default();
    session.credit(points);
    session
}

fn plant_check(
    name: &str,
    session: &mut GardenSession,
    slot: usize,
    species: &str,
) -> TestResult {
    match session.plant(slot, species) {
        Ok(planted) => check(
            name,
            true,
            format!("{} in slot {}, {} pts left", species, slot, planted.points),
        ),
        Err(e) => check(name, false, format!("{} in slot {}: {}", species, slot, e)),
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_config() -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let errors = GardenConfig::default().validate();
    results.push(check(
        "config_default_valid",
        errors.is_empty(),
        format!("{} errors", errors.len()),
    ));

    let accepted = GardenSession::new(
        GardenConfig::default(),
        PlantCatalog::default(),
        UserEconomy::new("Harness", 0),
    );
    results.push(check(
        "session_accepts_default_config",
        accepted.is_ok(),
        format!("{:?}", accepted.err()),
    ));

    let broken = GardenConfig {
        initial_slots: 0,
        weather_factor: 2.0,
        ..GardenConfig::default()
    };
    let rejected = GardenSession::new(broken, PlantCatalog::default(), UserEconomy::default());
    results.push(check(
        "session_rejects_invalid_config",
        rejected
            .as_ref()
            .err()
            .is_some_and(|e| e.contains(&ConfigError::InvalidWeatherFactor)),
        format!("{:?}", rejected.err()),
    ));

    let catalog = PlantCatalog::default();
    let rebuilt = PlantCatalog::new(catalog.species().to_vec());
    results.push(check(
        "catalog_valid",
        rebuilt.is_ok(),
        format!("{} species", catalog.len()),
    ));

    let unprofitable: Vec<_> = catalog
        .species()
        .iter()
        .filter(|s| s.profit <= s.cost)
        .map(|s| s.id.as_str())
        .collect();
    results.push(check(
        "catalog_profitable",
        unprofitable.is_empty(),
        if unprofitable.is_empty() {
            "every species earns more than it costs".to_string()
        } else {
            format!("unprofitable: {}", unprofitable.join(", "))
        },
    ));

    results
}

// ── 2. Planting ─────────────────────────────────────────────────────────

fn validate_planting() -> Vec<TestResult> {
    println!("--- Planting ---");
    let mut results = Vec::new();

    let mut session = fresh_session(0);
    let denied = session.plant(0, "Sprout");
    results.push(check(
        "plant_denied_when_broke",
        matches!(denied, Err(GardenError::InsufficientFunds { .. }))
            && session.grid().get(0).is_some_and(|s| s.is_empty()),
        format!("{:?}", denied),
    ));

    session.credit(10);
    let planted = session.plant(0, "Sprout");
    results.push(check(
        "plant_spends_exact_cost",
        planted.is_ok() && session.points() == 0,
        format!("points after planting: {}", session.points()),
    ));

    let occupied = session.plant(0, "Sprout");
    results.push(check(
        "plant_rejects_occupied",
        matches!(occupied, Err(GardenError::SlotUnavailable { .. })),
        format!("{:?}", occupied),
    ));

    let mut rich = fresh_session(1000);
    let expanded = rich.expand();
    results.push(check(
        "expand_full_grid_is_noop",
        expanded == Err(GardenError::NoLockedSlot) && rich.points() == 1000,
        format!("{:?}, {} pts", expanded, rich.points()),
    ));

    results
}

// ── 3. Growth ───────────────────────────────────────────────────────────

fn validate_growth() -> Vec<TestResult> {
    println!("--- Growth ---");
    let mut results = Vec::new();

    let catalog = PlantCatalog::default();
    for spec in catalog.species() {
        let mut session = fresh_session(spec.cost);
        if session.plant(0, &spec.id).is_err() {
            results.push(check(
                &format!("growth_{}", spec.id),
                false,
                "could not plant",
            ));
            continue;
        }

        let mut ticks = 0u32;
        let mut last_progress = 0.0;
        let mut monotonic = true;
        while let Some(plant) = session.grid().get(0).and_then(|s| s.plant()) {
            if !plant.is_growing() || ticks > 10_000 {
                break;
            }
            session.tick(1.0);
            ticks += 1;
            let progress = session
                .grid()
                .get(0)
                .and_then(|s| s.plant())
                .map_or(0.0, |p| p.progress());
            monotonic &= progress >= last_progress;
            last_progress = progress;
        }

        let expected = (spec.phase_duration() * spec.last_stage() as f64).ceil() as u32;
        results.push(check(
            &format!("growth_{}", spec.id),
            ticks == expected && monotonic && last_progress == 1.0,
            format!(
                "{} ticks (expected {}), monotonic={}, final progress {:.2}",
                ticks, expected, monotonic, last_progress
            ),
        ));

        let harvest = session.harvest(0);
        results.push(check(
            &format!("harvest_{}", spec.id),
            harvest.as_ref().is_ok_and(|h| h.profit == spec.profit)
                && session.points() == spec.profit,
            format!("{:?}", harvest.map(|h| h.profit)),
        ));
    }

    results
}

// ── 4. Missions ─────────────────────────────────────────────────────────

fn validate_missions() -> Vec<TestResult> {
    println!("--- Missions ---");
    let mut results = Vec::new();

    let mut session = fresh_session(45);
    for slot in 0..3 {
        results.push(plant_check(
            &format!("mission_plant_sunflower_{}", slot),
            &mut session,
            slot,
            "Sunflower",
        ));
    }
    let completed = session
        .missions()
        .missions()
        .first()
        .is_some_and(|m| m.is_completed() && m.progress == 3);
    results.push(check(
        "mission_sunflowers_complete",
        completed,
        format!("{:?}", session.missions().missions().first()),
    ));

    let claimed = session.claim_mission(0);
    results.push(check(
        "mission_claim_pays_and_removes",
        claimed.is_ok() && session.points() == 30 && session.missions().len() == 1,
        format!(
            "{} pts, {} missions left",
            session.points(),
            session.missions().len()
        ),
    ));

    let premature = session.claim_mission(0);
    results.push(check(
        "mission_incomplete_rejected",
        premature == Err(GardenError::MissionIncomplete(0)),
        format!("{:?}", premature),
    ));

    results
}

// ── 5. Events ───────────────────────────────────────────────────────────

fn validate_events(seed: u64) -> Vec<TestResult> {
    println!("--- Events ---");
    let mut results = Vec::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut session = fresh_session(25);
    results.push(plant_check("events_plant_flower", &mut session, 0, "Flower"));

    let mut counts = [0u32; 5];
    let mut negative_or_stage_change = 0;
    for _ in 0..1000 {
        let stage_before = session
            .grid()
            .get(0)
            .and_then(|s| s.plant())
            .map(|p| p.stage());
        let outcome = session.trigger_event(&mut rng);
        if let Some(i) = GardenEvent::ALL.iter().position(|e| *e == outcome.event) {
            counts[i] += 1;
        }
        let stage_after = session
            .grid()
            .get(0)
            .and_then(|s| s.plant())
            .map(|p| p.stage());
        if stage_before != stage_after {
            negative_or_stage_change += 1;
        }
        if let EventEffect::PointsLost(n) = outcome.effect {
            if n > session.config().pest_penalty {
                negative_or_stage_change += 1;
            }
        }
    }

    results.push(check(
        "events_all_kinds_seen",
        counts.iter().all(|c| *c > 100),
        format!("{:?}", counts),
    ));
    results.push(check(
        "events_never_change_stage",
        negative_or_stage_change == 0,
        format!("{} violations", negative_or_stage_change),
    ));
    results.push(check(
        "events_gifts_in_inventory",
        session.inventory().len() as u32 == counts[4],
        format!("{} gifts, {} in inventory", counts[4], session.inventory().len()),
    ));

    results
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(options: &Options) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();
    let mut store = FileStore::new(&options.data_dir);

    let mut session = fresh_session(60);
    results.push(plant_check("persist_plant_sunflower", &mut session, 0, "Sunflower"));
    results.push(plant_check("persist_plant_flower", &mut session, 4, "Flower"));
    session.tick(9.0);

    match session.save(&mut store) {
        Ok(()) => results.push(check(
            "save_to_disk",
            true,
            format!("{}", store.dir().display()),
        )),
        Err(e) => {
            results.push(check("save_to_disk", false, e.to_string()));
            return results;
        }
    }

    let reloaded =
        match GardenSession::load(&store, GardenConfig::default(), PlantCatalog::default()) {
            Ok(reloaded) => reloaded,
            Err(errors) => {
                results.push(check("reload_matches", false, format!("{:?}", errors)));
                return results;
            }
        };
    results.push(check(
        "reload_matches",
        reloaded.grid() == session.grid()
            && reloaded.missions() == session.missions()
            && reloaded.points() == session.points(),
        format!(
            "{} pts, {} growing",
            reloaded.points(),
            reloaded.grid().growing_count()
        ),
    ));

    if let Err(e) = std::fs::remove_dir_all(&options.data_dir) {
        log::warn!("could not clean up {}: {}", options.data_dir.display(), e);
    }

    results
}
