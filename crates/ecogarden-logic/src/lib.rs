//! Pure garden simulation logic for EcoHabit.
//!
//! This crate contains the garden game loop independent of any UI toolkit,
//! platform timer, or storage backend. Functions take plain data and return
//! results, so every rule is unit-testable and the same code can sit behind a
//! mobile UI, a CLI harness, or a server.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Plant species, growth stages, costs and profits |
//! | [`config`] | Balance and timing knobs with validation |
//! | [`economy`] | Points balance, nickname, badges |
//! | [`error`] | Precondition failures returned by every action |
//! | [`events`] | Random one-shot events (bonus, rain, pests, gifts) |
//! | [`garden`] | Slot grid, plant instances, plant/harvest/expand |
//! | [`growth`] | Tick-driven stage advancement |
//! | [`habits`] | Eco habits that earn points, with cooldowns |
//! | [`inventory`] | Bonus plants granted by events |
//! | [`mission`] | Goal-tagged missions with one-time rewards |
//! | [`persistence`] | Key-value store gateway with default fallback |
//! | [`session`] | Single-actor bundle of all state and the UI-facing calls |
//! | [`ticker`] | Background thread driving `tick` at a fixed interval |

pub mod catalog;
pub mod config;
pub mod economy;
pub mod error;
pub mod events;
pub mod garden;
pub mod growth;
pub mod habits;
pub mod inventory;
pub mod mission;
pub mod persistence;
pub mod session;
pub mod ticker;

pub use catalog::{PlantCatalog, PlantSpec};
pub use config::{ConfigError, GardenConfig};
pub use economy::UserEconomy;
pub use error::{GardenError, SlotIssue};
pub use session::GardenSession;
