//! Combat - Turn resolution, observers and encounter flow

mod encounter;
mod loot;
mod observer;
mod outcome;
mod service;

pub use encounter::{Encounter, HeroAction, RoundReport};
pub use loot::{roll_loot, LootThresholds};
pub use observer::{CombatObserver, MessageLog, TracingObserver};
pub use outcome::{ActionOutcome, EncounterState, Rejection};
pub use service::CombatService;
