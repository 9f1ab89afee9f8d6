//! Game layer for Riftline.
//!
//! Implements the session rules:
//! - Dual-world map of zone pairs (terrain, enemies, items)
//! - Players with rolled stats, builds, and backpacks
//! - Turn actions under a one-movement budget
//! - Exchange-based combat with the clearance roll
//! - Session lifecycle and the rolling winners log
//!
//! Everything is deterministic: one seeded stream drives map generation,
//! stat rolls, combat variance, clearance, escapes, and round order.

mod combat;
mod invariants;
mod map;
mod player;
mod rng;
mod session;
mod turn;
mod zone;

pub use combat::{
    retaliation_damage, strike_damage, CombatChoice, CombatEvent, Encounter, EncounterOutcome,
    ExchangeReport,
};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use map::{MapError, ZoneMap, MIN_ZONES};
pub use player::{
    Build, Inventory, ItemUse, Player, PlayerId, PlayerView, Roster, Stats, INVENTORY_SLOTS,
    MAX_PLAYERS,
};
pub use rng::Rng;
pub use session::{Outcome, Session, SessionError, WinnersLog};
pub use turn::{perform, turn_active, Action, ActionOutcome, TurnState};
pub use zone::{EnemyKind, EnemyStats, ItemKind, Terrain, World, ZonePair, ZoneRef, ZoneView};
