// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Riftline: a deterministic dual-world survival game engine.
//!
//! This crate provides a turn-based engine designed for:
//! - Bit-exact deterministic sessions from a single seed
//! - A mirrored map where every zone exists once per world
//! - Stochastic combat with one win condition: clear the boss
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Autoplay / Batch Runner         │
//! ├─────────────────────────────────────┤
//! │     Session (turns, combat)         │
//! ├─────────────────────────────────────┤
//! │   Zone pair store (dual worlds)     │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod report;
pub mod sim;

pub use error::{ActionError, ActionResult};

// Re-export key game types at crate root for convenience
pub use game::{
    perform, Action, ActionOutcome, Build, Encounter, Outcome, Rng, Session, TurnState, ZoneMap,
};
