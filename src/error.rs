//! Shared error types for turn-time actions.
//!
//! Structural store errors live with the store (`game::map::MapError`) and
//! session setup errors with the session (`game::session::SessionError`).
//! This module carries the action-illegal taxonomy shared by the turn and
//! combat engines: every refusal here leaves state untouched and the turn
//! continues.

use std::fmt;

use crate::game::EnemyKind;

/// Result type for turn-time actions.
pub type ActionResult<T> = Result<T, ActionError>;

/// Why an action was refused. Refusals never mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The one-per-turn movement budget is spent.
    AlreadyMoved,
    /// An enemy occupies the active-world zone; it must be fought first.
    EnemyBlocks {
        /// The blocking enemy.
        enemy: EnemyKind,
    },
    /// Retreat attempted at the first zone.
    AtMapStart,
    /// Advance attempted at the last zone.
    AtMapEnd,
    /// Real-to-mirror crossing refused while an enemy holds the player's
    /// real zone.
    RiftGuarded {
        /// The guarding enemy.
        enemy: EnemyKind,
    },
    /// Fight requested with no enemy in the active-world zone.
    NoEnemy,
    /// Item use requested with an empty slot or empty inventory.
    NothingToUse,
    /// Pick-up requested with no item in the real-world zone.
    NoItemHere,
    /// Pick-up requested from the mirror world.
    MirrorHasNoItems,
    /// Pick-up requested with all three slots occupied.
    InventoryFull,
    /// The player was removed earlier, or the game is already over.
    NotInPlay,
    /// An exchange was requested on a decided encounter.
    EncounterOver,
    /// The player's position does not resolve to a zone pair.
    OffTheMap,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::AlreadyMoved => write!(f, "already moved this turn"),
            ActionError::EnemyBlocks { enemy } => {
                write!(f, "a {} blocks the way; fight it first", enemy.name())
            }
            ActionError::AtMapStart => write!(f, "already at the first zone"),
            ActionError::AtMapEnd => write!(f, "already at the last zone"),
            ActionError::RiftGuarded { enemy } => {
                write!(f, "cannot cross worlds while a {} is here", enemy.name())
            }
            ActionError::NoEnemy => write!(f, "no enemy here to fight"),
            ActionError::NothingToUse => write!(f, "nothing to use"),
            ActionError::NoItemHere => write!(f, "nothing to pick up here"),
            ActionError::MirrorHasNoItems => {
                write!(f, "items never turn up in the mirror world")
            }
            ActionError::InventoryFull => write!(f, "the backpack is full"),
            ActionError::NotInPlay => write!(f, "player is out of the game"),
            ActionError::EncounterOver => write!(f, "the encounter is already decided"),
            ActionError::OffTheMap => write!(f, "position is outside the map"),
        }
    }
}

impl std::error::Error for ActionError {}
