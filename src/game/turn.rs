//! Turn actions and the dispatch that applies them.
//!
//! Each player's turn carries a budget of one movement. Fighting, scavenging,
//! item use, and looking around are free; advance, retreat, and world
//! switches spend the budget. Every action validates fully before mutating,
//! so a refusal leaves the session and the turn untouched.

use crate::error::ActionError;
use crate::game::{Encounter, ItemKind, ItemUse, PlayerId, PlayerView, Session, World, ZoneView};

/// An action a player can take on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Step one zone toward the tail. Spends the movement budget.
    Advance,
    /// Step one zone toward the head. Spends the movement budget.
    Retreat,
    /// Cross to the other world at the same index. Spends the movement
    /// budget, even when the escape roll out of the mirror fails.
    SwitchWorld,
    /// Open an encounter against the enemy here.
    Fight,
    /// Pick up the item here (real world only).
    PickUp,
    /// Use a backpack item outside combat.
    UseItem {
        /// Slot index, 0-based.
        slot: usize,
    },
    /// Look at your own sheet.
    PlayerInfo,
    /// Look around the current zone.
    ZoneInfo,
    /// End the turn without doing anything.
    Pass,
}

/// Per-turn bookkeeping. Create one at the top of each player's turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnState {
    moved: bool,
}

impl TurnState {
    /// A fresh turn with the movement budget unspent.
    #[must_use]
    pub const fn new() -> Self {
        Self { moved: false }
    }

    /// Whether the movement budget has been spent.
    #[must_use]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }
}

/// What an accepted action produced.
#[derive(Debug)]
pub enum ActionOutcome {
    /// Moved along the sequence; here is the new surroundings.
    Moved {
        /// View of the zone arrived in.
        zone: ZoneView,
    },
    /// Crossed to the other world; here is the new surroundings.
    Switched {
        /// View of the zone arrived in.
        zone: ZoneView,
    },
    /// The escape roll out of the mirror failed; still in the mirror, and
    /// the movement budget is spent.
    EscapeFailed {
        /// What the die showed.
        roll: i32,
        /// The luck score it had to beat.
        luck: i32,
    },
    /// An encounter has opened. Drive it with [`Encounter::exchange`].
    Engaged {
        /// The running encounter.
        encounter: Encounter,
    },
    /// Item scavenged into the backpack.
    PickedUp {
        /// What was picked up.
        item: ItemKind,
        /// Which slot it landed in.
        slot: usize,
    },
    /// A backpack item was used outside combat.
    Used {
        /// What the item did.
        effect: ItemUse,
    },
    /// The player's own sheet.
    Player {
        /// Snapshot of the player.
        view: PlayerView,
    },
    /// The current surroundings.
    Zone {
        /// Snapshot of the zone.
        view: ZoneView,
    },
    /// Turn ended by choice.
    Passed,
}

/// Whether `player` can still act this turn.
///
/// False once the session is over or the player is gone; the caller's turn
/// loop uses this to stop handing out actions.
#[must_use]
pub fn turn_active(session: &Session, player: PlayerId) -> bool {
    !session.is_over() && session.roster.contains(player)
}

/// Validate and apply one action for `player`.
///
/// # Errors
///
/// Refusals come back as [`ActionError`] with the session and turn
/// unchanged: spent movement budgets, blocking enemies, map edges, guarded
/// rifts, empty or full backpacks, and acting while out of play.
pub fn perform(
    session: &mut Session,
    turn: &mut TurnState,
    player: PlayerId,
    action: Action,
) -> Result<ActionOutcome, ActionError> {
    if !turn_active(session, player) {
        return Err(ActionError::NotInPlay);
    }

    match action {
        Action::Advance => step(session, turn, player, 1),
        Action::Retreat => step(session, turn, player, -1),
        Action::SwitchWorld => switch_world(session, turn, player),
        Action::Fight => {
            let encounter = Encounter::begin(session, player)?;
            Ok(ActionOutcome::Engaged { encounter })
        }
        Action::PickUp => pick_up(session, player),
        Action::UseItem { slot } => {
            let state = session
                .roster
                .get_mut(player)
                .ok_or(ActionError::NotInPlay)?;
            let effect = state.inventory.use_slot(slot, false)?;
            Ok(ActionOutcome::Used { effect })
        }
        Action::PlayerInfo => {
            let state = session.roster.get(player).ok_or(ActionError::NotInPlay)?;
            Ok(ActionOutcome::Player { view: state.view() })
        }
        Action::ZoneInfo => {
            let state = session.roster.get(player).ok_or(ActionError::NotInPlay)?;
            let view = session
                .map
                .view(state.position, state.world)
                .ok_or(ActionError::OffTheMap)?;
            Ok(ActionOutcome::Zone { view })
        }
        Action::Pass => Ok(ActionOutcome::Passed),
    }
}

/// Advance or retreat by one zone. Checks run in budget, enemy, boundary
/// order, so a spent budget is reported even at a map edge.
fn step(
    session: &mut Session,
    turn: &mut TurnState,
    player: PlayerId,
    delta: i64,
) -> Result<ActionOutcome, ActionError> {
    if turn.moved {
        return Err(ActionError::AlreadyMoved);
    }

    let map_len = session.map.len();
    let state = session
        .roster
        .get_mut(player)
        .ok_or(ActionError::NotInPlay)?;

    if let Some(enemy) = session
        .map
        .get_pair(state.position)
        .and_then(|pair| pair.enemy(state.world))
    {
        return Err(ActionError::EnemyBlocks { enemy });
    }

    let here = i64::try_from(state.position).map_err(|_| ActionError::OffTheMap)?;
    let there = here + delta;
    if there < 0 {
        return Err(ActionError::AtMapStart);
    }
    let there = usize::try_from(there).map_err(|_| ActionError::OffTheMap)?;
    if there >= map_len {
        return Err(ActionError::AtMapEnd);
    }

    state.position = there;
    turn.moved = true;
    let view = session
        .map
        .view(there, state.world)
        .ok_or(ActionError::OffTheMap)?;
    Ok(ActionOutcome::Moved { zone: view })
}

fn switch_world(
    session: &mut Session,
    turn: &mut TurnState,
    player: PlayerId,
) -> Result<ActionOutcome, ActionError> {
    if turn.moved {
        return Err(ActionError::AlreadyMoved);
    }

    let state = session.roster.get(player).ok_or(ActionError::NotInPlay)?;
    let position = state.position;
    let world = state.world;
    let luck = state.stats.luck;

    if session.map.get_pair(position).is_none() {
        return Err(ActionError::OffTheMap);
    }

    match world {
        World::Real => {
            // A foe in the zone seals the rift. The mirror side never does;
            // the dive may land next to an enemy.
            if let Some(enemy) = session
                .map
                .get_pair(position)
                .and_then(|pair| pair.enemy(World::Real))
            {
                return Err(ActionError::RiftGuarded { enemy });
            }
            turn.moved = true;
            let state = session
                .roster
                .get_mut(player)
                .ok_or(ActionError::NotInPlay)?;
            state.world = World::Mirror;
            let view = session
                .map
                .view(position, World::Mirror)
                .ok_or(ActionError::OffTheMap)?;
            Ok(ActionOutcome::Switched { zone: view })
        }
        World::Mirror => {
            // Escape is a luck check. Win or lose, the attempt is the
            // turn's movement.
            let roll = session.rng.roll(1, 20);
            turn.moved = true;
            if roll < luck {
                let state = session
                    .roster
                    .get_mut(player)
                    .ok_or(ActionError::NotInPlay)?;
                state.world = World::Real;
                let view = session
                    .map
                    .view(position, World::Real)
                    .ok_or(ActionError::OffTheMap)?;
                Ok(ActionOutcome::Switched { zone: view })
            } else {
                Ok(ActionOutcome::EscapeFailed { roll, luck })
            }
        }
    }
}

fn pick_up(session: &mut Session, player: PlayerId) -> Result<ActionOutcome, ActionError> {
    let state = session.roster.get(player).ok_or(ActionError::NotInPlay)?;
    let position = state.position;

    if state.world == World::Mirror {
        return Err(ActionError::MirrorHasNoItems);
    }

    let pair = session
        .map
        .get_pair(position)
        .ok_or(ActionError::OffTheMap)?;
    if let Some(enemy) = pair.enemy(World::Real) {
        return Err(ActionError::EnemyBlocks { enemy });
    }
    let item = pair.real_item.ok_or(ActionError::NoItemHere)?;

    let state = session
        .roster
        .get_mut(player)
        .ok_or(ActionError::NotInPlay)?;
    let slot = state
        .inventory
        .store(item)
        .ok_or(ActionError::InventoryFull)?;

    // Validation is done; take the item off the ground.
    if let Some(pair) = session.map.get_pair_mut(position) {
        pair.real_item = None;
    }
    Ok(ActionOutcome::PickedUp { item, slot })
}
