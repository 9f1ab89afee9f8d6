//! Scripted player for autoplay sessions.
//!
//! The policy sweeps the real sequence tail-ward, clearing enemies and
//! scavenging as it goes, dives through the rift at the tail, and walks the
//! mirror to the boss, fighting whatever stands on the way. It rolls no dice
//! of its own, so a fixed session seed replays the same run.

use crate::game::{
    Action, CombatChoice, Encounter, EnemyKind, Inventory, ItemKind, PlayerId, Session, TurnState,
    World,
};

/// Encounter hit points below which the policy reaches for a bicycle.
const HEAL_BELOW: i32 = 12;

/// Bicycle rides allowed per encounter before the policy commits to
/// swinging.
const MAX_HEALS: u32 = 3;

/// Scripted decision-making for one autoplay player.
///
/// Holds no state; the board position alone decides the next move.
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy;

impl Policy {
    /// Choose the next turn action for `player`.
    ///
    /// Priorities: fight whatever shares the zone, scavenge, then spend the
    /// movement budget on the sweep.
    #[must_use]
    pub fn next_action(session: &Session, player: PlayerId, turn: TurnState) -> Action {
        let Some(state) = session.roster.get(player) else {
            return Action::Pass;
        };
        let position = state.position;
        let world = state.world;
        let here = session.map.get_pair(position);

        if here.and_then(|pair| pair.enemy(world)).is_some() {
            return Action::Fight;
        }

        if world == World::Real
            && here.and_then(|pair| pair.real_item).is_some()
            && !state.inventory.is_full()
        {
            return Action::PickUp;
        }

        if turn.has_moved() {
            return Action::Pass;
        }

        match world {
            World::Real => real_world_move(session, position),
            World::Mirror => mirror_move(session, position),
        }
    }

    /// Choose the player's half of a combat exchange.
    ///
    /// Reaches for the backpack before swinging: a bicycle when hit points
    /// run low, the riff against the boss, the shirt against anything
    /// tougher than a grunt. Everything else is an attack.
    #[must_use]
    pub fn combat_choice(
        encounter: &Encounter,
        inventory: Inventory,
        heals_used: u32,
    ) -> CombatChoice {
        if encounter.player_hp() < HEAL_BELOW
            && heals_used < MAX_HEALS
            && let Some(slot) = inventory.find(ItemKind::Bicycle)
        {
            return CombatChoice::UseItem { slot };
        }

        if encounter.foe().is_boss()
            && encounter.attack_bonus() == 0
            && let Some(slot) = inventory.find(ItemKind::MetalRiff)
        {
            return CombatChoice::UseItem { slot };
        }

        if encounter.foe() != EnemyKind::Grunt
            && encounter.defense_bonus() == 0
            && let Some(slot) = inventory.find(ItemKind::HellfireShirt)
        {
            return CombatChoice::UseItem { slot };
        }

        CombatChoice::Attack
    }
}

/// Movement half of a real-world turn: sweep to the tail, then dive. A dive
/// onto a mirror foe is fine; the fight priority picks it up next turn.
fn real_world_move(session: &Session, position: usize) -> Action {
    if position + 1 < session.map.len() {
        Action::Advance
    } else {
        Action::SwitchWorld
    }
}

/// Movement half of a mirror-world turn: close on the boss zone.
fn mirror_move(session: &Session, position: usize) -> Action {
    let Some(target) = session.map.boss_zone() else {
        return Action::Pass;
    };
    if position < target {
        Action::Advance
    } else if position > target {
        Action::Retreat
    } else {
        Action::Pass
    }
}
