#![no_main]

//! Full turn-stream fuzzer.
//!
//! Runs a live multi-player session under an arbitrary action stream: any
//! player acting in any order, encounters driven to an outcome, refusals
//! expected once a player is out of play. The cross-module session checks
//! run after every step.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use riftline::game::{
    check_invariants, perform, turn_active, Action, ActionOutcome, Build, CombatChoice, Session,
    TurnState, MIN_ZONES,
};

/// A fuzzer-generated turn action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    /// One zone toward the tail.
    Advance,
    /// One zone toward the head.
    Retreat,
    /// Cross the rift.
    SwitchWorld,
    /// Open an encounter.
    Fight,
    /// Scavenge the zone's item.
    PickUp,
    /// Use a backpack slot out of combat.
    UseItem { slot: u8 },
    /// Read the player sheet.
    PlayerInfo,
    /// Read the surroundings.
    ZoneInfo,
    /// End the turn.
    Pass,
}

impl FuzzAction {
    fn decode(self) -> Action {
        match self {
            FuzzAction::Advance => Action::Advance,
            FuzzAction::Retreat => Action::Retreat,
            FuzzAction::SwitchWorld => Action::SwitchWorld,
            FuzzAction::Fight => Action::Fight,
            FuzzAction::PickUp => Action::PickUp,
            // Slot 3 is out of range on purpose.
            FuzzAction::UseItem { slot } => Action::UseItem {
                slot: usize::from(slot) % 4,
            },
            FuzzAction::PlayerInfo => Action::PlayerInfo,
            FuzzAction::ZoneInfo => Action::ZoneInfo,
            FuzzAction::Pass => Action::Pass,
        }
    }
}

/// Structured input for turn-stream fuzzing.
#[derive(Arbitrary, Debug)]
struct TurnStreamInput {
    /// Session seed.
    seed: u64,
    /// Player count selector.
    players: u8,
    /// Zone count selector.
    zones: u8,
    /// The action stream: who acts, and what they do.
    ops: Vec<(u8, FuzzAction)>,
}

fuzz_target!(|input: TurnStreamInput| {
    let players = usize::from(input.players % 4) + 1;
    let zones = MIN_ZONES + usize::from(input.zones % 16);

    let mut session = Session::new(input.seed);
    session.map.generate(&mut session.rng, zones);
    session.map.close().unwrap();
    for index in 0..players {
        session
            .create_player(format!("P{index}"), Build::Balanced)
            .unwrap();
    }
    session.start().unwrap();

    let ids = session.roster.ids();
    let mut turns = vec![TurnState::new(); ids.len()];

    for (who, action) in input.ops.into_iter().take(96) {
        let index = usize::from(who) % ids.len();
        let id = ids[index];

        if !turn_active(&session, id) {
            assert!(perform(&mut session, &mut turns[index], id, action.decode()).is_err());
            continue;
        }

        match perform(&mut session, &mut turns[index], id, action.decode()) {
            Ok(ActionOutcome::Engaged { mut encounter }) => {
                for _ in 0..64 {
                    if encounter.is_over()
                        || encounter
                            .exchange(&mut session, CombatChoice::Attack)
                            .is_err()
                    {
                        break;
                    }
                }
            }
            Ok(ActionOutcome::Passed) => turns[index] = TurnState::new(),
            Ok(_) | Err(_) => {}
        }

        let violations = check_invariants(&session);
        assert!(violations.is_empty(), "{violations:?}");
    }
});
