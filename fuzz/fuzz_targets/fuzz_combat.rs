#![no_main]

//! Encounter fuzzer.
//!
//! Builds a one-player arena against an arbitrary enemy tier, preloads the
//! backpack, then drives the encounter with an arbitrary mix of strikes and
//! item slots. Whatever the stream does, the zone and the session books must
//! agree with the outcome the encounter reports.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use riftline::game::{
    check_invariants, Build, CombatChoice, Encounter, EncounterOutcome, EnemyKind, ItemKind,
    Outcome, Session, Terrain, World, ZonePair, MIN_ZONES,
};

/// Structured input for encounter fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Session seed.
    seed: u64,
    /// Enemy tier selector.
    foe: u8,
    /// Backpack preload selectors, one per slot.
    items: [u8; 3],
    /// One exchange per entry: strike, or the slot to use.
    choices: Vec<(bool, u8)>,
}

fuzz_target!(|input: CombatInput| {
    let foe = match input.foe % 3 {
        0 => EnemyKind::Grunt,
        1 => EnemyKind::Brute,
        _ => EnemyKind::Boss,
    };

    let mut session = Session::new(input.seed);
    for _ in 0..MIN_ZONES {
        session
            .map
            .insert_at(session.map.len(), ZonePair::new(Terrain::Woods))
            .unwrap();
    }
    if foe.is_boss() {
        session
            .map
            .get_pair_mut(0)
            .unwrap()
            .set_enemy(World::Mirror, Some(EnemyKind::Boss));
    } else {
        session
            .map
            .get_pair_mut(0)
            .unwrap()
            .set_enemy(World::Real, Some(foe));
        session
            .map
            .get_pair_mut(5)
            .unwrap()
            .set_enemy(World::Mirror, Some(EnemyKind::Boss));
    }
    session.map.close().unwrap();

    let id = session.create_player("Fuzz".into(), Build::Balanced).unwrap();
    session.start().unwrap();
    let state = session.roster.get_mut(id).unwrap();
    for byte in input.items {
        let pick = usize::from(byte) % (ItemKind::ALL.len() + 1);
        if pick < ItemKind::ALL.len() {
            state.inventory.store(ItemKind::ALL[pick]);
        }
    }
    if foe.is_boss() {
        state.world = World::Mirror;
    }

    let mut encounter = Encounter::begin(&session, id).unwrap();

    for (strike, slot) in input.choices.into_iter().take(128) {
        if encounter.is_over() {
            break;
        }
        let choice = if strike {
            CombatChoice::Attack
        } else {
            // Slot 3 is out of range on purpose.
            CombatChoice::UseItem {
                slot: usize::from(slot) % 4,
            }
        };
        match encounter.exchange(&mut session, choice) {
            Ok(report) => {
                if let Some(outcome) = report.outcome {
                    check_outcome(&session, &outcome, foe);
                } else {
                    assert!(!report.events.is_empty());
                }
            }
            // Empty or out-of-range slots cost nothing.
            Err(_) => assert!(!encounter.is_over()),
        }
    }

    let violations = check_invariants(&session);
    assert!(violations.is_empty(), "{violations:?}");
});

/// The session books must agree with how the encounter said it ended.
fn check_outcome(session: &Session, outcome: &EncounterOutcome, foe: EnemyKind) {
    match outcome {
        EncounterOutcome::FoeCleared => {
            assert!(!foe.is_boss());
            assert_eq!(session.map.get_pair(0).unwrap().real_enemy, None);
            assert!(!session.is_over());
        }
        EncounterOutcome::FoeLingers => {
            let pair = session.map.get_pair(0).unwrap();
            if foe.is_boss() {
                assert_eq!(pair.mirror_enemy, Some(EnemyKind::Boss));
            } else {
                assert_eq!(pair.real_enemy, Some(foe));
            }
            assert!(!session.is_over());
        }
        EncounterOutcome::BossCleared { winner } => {
            assert!(foe.is_boss());
            assert_eq!(winner, "Fuzz");
            assert_eq!(session.winners().latest(), Some("Fuzz"));
            assert_eq!(
                session.outcome(),
                Some(&Outcome::Victory {
                    winner: winner.clone()
                })
            );
        }
        EncounterOutcome::PlayerSlain { total_loss } => {
            assert!(*total_loss, "a lone player's death is always total");
            assert!(session.roster.is_empty());
            assert_eq!(session.outcome(), Some(&Outcome::TotalLoss));
        }
    }
}
