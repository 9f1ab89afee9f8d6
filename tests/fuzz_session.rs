//! Extended fuzzing against live sessions.
//!
//! Random action streams and autoplay sweeps; nothing here may panic, and
//! the session invariants must hold after every step.
//!
//! Run with: PROPTEST_CASES=100000 cargo test --release fuzz_session

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use riftline::game::{
    check_invariants, perform, turn_active, Action, ActionOutcome, Build, CombatChoice, Outcome,
    Session, TurnState, MIN_ZONES,
};
use riftline::sim::{run_session, SimConfig};

/// Decode one scripted action from fuzz bytes.
fn decode_action(op: u8, slot: u8) -> Action {
    match op % 9 {
        0 => Action::Advance,
        1 => Action::Retreat,
        2 => Action::SwitchWorld,
        3 => Action::Fight,
        4 => Action::PickUp,
        5 => Action::UseItem {
            // Slot 3 is out of range on purpose.
            slot: usize::from(slot) % 4,
        },
        6 => Action::PlayerInfo,
        7 => Action::ZoneInfo,
        _ => Action::Pass,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Random action streams never panic and never break an invariant.
    #[test]
    fn fuzz_action_stream(
        seed in any::<u64>(),
        players in 1usize..=4,
        ops in prop::collection::vec((any::<u8>(), any::<u8>(), any::<u8>()), 1..80)
    ) {
        let mut session = Session::new(seed);
        session.map.generate(&mut session.rng, MIN_ZONES);
        session.map.close().unwrap();
        for index in 0..players {
            session
                .create_player(format!("P{index}"), Build::Balanced)
                .unwrap();
        }
        session.start().unwrap();

        let ids = session.roster.ids();
        let mut turns = vec![TurnState::new(); ids.len()];

        for (who, op, slot) in ops {
            let index = usize::from(who) % ids.len();
            let id = ids[index];
            let action = decode_action(op, slot);

            if turn_active(&session, id) {
                match perform(&mut session, &mut turns[index], id, action) {
                    Ok(ActionOutcome::Engaged { mut encounter }) => {
                        // Swing until the encounter resolves or a cap hits.
                        for _ in 0..64 {
                            if encounter.is_over() {
                                break;
                            }
                            if encounter.exchange(&mut session, CombatChoice::Attack).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(ActionOutcome::Passed) => turns[index] = TurnState::new(),
                    Ok(_) | Err(_) => {}
                }
            } else {
                // Slain players and finished sessions refuse every action.
                prop_assert!(perform(&mut session, &mut turns[index], id, action).is_err());
            }

            let violations = check_invariants(&session);
            prop_assert!(violations.is_empty(), "seed {seed}: {violations:?}");
        }
    }

    /// Autoplay sessions complete for any seed and playable config.
    #[test]
    fn fuzz_autoplay_sessions(
        seed in any::<u64>(),
        players in 1usize..=4,
        zones in MIN_ZONES..40usize,
        max_rounds in 1u32..120
    ) {
        let config = SimConfig { players, zones, max_rounds };
        let result = run_session(seed, &config);
        prop_assert!(result.is_ok(), "seed={seed}: {result:?}");

        let result = result.unwrap();
        prop_assert!(result.rounds <= max_rounds);
        prop_assert!(result.survivors <= players);
        match &result.outcome {
            Some(Outcome::Victory { winner }) => {
                prop_assert_eq!(result.winner.as_deref(), Some(winner.as_str()));
                prop_assert!(result.survivors >= 1);
            }
            Some(Outcome::TotalLoss) => prop_assert_eq!(result.survivors, 0),
            None => prop_assert!(result.winner.is_none()),
        }
    }

    /// Unplayable configs come back as errors, never panics.
    #[test]
    fn fuzz_config_rejections(
        seed in any::<u64>(),
        players in 0usize..8,
        zones in 0usize..30
    ) {
        let config = SimConfig { players, zones, max_rounds: 20 };
        let result = run_session(seed, &config);
        let playable = (1..=4).contains(&players) && zones >= MIN_ZONES;
        prop_assert_eq!(result.is_ok(), playable, "players={}, zones={}", players, zones);
    }
}

/// Determinism sweep: the same seed always plays out the same session.
#[test]
fn test_autoplay_determinism_extended() {
    let config = SimConfig::default();
    for seed in 0..200 {
        let a = run_session(seed, &config).unwrap();
        let b = run_session(seed, &config).unwrap();
        assert_eq!(a, b, "seed {seed}");
    }
}

/// Stress: back-to-back setups on one session object via reset.
#[test]
fn test_reset_stress() {
    let mut session = Session::new(999);
    for round in 0..200u64 {
        session.map.generate(&mut session.rng, MIN_ZONES);
        session.map.close().unwrap();
        session
            .create_player(format!("R{round}"), Build::Prodigy)
            .unwrap();
        session.start().unwrap();
        assert!(check_invariants(&session).is_empty());

        session.reset();
        assert!(session.map.is_empty());
        assert!(session.roster.is_empty());
        assert!(!session.prodigy_claimed());
    }
}
