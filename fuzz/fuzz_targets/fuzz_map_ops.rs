#![no_main]

//! Zone store fuzzer.
//!
//! Drives the dual-world store through arbitrary edit sequences and checks
//! the structural guarantees after every operation: lengths agree with the
//! edits, the boss never reaches the real world, and a successful close
//! certifies the minimum pair count with exactly one mirror boss.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use riftline::game::{EnemyKind, Rng, Terrain, ZoneMap, ZonePair, MIN_ZONES};

/// A fuzzer-generated store edit.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum StoreOp {
    /// Insert an empty pair at the given index.
    Insert { index: u8, terrain: u8 },
    /// Delete the pair at the given index.
    Delete { index: u8 },
    /// Replace the sequence with a generated one.
    Generate { seed: u64, count: u8 },
    /// Validate and close the store.
    Close,
}

fuzz_target!(|ops: Vec<StoreOp>| {
    let mut map = ZoneMap::new();

    for op in ops.into_iter().take(64) {
        let len_before = map.len();
        match op {
            StoreOp::Insert { index, terrain } => {
                let terrain = Terrain::ALL[usize::from(terrain) % Terrain::ALL.len()];
                let index = usize::from(index);
                let result = map.insert_at(index, ZonePair::new(terrain));
                if index <= len_before {
                    assert!(result.is_ok());
                    assert_eq!(map.len(), len_before + 1);
                    assert!(!map.is_closed());
                } else {
                    assert!(result.is_err());
                    assert_eq!(map.len(), len_before);
                }
            }
            StoreOp::Delete { index } => {
                let index = usize::from(index);
                let result = map.delete_at(index);
                if index < len_before {
                    assert!(result.is_ok());
                    assert_eq!(map.len(), len_before - 1);
                    assert!(!map.is_closed());
                } else {
                    assert!(result.is_err());
                    assert_eq!(map.len(), len_before);
                }
            }
            StoreOp::Generate { seed, count } => {
                let count = usize::from(count % 64);
                let mut rng = Rng::new(seed);
                map.generate(&mut rng, count);
                assert_eq!(map.len(), count);
                assert!(!map.is_closed());
                if count > 0 {
                    assert_eq!(map.boss_count(), 1);
                }
            }
            StoreOp::Close => {
                let closable = len_before >= MIN_ZONES && map.boss_count() == 1;
                assert_eq!(map.close().is_ok(), closable);
                assert_eq!(map.is_closed(), closable);
            }
        }

        // The real world never hosts the boss, whatever the edits were.
        for pair in &map {
            assert_ne!(pair.real_enemy, Some(EnemyKind::Boss));
        }
    }
});
