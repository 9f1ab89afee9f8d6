//! Zone pair store: the dual-world map.
//!
//! One arena (`Vec<ZonePair>`) holds both worlds; a position is an integer
//! index into it. Both sides of a pair are created and destroyed together, so
//! the equal-length and identical-terrain invariants hold structurally.
//! Structural edits (generate, insert, delete) reopen a closed store;
//! content edits through `get_pair_mut` do not.

use std::fmt;

use crate::game::{EnemyKind, ItemKind, Rng, Terrain, World, ZonePair, ZoneView};

/// Minimum number of zone pairs for a playable map.
pub const MIN_ZONES: usize = 15;

/// Why a structural store operation was refused. State is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// Index outside the valid range for the operation.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Store length at the time of the call.
        len: usize,
    },
    /// Close refused: not enough zone pairs laid down.
    TooFewZones {
        /// Current pair count.
        have: usize,
        /// Required minimum.
        need: usize,
    },
    /// Close refused: the mirror world does not hold exactly one boss.
    BossMiscount {
        /// Number of bosses found.
        found: usize,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} zone pairs")
            }
            MapError::TooFewZones { have, need } => {
                write!(f, "only {have} zone pairs laid down, need at least {need}")
            }
            MapError::BossMiscount { found } => {
                write!(
                    f,
                    "expected exactly one boss in the mirror world, found {found}"
                )
            }
        }
    }
}

impl std::error::Error for MapError {}

/// The dual-world map: an arena of zone pairs plus a closed flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneMap {
    /// Pairs in head-to-tail order. Index is the position.
    pairs: Vec<ZonePair>,
    /// Set by a successful `close()`, dropped by any structural edit.
    closed: bool,
}

impl ZoneMap {
    /// An empty, open store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pairs: Vec::new(),
            closed: false,
        }
    }

    /// Number of zone pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the store holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether the store has been closed (validated as playable).
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Look up the pair at `index`.
    #[must_use]
    pub fn get_pair(&self, index: usize) -> Option<&ZonePair> {
        self.pairs.get(index)
    }

    /// Mutable lookup, for content edits (enemy cleared, item scavenged).
    ///
    /// Content edits do not reopen a closed store.
    pub fn get_pair_mut(&mut self, index: usize) -> Option<&mut ZonePair> {
        self.pairs.get_mut(index)
    }

    /// Snapshot of one side of the pair at `index`.
    #[must_use]
    pub fn view(&self, index: usize, world: World) -> Option<ZoneView> {
        self.pairs.get(index).map(|pair| pair.view(index, world))
    }

    /// Iterate over pairs in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, ZonePair> {
        self.pairs.iter()
    }

    /// Number of bosses currently in the mirror world.
    #[must_use]
    pub fn boss_count(&self) -> usize {
        self.pairs
            .iter()
            .filter(|pair| pair.mirror_enemy == Some(EnemyKind::Boss))
            .count()
    }

    /// Index of the zone pair whose mirror side holds the boss, if any.
    #[must_use]
    pub fn boss_zone(&self) -> Option<usize> {
        self.pairs
            .iter()
            .position(|pair| pair.mirror_enemy == Some(EnemyKind::Boss))
    }

    /// Discard any existing sequence and build `count` fresh pairs.
    ///
    /// Per index: terrain uniform over the 10 kinds; real enemy 60% none,
    /// 30% brute, 10% grunt; mirror enemy 60% none, 40% brute; real item 50%
    /// none, else uniform over the 4 kinds. One index drawn at the end gets
    /// its mirror enemy overwritten to the boss, so exactly one boss exists.
    /// Reopens the store.
    pub fn generate(&mut self, rng: &mut Rng, count: usize) {
        self.pairs.clear();
        self.closed = false;
        self.pairs.reserve(count);

        for _ in 0..count {
            let terrain = Terrain::ALL[rng.next_index(Terrain::ALL.len())];

            let real_enemy = match rng.percent() {
                1..=60 => None,
                61..=90 => Some(EnemyKind::Brute),
                _ => Some(EnemyKind::Grunt),
            };

            let mirror_enemy = match rng.percent() {
                1..=60 => None,
                _ => Some(EnemyKind::Brute),
            };

            let real_item = if rng.roll(0, 1) == 1 {
                Some(ItemKind::ALL[rng.next_index(ItemKind::ALL.len())])
            } else {
                None
            };

            self.pairs.push(ZonePair {
                terrain,
                real_enemy,
                real_item,
                mirror_enemy,
            });
        }

        if count > 0 {
            let boss_index = rng.next_index(count);
            self.pairs[boss_index].mirror_enemy = Some(EnemyKind::Boss);
        }
    }

    /// Insert a pair at `index` (0 = head, `len` = tail append).
    ///
    /// Reopens the store on success.
    ///
    /// # Errors
    ///
    /// Returns `MapError::IndexOutOfRange` if `index > len`; the store is
    /// left unchanged.
    pub fn insert_at(&mut self, index: usize, pair: ZonePair) -> Result<(), MapError> {
        if index > self.pairs.len() {
            return Err(MapError::IndexOutOfRange {
                index,
                len: self.pairs.len(),
            });
        }
        self.pairs.insert(index, pair);
        self.closed = false;
        Ok(())
    }

    /// Remove and return the pair at `index`. Later pairs shift down by one.
    ///
    /// Reopens the store on success. Position references held by callers are
    /// plain values; remapping them is the caller's concern (structural edits
    /// happen during setup, before any position exists).
    ///
    /// # Errors
    ///
    /// Returns `MapError::IndexOutOfRange` if `index >= len` (including an
    /// empty store); the store is left unchanged.
    pub fn delete_at(&mut self, index: usize) -> Result<ZonePair, MapError> {
        if index >= self.pairs.len() {
            return Err(MapError::IndexOutOfRange {
                index,
                len: self.pairs.len(),
            });
        }
        self.closed = false;
        Ok(self.pairs.remove(index))
    }

    /// Validate the store and mark it playable.
    ///
    /// # Errors
    ///
    /// Returns `MapError::TooFewZones` below [`MIN_ZONES`] pairs, or
    /// `MapError::BossMiscount` unless the mirror world holds exactly one
    /// boss. The store stays open on refusal.
    pub fn close(&mut self) -> Result<(), MapError> {
        if self.pairs.len() < MIN_ZONES {
            return Err(MapError::TooFewZones {
                have: self.pairs.len(),
                need: MIN_ZONES,
            });
        }
        let found = self.boss_count();
        if found != 1 {
            return Err(MapError::BossMiscount { found });
        }
        self.closed = true;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ZoneMap {
    type Item = &'a ZonePair;
    type IntoIter = std::slice::Iter<'a, ZonePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_pairs(count: usize) -> Vec<ZonePair> {
        (0..count).map(|_| ZonePair::new(Terrain::Woods)).collect()
    }

    fn closeable_map() -> ZoneMap {
        let mut map = ZoneMap::new();
        for pair in empty_pairs(MIN_ZONES) {
            map.insert_at(map.len(), pair).expect("append in range");
        }
        map.get_pair_mut(7)
            .expect("index 7 exists")
            .set_enemy(World::Mirror, Some(EnemyKind::Boss));
        map
    }

    // ==================== STRUCTURAL OPERATIONS ====================

    #[test]
    fn test_new_store_is_empty_and_open() {
        let map = ZoneMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(!map.is_closed());
        assert!(map.get_pair(0).is_none());
    }

    #[test]
    fn test_insert_at_head_and_tail() {
        let mut map = ZoneMap::new();
        map.insert_at(0, ZonePair::new(Terrain::School))
            .expect("head insert");
        map.insert_at(1, ZonePair::new(Terrain::Cavern))
            .expect("tail append");
        map.insert_at(0, ZonePair::new(Terrain::Street))
            .expect("second head insert");

        assert_eq!(map.len(), 3);
        assert_eq!(map.get_pair(0).map(|p| p.terrain), Some(Terrain::Street));
        assert_eq!(map.get_pair(1).map(|p| p.terrain), Some(Terrain::School));
        assert_eq!(map.get_pair(2).map(|p| p.terrain), Some(Terrain::Cavern));
    }

    #[test]
    fn test_insert_in_the_middle_shifts_tail() {
        let mut map = ZoneMap::new();
        map.insert_at(0, ZonePair::new(Terrain::Woods)).expect("ok");
        map.insert_at(1, ZonePair::new(Terrain::Depot)).expect("ok");
        map.insert_at(1, ZonePair::new(Terrain::Garden)).expect("ok");

        assert_eq!(map.get_pair(1).map(|p| p.terrain), Some(Terrain::Garden));
        assert_eq!(map.get_pair(2).map(|p| p.terrain), Some(Terrain::Depot));
    }

    #[test]
    fn test_insert_out_of_range_is_refused_unchanged() {
        let mut map = ZoneMap::new();
        let err = map.insert_at(1, ZonePair::new(Terrain::Woods));
        assert_eq!(err, Err(MapError::IndexOutOfRange { index: 1, len: 0 }));
        assert!(map.is_empty());
    }

    #[test]
    fn test_delete_shifts_and_returns_pair() {
        let mut map = ZoneMap::new();
        map.insert_at(0, ZonePair::new(Terrain::Woods)).expect("ok");
        map.insert_at(1, ZonePair::new(Terrain::School)).expect("ok");
        map.insert_at(2, ZonePair::new(Terrain::Cavern)).expect("ok");

        let removed = map.delete_at(1).expect("delete in range");
        assert_eq!(removed.terrain, Terrain::School);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_pair(1).map(|p| p.terrain), Some(Terrain::Cavern));
    }

    #[test]
    fn test_delete_out_of_range_is_refused() {
        let mut map = ZoneMap::new();
        assert_eq!(
            map.delete_at(0),
            Err(MapError::IndexOutOfRange { index: 0, len: 0 })
        );

        map.insert_at(0, ZonePair::new(Terrain::Woods)).expect("ok");
        assert_eq!(
            map.delete_at(1),
            Err(MapError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(map.len(), 1);
    }

    // ==================== CLOSE VALIDATION ====================

    #[test]
    fn test_close_succeeds_with_enough_zones_and_one_boss() {
        let mut map = closeable_map();
        assert_eq!(map.close(), Ok(()));
        assert!(map.is_closed());
    }

    #[test]
    fn test_close_refused_with_too_few_zones() {
        let mut map = closeable_map();
        map.delete_at(0).expect("drop one pair");
        assert_eq!(
            map.close(),
            Err(MapError::TooFewZones {
                have: MIN_ZONES - 1,
                need: MIN_ZONES
            })
        );
        assert!(!map.is_closed());
    }

    #[test]
    fn test_close_refused_without_a_boss() {
        let mut map = closeable_map();
        map.get_pair_mut(7)
            .expect("boss pair")
            .set_enemy(World::Mirror, None);
        assert_eq!(map.close(), Err(MapError::BossMiscount { found: 0 }));
        assert!(!map.is_closed());
    }

    #[test]
    fn test_close_refused_with_two_bosses() {
        let mut map = closeable_map();
        map.get_pair_mut(2)
            .expect("index 2 exists")
            .set_enemy(World::Mirror, Some(EnemyKind::Boss));
        assert_eq!(map.close(), Err(MapError::BossMiscount { found: 2 }));
    }

    #[test]
    fn test_structural_edit_reopens_a_closed_store() {
        let mut map = closeable_map();
        map.close().expect("closeable");
        map.insert_at(0, ZonePair::new(Terrain::Garden))
            .expect("insert");
        assert!(!map.is_closed());

        map.close().expect("still closeable");
        map.delete_at(0).expect("delete");
        assert!(!map.is_closed());
    }

    #[test]
    fn test_content_edit_keeps_the_store_closed() {
        let mut map = closeable_map();
        map.close().expect("closeable");
        map.get_pair_mut(3)
            .expect("index 3 exists")
            .set_enemy(World::Real, Some(EnemyKind::Grunt));
        assert!(map.is_closed());
    }

    // ==================== GENERATION ====================

    #[test]
    fn test_generate_places_exactly_one_boss_in_the_mirror() {
        for seed in 0..50 {
            let mut rng = Rng::new(seed);
            let mut map = ZoneMap::new();
            map.generate(&mut rng, 15);

            assert_eq!(map.len(), 15);
            assert_eq!(map.boss_count(), 1, "seed {seed}");
            let real_bosses = map
                .iter()
                .filter(|p| p.real_enemy == Some(EnemyKind::Boss))
                .count();
            assert_eq!(real_bosses, 0, "seed {seed}");
        }
    }

    #[test]
    fn test_generate_never_puts_grunts_in_the_mirror() {
        let mut rng = Rng::new(99);
        let mut map = ZoneMap::new();
        map.generate(&mut rng, 500);
        let mirror_grunts = map
            .iter()
            .filter(|p| p.mirror_enemy == Some(EnemyKind::Grunt))
            .count();
        assert_eq!(mirror_grunts, 0);
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() {
        let mut a = ZoneMap::new();
        let mut b = ZoneMap::new();
        a.generate(&mut Rng::new(42), 15);
        b.generate(&mut Rng::new(42), 15);
        assert_eq!(a, b);

        let mut c = ZoneMap::new();
        c.generate(&mut Rng::new(43), 15);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_replaces_previous_sequence_and_reopens() {
        let mut map = closeable_map();
        map.close().expect("closeable");
        map.generate(&mut Rng::new(1), 20);
        assert_eq!(map.len(), 20);
        assert!(!map.is_closed());
        assert_eq!(map.boss_count(), 1);
    }

    #[test]
    fn test_generate_distributions_are_plausible() {
        let mut rng = Rng::new(2024);
        let mut map = ZoneMap::new();
        let n = 10_000;
        map.generate(&mut rng, n);

        #[allow(clippy::cast_precision_loss)]
        let frac = |count: usize| count as f64 / n as f64;

        let real_none = map.iter().filter(|p| p.real_enemy.is_none()).count();
        let real_grunt = map
            .iter()
            .filter(|p| p.real_enemy == Some(EnemyKind::Grunt))
            .count();
        let mirror_none = map.iter().filter(|p| p.mirror_enemy.is_none()).count();
        let with_item = map.iter().filter(|p| p.real_item.is_some()).count();

        assert!((0.55..=0.65).contains(&frac(real_none)), "real none");
        assert!((0.07..=0.13).contains(&frac(real_grunt)), "real grunt");
        // One mirror zone is overwritten by the boss, so allow a hair of slack.
        assert!((0.55..=0.65).contains(&frac(mirror_none)), "mirror none");
        assert!((0.45..=0.55).contains(&frac(with_item)), "real item");
    }

    // ==================== VIEWS ====================

    #[test]
    fn test_views_share_terrain_across_worlds() {
        let mut map = ZoneMap::new();
        map.generate(&mut Rng::new(5), 15);
        for index in 0..map.len() {
            let real = map.view(index, World::Real).expect("in range");
            let mirror = map.view(index, World::Mirror).expect("in range");
            assert_eq!(real.terrain, mirror.terrain);
            assert_eq!(mirror.item, None);
        }
        assert!(map.view(15, World::Real).is_none());
    }
}
