//! Session lifecycle: setup, play, outcome, winners log.
//!
//! A session owns the map, the roster, and the RNG stream. Setup edits the
//! map and roster freely; `start` checks the map is closed and at least one
//! player exists, then play proceeds in rounds until victory or total loss.
//! The winners log survives `reset`, so back-to-back sessions accumulate
//! their champions.

use std::fmt;

use crate::game::{Build, PlayerId, Rng, Roster, Stats, World, ZoneMap, MAX_PLAYERS};

/// Why a session-level operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// `start` called before the map was closed.
    MapNotClosed,
    /// `start` called with an empty roster.
    NoPlayers,
    /// `create_player` called with the roster already at capacity.
    TooManyPlayers,
    /// A second player asked for the prodigy build.
    ProdigyClaimed,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::MapNotClosed => {
                write!(f, "the map must be closed before play can start")
            }
            SessionError::NoPlayers => write!(f, "at least one player is needed to start"),
            SessionError::TooManyPlayers => write!(f, "the roster is full"),
            SessionError::ProdigyClaimed => {
                write!(f, "the prodigy build has already been claimed this session")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// How a finished session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A player cleared the boss.
    Victory {
        /// The winning player's name.
        winner: String,
    },
    /// Every player was slain.
    TotalLoss,
}

/// Rolling log of the last session winners, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinnersLog {
    names: Vec<String>,
}

impl WinnersLog {
    /// Number of winners retained.
    pub const CAPACITY: usize = 3;

    /// An empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Record a new winner at the head; the oldest entry past capacity
    /// falls off.
    pub fn record(&mut self, name: String) {
        self.names.insert(0, name);
        self.names.truncate(Self::CAPACITY);
    }

    /// Winners newest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.names
    }

    /// The most recent winner, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// One full game session.
#[derive(Debug, Clone)]
pub struct Session {
    /// The dual-world map.
    pub map: ZoneMap,
    /// Players still in the session.
    pub roster: Roster,
    /// The session's RNG stream. Every draw in the session comes from here.
    pub rng: Rng,
    special_claimed: bool,
    over: Option<Outcome>,
    winners: WinnersLog,
}

impl Session {
    /// A fresh session with an empty map and roster, seeded RNG stream.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            map: ZoneMap::new(),
            roster: Roster::new(),
            rng: Rng::new(seed),
            special_claimed: false,
            over: None,
            winners: WinnersLog::new(),
        }
    }

    /// Roll stats, apply the build, and add the player to the roster.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::TooManyPlayers` at capacity and
    /// `SessionError::ProdigyClaimed` when the once-per-session build is
    /// taken again. Neither failure draws from the RNG.
    pub fn create_player(&mut self, name: String, build: Build) -> Result<PlayerId, SessionError> {
        if self.roster.len() >= MAX_PLAYERS {
            return Err(SessionError::TooManyPlayers);
        }
        if build.is_unique() && self.special_claimed {
            return Err(SessionError::ProdigyClaimed);
        }

        let stats = build.apply(Stats::roll(&mut self.rng));
        // Capacity was checked before the roll, so this cannot refuse.
        let id = self
            .roster
            .add(name, stats, build)
            .ok_or(SessionError::TooManyPlayers)?;
        if build.is_unique() {
            self.special_claimed = true;
        }
        Ok(id)
    }

    /// Begin play: everyone starts at pair 0 in the real world.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MapNotClosed` if the map has not passed
    /// validation, and `SessionError::NoPlayers` for an empty roster.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if !self.map.is_closed() {
            return Err(SessionError::MapNotClosed);
        }
        if self.roster.is_empty() {
            return Err(SessionError::NoPlayers);
        }
        for id in self.roster.ids() {
            if let Some(player) = self.roster.get_mut(id) {
                player.world = World::Real;
                player.position = 0;
            }
        }
        self.over = None;
        Ok(())
    }

    /// Draw this round's player order: every surviving player once, order
    /// freshly shuffled from the session stream.
    pub fn round_order(&mut self) -> Vec<PlayerId> {
        let mut order = self.roster.ids();
        self.rng.shuffle(&mut order);
        order
    }

    /// Whether the session has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.over.is_some()
    }

    /// The session outcome, once set.
    #[must_use]
    pub const fn outcome(&self) -> Option<&Outcome> {
        self.over.as_ref()
    }

    /// The rolling winners log.
    #[must_use]
    pub const fn winners(&self) -> &WinnersLog {
        &self.winners
    }

    /// Whether the once-per-session build has been taken.
    #[must_use]
    pub const fn prodigy_claimed(&self) -> bool {
        self.special_claimed
    }

    pub(crate) fn record_victory(&mut self, winner: String) {
        self.winners.record(winner.clone());
        self.over = Some(Outcome::Victory { winner });
    }

    pub(crate) fn record_total_loss(&mut self) {
        self.over = Some(Outcome::TotalLoss);
    }

    /// Clear the map, roster, and outcome for a fresh setup. The winners log
    /// and the RNG stream carry over.
    pub fn reset(&mut self) {
        self.map = ZoneMap::new();
        self.roster.clear();
        self.special_claimed = false;
        self.over = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EnemyKind, Terrain, ZonePair, MIN_ZONES};

    fn add_closeable_map(session: &mut Session) {
        for _ in 0..MIN_ZONES {
            session
                .map
                .insert_at(session.map.len(), ZonePair::new(Terrain::Street))
                .unwrap();
        }
        session
            .map
            .get_pair_mut(9)
            .unwrap()
            .set_enemy(World::Mirror, Some(EnemyKind::Boss));
        session.map.close().unwrap();
    }

    #[test]
    fn test_create_player_applies_build_to_rolled_stats() {
        let mut a = Session::new(42);
        let mut b = Session::new(42);
        let id_a = a.create_player("Aki".into(), Build::Balanced).unwrap();
        let id_b = b.create_player("Bea".into(), Build::Aggressive).unwrap();

        // Same seed, same roll; the builds differ only in their adjustment.
        let base = a.roster.get(id_a).unwrap().stats;
        let adjusted = b.roster.get(id_b).unwrap().stats;
        assert_eq!(adjusted.attack, base.attack + 3);
        assert_eq!(adjusted.defense, base.defense - 3);
        assert_eq!(adjusted.luck, base.luck);
    }

    #[test]
    fn test_prodigy_is_once_per_session() {
        let mut session = Session::new(1);
        session.create_player("Aki".into(), Build::Prodigy).unwrap();
        assert!(session.prodigy_claimed());
        assert_eq!(
            session.create_player("Bea".into(), Build::Prodigy),
            Err(SessionError::ProdigyClaimed)
        );
        // Other builds remain available.
        session.create_player("Bea".into(), Build::Guarded).unwrap();
    }

    #[test]
    fn test_fifth_player_is_refused() {
        let mut session = Session::new(1);
        for i in 0..4 {
            session
                .create_player(format!("P{i}"), Build::Balanced)
                .unwrap();
        }
        assert_eq!(
            session.create_player("Fifth".into(), Build::Balanced),
            Err(SessionError::TooManyPlayers)
        );
    }

    #[test]
    fn test_start_requires_closed_map_and_players() {
        let mut session = Session::new(2);
        session.create_player("Aki".into(), Build::Balanced).unwrap();
        assert_eq!(session.start(), Err(SessionError::MapNotClosed));

        add_closeable_map(&mut session);
        session.start().unwrap();

        let mut empty = Session::new(2);
        add_closeable_map(&mut empty);
        assert_eq!(empty.start(), Err(SessionError::NoPlayers));
    }

    #[test]
    fn test_start_places_everyone_at_the_real_head() {
        let mut session = Session::new(3);
        let a = session.create_player("Aki".into(), Build::Balanced).unwrap();
        let b = session.create_player("Bea".into(), Build::Guarded).unwrap();
        add_closeable_map(&mut session);

        // Scatter them, then start.
        session.roster.get_mut(a).unwrap().position = 7;
        session.roster.get_mut(b).unwrap().world = World::Mirror;
        session.start().unwrap();

        for player in &session.roster {
            assert_eq!(player.world, World::Real);
            assert_eq!(player.position, 0);
        }
    }

    #[test]
    fn test_round_order_holds_everyone_exactly_once() {
        let mut session = Session::new(4);
        for i in 0..4 {
            session
                .create_player(format!("P{i}"), Build::Balanced)
                .unwrap();
        }
        for _ in 0..20 {
            let mut order = session.round_order();
            assert_eq!(order.len(), 4);
            order.sort_unstable();
            assert_eq!(order, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_round_order_varies_between_rounds() {
        let mut session = Session::new(5);
        for i in 0..4 {
            session
                .create_player(format!("P{i}"), Build::Balanced)
                .unwrap();
        }
        let orders: Vec<_> = (0..10).map(|_| session.round_order()).collect();
        assert!(
            orders.iter().any(|order| order != &orders[0]),
            "ten shuffled rounds never changed order"
        );
    }

    #[test]
    fn test_winners_log_keeps_three_newest_first() {
        let mut log = WinnersLog::new();
        log.record("first".into());
        log.record("second".into());
        log.record("third".into());
        log.record("fourth".into());
        assert_eq!(log.entries(), ["fourth", "third", "second"]);
        assert_eq!(log.latest(), Some("fourth"));
    }

    #[test]
    fn test_reset_preserves_winners_and_stream() {
        let mut session = Session::new(6);
        session.create_player("Aki".into(), Build::Prodigy).unwrap();
        add_closeable_map(&mut session);
        session.start().unwrap();
        session.record_victory("Aki".into());
        assert!(session.is_over());

        session.reset();
        assert!(session.map.is_empty());
        assert!(session.roster.is_empty());
        assert!(!session.is_over());
        assert!(!session.prodigy_claimed());
        assert_eq!(session.winners().latest(), Some("Aki"));
    }
}
