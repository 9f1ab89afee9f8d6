//! Session invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented engine. The store
//! enforces them structurally (paired zones, close validation); these checks
//! catch anything that slips through a content edit or a combat path.

use crate::game::{EnemyKind, Outcome, Session, WinnersLog, MAX_PLAYERS, MIN_ZONES};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all session invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(session: &Session) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    // A closed map has passed validation; it must still satisfy it.
    if session.map.is_closed() {
        if session.map.len() < MIN_ZONES {
            violations.push(InvariantViolation {
                message: format!(
                    "Closed map has {} zone pairs, below the minimum {MIN_ZONES}",
                    session.map.len()
                ),
            });
        }
        let bosses = session.map.boss_count();
        if bosses != 1 {
            violations.push(InvariantViolation {
                message: format!("Closed map has {bosses} mirror bosses, expected exactly 1"),
            });
        }
    }

    // The boss belongs to the mirror world only, closed or not.
    for (index, pair) in session.map.iter().enumerate() {
        if pair.real_enemy == Some(EnemyKind::Boss) {
            violations.push(InvariantViolation {
                message: format!("Boss found in the real world at zone {index}"),
            });
        }
    }

    // Every player stands on a zone pair that exists.
    for player in &session.roster {
        if player.position >= session.map.len() {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {} at position {} on a map of {} zone pairs",
                    player.id,
                    player.position,
                    session.map.len()
                ),
            });
        }
    }

    if session.roster.len() > MAX_PLAYERS {
        violations.push(InvariantViolation {
            message: format!(
                "Roster holds {} players, above the maximum {MAX_PLAYERS}",
                session.roster.len()
            ),
        });
    }

    // Ids are unique within a session.
    let mut ids = session.roster.ids();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != session.roster.len() {
        violations.push(InvariantViolation {
            message: "Duplicate player ids in the roster".to_string(),
        });
    }

    if session.winners().entries().len() > WinnersLog::CAPACITY {
        violations.push(InvariantViolation {
            message: format!(
                "Winners log holds {} entries, above the capacity {}",
                session.winners().entries().len(),
                WinnersLog::CAPACITY
            ),
        });
    }

    // A total loss means nobody is left.
    if session.outcome() == Some(&Outcome::TotalLoss) && !session.roster.is_empty() {
        violations.push(InvariantViolation {
            message: format!(
                "Session ended in total loss with {} players still on the roster",
                session.roster.len()
            ),
        });
    }

    violations
}

/// Assert all session invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(session: &Session) {
    let violations = check_invariants(session);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!(
            "Session invariant violations:\n  - {}",
            messages.join("\n  - ")
        );
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_session: &Session) {}
