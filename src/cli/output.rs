//! Output formatting utilities for CLI.

use riftline::game::Outcome;
use riftline::sim::SessionResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated statistics over a batch of autoplayed sessions.
#[derive(Debug, Default)]
pub(super) struct SimStats {
    /// Sessions that produced a result.
    pub(super) sessions_played: u64,
    /// Sessions won by clearing the boss.
    pub(super) victories: u64,
    /// Sessions lost with every player slain.
    pub(super) total_losses: u64,
    /// Sessions still unresolved at the round cap.
    pub(super) unresolved: u64,
    /// Total rounds across all sessions.
    total_rounds: u64,
    /// Total surviving players across all sessions.
    total_survivors: u64,
    /// Boss kills per winner name.
    wins_by_name: BTreeMap<String, u64>,
}

impl SimStats {
    /// Fold one session result into the totals.
    pub(super) fn add_result(&mut self, result: &SessionResult) {
        self.sessions_played += 1;
        self.total_rounds += u64::from(result.rounds);
        self.total_survivors += result.survivors as u64;

        match &result.outcome {
            Some(Outcome::Victory { winner }) => {
                self.victories += 1;
                *self.wins_by_name.entry(winner.clone()).or_insert(0) += 1;
            }
            Some(Outcome::TotalLoss) => self.total_losses += 1,
            None => self.unresolved += 1,
        }
    }

    /// Share of sessions with `count` outcomes (0.0-1.0).
    // Session counts stay far below 2^53.
    #[allow(clippy::cast_precision_loss)]
    fn share(&self, count: u64) -> f64 {
        if self.sessions_played == 0 {
            return 0.0;
        }
        count as f64 / self.sessions_played as f64
    }

    /// Share of sessions ending in victory (0.0-1.0).
    pub(super) fn victory_rate(&self) -> f64 {
        self.share(self.victories)
    }

    /// Mean rounds per session.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn mean_rounds(&self) -> f64 {
        if self.sessions_played == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.sessions_played as f64
    }

    /// Mean surviving players per session.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn mean_survivors(&self) -> f64 {
        if self.sessions_played == 0 {
            return 0.0;
        }
        self.total_survivors as f64 / self.sessions_played as f64
    }
}

/// Format batch statistics as human-readable text.
pub(super) fn format_stats_text(stats: &SimStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Sessions: {}\n", stats.sessions_played));
    output.push_str(&format!(
        "  Victories:    {} ({:.1}%)\n",
        stats.victories,
        stats.share(stats.victories) * 100.0
    ));
    output.push_str(&format!(
        "  Total losses: {} ({:.1}%)\n",
        stats.total_losses,
        stats.share(stats.total_losses) * 100.0
    ));
    output.push_str(&format!(
        "  Unresolved:   {} ({:.1}%)\n",
        stats.unresolved,
        stats.share(stats.unresolved) * 100.0
    ));
    output.push_str(&format!("  Mean rounds:    {:.1}\n", stats.mean_rounds()));
    output.push_str(&format!(
        "  Mean survivors: {:.2}\n",
        stats.mean_survivors()
    ));

    if !stats.wins_by_name.is_empty() {
        output.push_str("\nBoss kills by player:\n");
        for (name, wins) in &stats.wins_by_name {
            output.push_str(&format!("  {name}: {wins}\n"));
        }
    }

    output
}

/// JSON-serializable batch summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimResult {
    /// Sessions that produced a result.
    sessions: u64,
    /// Sessions won by clearing the boss.
    victories: u64,
    /// Sessions lost with every player slain.
    total_losses: u64,
    /// Sessions unresolved at the round cap.
    unresolved: u64,
    /// Share of sessions ending in victory (0.0-1.0).
    victory_rate: f64,
    /// Mean rounds per session.
    mean_rounds: f64,
    /// Mean surviving players per session.
    mean_survivors: f64,
    /// Boss kills per player name.
    wins_by_player: BTreeMap<String, u64>,
}

impl JsonSimResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &SimStats) -> Self {
        Self {
            sessions: stats.sessions_played,
            victories: stats.victories,
            total_losses: stats.total_losses,
            unresolved: stats.unresolved,
            victory_rate: stats.victory_rate(),
            mean_rounds: stats.mean_rounds(),
            mean_survivors: stats.mean_survivors(),
            wins_by_player: stats.wins_by_name.clone(),
        }
    }
}
