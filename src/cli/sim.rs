//! Batch simulation command implementation.

use super::output::{format_stats_text, JsonSimResult, SimStats};
use super::{clock_seed, CliError, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use riftline::sim::{run_batch, SimConfig};
use std::time::Instant;

/// Execute the sim command.
///
/// # Errors
///
/// Returns an error if the session configuration is rejected or output
/// fails.
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    players: usize,
    zones: usize,
    max_rounds: u32,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(clock_seed);
    let config = SimConfig {
        players,
        zones,
        max_rounds,
    };

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sessions ({per_sec})",
                )
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let results = run_batch(base_seed, games, &config);

    // A config rejection fails every session the same way, so the first
    // error speaks for all of them.
    let mut stats = SimStats::default();
    for result in results {
        stats.add_result(&result?);
    }

    // Update progress bar after completion (no atomic overhead in hot path)
    if let Some(pb) = pb {
        pb.set_position(stats.sessions_played);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    // Session counts stay far below 2^53.
    #[allow(clippy::cast_precision_loss)]
    let per_sec = if duration.as_secs_f64() > 0.0 {
        stats.sessions_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        OutputFormat::Text => {
            println!();
            println!("Batch of {games} sessions from seed {base_seed}");
            print!("{}", format_stats_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({per_sec:.0} sessions/sec)",
                duration.as_secs_f64()
            );
        }
        OutputFormat::Json => {
            let json_result = JsonSimResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
