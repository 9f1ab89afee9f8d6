//! Hall of fame persistence and the records command.

use super::CliError;
use riftline::game::WinnersLog;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The last few boss-slayers, newest first, persisted as JSON.
///
/// Capacity mirrors the in-session winners log.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct HallOfFame {
    /// Winner names, newest first.
    winners: Vec<String>,
}

impl HallOfFame {
    /// Load from `path`. A missing file is an empty hall.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
        let mut hall: Self = serde_json::from_str(&text).map_err(|e| {
            CliError::new(format!("Malformed hall of fame {}: {e}", path.display()))
        })?;
        hall.winners.truncate(WinnersLog::CAPACITY);
        Ok(hall)
    }

    /// Save to `path`, pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub(crate) fn save(&self, path: &Path) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
        fs::write(path, json)
            .map_err(|e| CliError::new(format!("Failed to write {}: {e}", path.display())))?;
        Ok(())
    }

    /// Record a winner at the head, evicting the oldest past capacity.
    pub(crate) fn record(&mut self, name: &str) {
        self.winners.insert(0, name.to_string());
        self.winners.truncate(WinnersLog::CAPACITY);
    }

    /// Text rendering, unfilled slots shown as "-".
    pub(crate) fn render(&self) -> String {
        let mut output = String::new();
        output.push_str("Hall of fame (newest first):\n");
        for index in 0..WinnersLog::CAPACITY {
            let name = self.winners.get(index).map_or("-", String::as_str);
            output.push_str(&format!("  {}. {name}\n", index + 1));
        }
        output
    }
}

/// Execute the records command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub(crate) fn execute(path: &Path) -> Result<(), CliError> {
    let hall = HallOfFame::load(path)?;
    print!("{}", hall.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_an_empty_hall() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let hall = HallOfFame::load(&path).unwrap();
        assert!(hall.winners.is_empty());
        assert_eq!(hall.render(), "Hall of fame (newest first):\n  1. -\n  2. -\n  3. -\n");
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hall.json");

        let mut hall = HallOfFame::default();
        hall.record("Aki");
        hall.record("Bea");
        hall.save(&path).unwrap();

        let loaded = HallOfFame::load(&path).unwrap();
        assert_eq!(loaded.winners, vec!["Bea".to_string(), "Aki".to_string()]);
    }

    #[test]
    fn test_record_keeps_the_newest_three() {
        let mut hall = HallOfFame::default();
        for name in ["Aki", "Bea", "Cal", "Dee"] {
            hall.record(name);
        }
        assert_eq!(
            hall.winners,
            vec!["Dee".to_string(), "Cal".to_string(), "Bea".to_string()]
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"not json").unwrap();

        assert!(HallOfFame::load(&path).is_err());
    }

    #[test]
    fn test_load_truncates_an_oversized_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hall.json");
        let text = r#"{"winners":["A","B","C","D","E"]}"#;
        std::fs::write(&path, text).unwrap();

        let hall = HallOfFame::load(&path).unwrap();
        assert_eq!(hall.winners.len(), WinnersLog::CAPACITY);
        assert_eq!(hall.winners[0], "A");
    }
}
