//! Roster loading: one JSON file, read once at startup.
//!
//! Any malformed record fails the whole load — the service never starts
//! with a partial roster.

use std::path::Path;

use anyhow::{Context, Result};

use salesdesk_core::models::SalesData;
use salesdesk_core::roster::Roster;

/// Read and validate the roster file.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;

    let data: SalesData = serde_json::from_str(&content)
        .with_context(|| format!("Invalid roster JSON: {}", path.display()))?;

    let roster = Roster::new(data.sales_reps)
        .with_context(|| format!("Invalid roster data: {}", path.display()))?;

    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_roster(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_roster() {
        let file = write_roster(
            r#"{"salesReps": [{"id": 1, "name": "Alice", "role": "Rep", "region": "West",
                "skills": [], "deals": [], "clients": []}]}"#,
        );
        let roster = load_roster(file.path()).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.by_id(1).unwrap().name, "Alice");
    }

    #[test]
    fn test_missing_file_fails() {
        let err = load_roster(Path::new("/nonexistent/sales.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read roster file"));
    }

    #[test]
    fn test_malformed_record_fails_whole_load() {
        // Second record is missing required fields; nothing loads.
        let file = write_roster(
            r#"{"salesReps": [
                {"id": 1, "name": "Alice", "role": "Rep", "region": "West",
                 "skills": [], "deals": [], "clients": []},
                {"id": 2, "name": "Bob"}
            ]}"#,
        );
        assert!(load_roster(file.path()).is_err());
    }

    #[test]
    fn test_duplicate_ids_fail() {
        let file = write_roster(
            r#"{"salesReps": [
                {"id": 1, "name": "Alice", "role": "Rep", "region": "West",
                 "skills": [], "deals": [], "clients": []},
                {"id": 1, "name": "Bob", "role": "Rep", "region": "East",
                 "skills": [], "deals": [], "clients": []}
            ]}"#,
        );
        assert!(load_roster(file.path()).is_err());
    }
}
