use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// File holding the ordered list of provider names.
pub const SELECTION_FILE: &str = "config.json";
/// Bytes written when no selection file exists yet.
pub const DEFAULT_SELECTION: &str = r#"["time"]"#;

/// Ordered provider names read from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub names: Vec<String>,
}

impl Selection {
    /// Decode a JSON array of strings.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let names: Vec<String> =
            serde_json::from_str(input).context("selection must be a JSON array of strings")?;
        Ok(Self { names })
    }

    /// Load `dir/config.json`, writing the default `["time"]` first if the
    /// file does not exist.
    pub fn load_or_bootstrap(dir: &Path) -> Result<Self> {
        let path = dir.join(SELECTION_FILE);
        if !path.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create config directory {}", dir.display()))?;
            fs::write(&path, DEFAULT_SELECTION)
                .with_context(|| format!("failed to write default selection {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote default selection");
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read selection at {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("invalid selection at {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ordered_names() {
        let sel = Selection::from_json_str(r#"["wifi", "battery", "time"]"#).unwrap();
        assert_eq!(sel.names, vec!["wifi", "battery", "time"]);
    }

    #[test]
    fn empty_array_is_allowed() {
        assert!(Selection::from_json_str("[]").unwrap().names.is_empty());
    }

    #[test]
    fn non_array_is_rejected() {
        let err = Selection::from_json_str(r#"{"show": ["time"]}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("JSON array of strings"));
        assert!(Selection::from_json_str(r#"["time", 3]"#).is_err());
    }

    #[test]
    fn bootstrap_creates_dir_and_default_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("dankbar");

        let sel = Selection::load_or_bootstrap(&dir).unwrap();
        assert_eq!(sel.names, vec!["time"]);
        assert_eq!(
            fs::read_to_string(dir.join(SELECTION_FILE)).unwrap(),
            r#"["time"]"#
        );
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(SELECTION_FILE), r#"["battery","time"]"#).unwrap();

        let sel = Selection::load_or_bootstrap(tmp.path()).unwrap();
        assert_eq!(sel.names, vec!["battery", "time"]);
        assert_eq!(
            fs::read_to_string(tmp.path().join(SELECTION_FILE)).unwrap(),
            r#"["battery","time"]"#
        );
    }

    #[test]
    fn corrupt_file_error_names_path() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(SELECTION_FILE), "not json").unwrap();

        let err = format!("{:#}", Selection::load_or_bootstrap(tmp.path()).unwrap_err());
        assert!(err.contains("invalid selection at"));
        assert!(err.contains(SELECTION_FILE));
    }
}
