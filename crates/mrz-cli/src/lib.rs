//! # mrz-cli — CLI Tool for the MRZ Codec
//!
//! Provides the `mrz` command-line interface over `mrz-core`.
//!
//! ## Subcommands
//!
//! - `mrz generate`: Render MRZ lines from a JSON/YAML document or flags.
//! - `mrz check`: Verify every check digit and report warnings.
//! - `mrz formats`: List supported layouts.
//!
//! ```bash
//! mrz generate --format P --input passport.yaml
//! mrz check --format TD1 --file card.txt --json
//! echo "$LINES" | mrz check --format MRVB
//! ```
//!
//! ## Exit codes
//!
//! `0` success or valid MRZ, `2` MRZ with failed check digits, `1` any
//! other error (unreadable input, malformed lines, bad configuration).

pub mod check;
pub mod formats;
pub mod generate;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use mrz_core::CheckerConfig;

/// Exit code for an MRZ whose check digits do not all pass.
pub const EXIT_INVALID: u8 = 2;

/// Load checker settings from `path`, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<CheckerConfig> {
    let Some(path) = path else {
        return Ok(CheckerConfig::default());
    };
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = CheckerConfig::from_yaml_str(&yaml)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded checker config");
    Ok(config)
}

/// Read `path`, or standard input when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read standard input")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_without_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.expiry_pivot, 70);
        assert!(config.birth_pivot.is_none());
    }

    #[test]
    fn load_config_reads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mrz.yaml");
        std::fs::write(&path, "reference_date: 2026-10-19\nexpiry_pivot: 60\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.reference_date.to_string(), "2026-10-19");
        assert_eq!(config.expiry_pivot, 60);
    }

    #[test]
    fn load_config_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "birth_pivot: 200\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("bad.yaml"));
    }

    #[test]
    fn load_config_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("missing.yaml"))).is_err());
    }

    #[test]
    fn read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mrz.txt");
        std::fs::write(&path, "LINE1\nLINE2\n").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "LINE1\nLINE2\n");
    }
}
