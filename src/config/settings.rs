//! User settings for the ledger CLI
//!
//! Every field has a default, so a missing or partial `config.json` is
//! always valid.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::AccountType;

/// Character encoding of bank CSV exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CsvEncoding {
    /// ISO-8859-1, what most Swiss bank exports use
    #[default]
    Latin1,
    Utf8,
}

impl CsvEncoding {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "").as_str() {
            "latin1" | "iso88591" => Some(Self::Latin1),
            "utf8" => Some(Self::Utf8),
            _ => None,
        }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Statement lines shown for each side of a transfer
    #[serde(default = "default_summary_lines")]
    pub summary_lines: usize,

    /// Type given to accounts opened without one
    #[serde(default)]
    pub default_account_type: AccountType,

    /// Destination written by the importer when no rule matches
    #[serde(default = "default_unassigned_account")]
    pub unassigned_account: String,

    /// Account the imported card purchases are paid from
    #[serde(default = "default_import_source_account")]
    pub import_source_account: String,

    #[serde(default)]
    pub import_encoding: CsvEncoding,
}

fn default_summary_lines() -> usize {
    5
}

fn default_unassigned_account() -> String {
    "<TBA>".to_string()
}

fn default_import_source_account() -> String {
    "visa_credit_card".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            summary_lines: default_summary_lines(),
            default_account_type: AccountType::default(),
            unassigned_account: default_unassigned_account(),
            import_source_account: default_import_source_account(),
            import_encoding: CsvEncoding::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_default(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.summary_lines, 5);
        assert_eq!(settings.default_account_type, AccountType::Expense);
        assert_eq!(settings.unassigned_account, "<TBA>");
        assert_eq!(settings.import_source_account, "visa_credit_card");
        assert_eq!(settings.import_encoding, CsvEncoding::Latin1);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_config_dir(temp_dir.path().to_path_buf());
        assert_eq!(Settings::load_or_default(&paths).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_full_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_config_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"summary_lines": 3, "default_account_type": "bank", "unassigned_account": "???", "import_source_account": "mastercard", "import_encoding": "latin1"}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.summary_lines, 3);
        assert_eq!(loaded.default_account_type, AccountType::Bank);
        assert_eq!(loaded.unassigned_account, "???");
        assert_eq!(loaded.import_source_account, "mastercard");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_config_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"import_encoding": "utf8"}"#).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.import_encoding, CsvEncoding::Utf8);
        assert_eq!(loaded.summary_lines, 5);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_config_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        assert!(matches!(
            Settings::load_or_default(&paths).unwrap_err(),
            LedgerError::Config(_)
        ));
    }

    #[test]
    fn test_encoding_parse() {
        assert_eq!(CsvEncoding::parse("latin1"), Some(CsvEncoding::Latin1));
        assert_eq!(CsvEncoding::parse("ISO-8859-1"), Some(CsvEncoding::Latin1));
        assert_eq!(CsvEncoding::parse("UTF-8"), Some(CsvEncoding::Utf8));
        assert_eq!(CsvEncoding::parse("ebcdic"), None);
    }
}
