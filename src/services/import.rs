//! CSV import service
//!
//! Turns a UBS Visa card export into transfer requests. Each purchase
//! becomes a transfer from the card account to the account picked by the
//! first matching keyword rule.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ByteRecord, Reader, ReaderBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{CsvEncoding, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, TransferRequest};
use crate::storage::write_yaml;

/// Preamble rows before the first transaction
const SKIP_ROWS: usize = 2;

/// Housekeeping row carrying the previous statement balance
const BALANCE_REPORT_TEXT: &str = "Report de solde";

const DATE_FORMAT: &str = "%d.%m.%Y";

/// Column layout of the export
mod column {
    pub const DATE_PURCHASE: usize = 3;
    pub const TEXT: usize = 4;
    pub const TYPE: usize = 5;
    pub const DEBIT: usize = 10;
}

/// Keyword rule choosing the destination account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRule {
    /// Words that must all appear in the text field
    #[serde(default)]
    pub in_text: Vec<String>,

    /// Words that must all appear in the type field
    #[serde(default)]
    pub in_type: Vec<String>,

    /// Destination account
    pub to: String,
}

impl ImportRule {
    /// Whether every keyword occurs in its field, ignoring case.
    ///
    /// An empty field is not checked.
    pub fn matches(&self, text: &str, kind: &str) -> bool {
        fn all_in(words: &[String], field: &str) -> bool {
            if field.is_empty() {
                return true;
            }
            let field = field.to_lowercase();
            words.iter().all(|w| field.contains(&w.to_lowercase()))
        }

        all_in(&self.in_text, text) && all_in(&self.in_type, kind)
    }
}

/// Import options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Purchases before this date are left out
    pub start_date: Option<NaiveDate>,
    /// Account every purchase is paid from
    pub source_account: String,
    /// Destination when no rule matches
    pub unassigned_account: String,
    pub encoding: CsvEncoding,
}

impl ImportOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            start_date: None,
            source_account: settings.import_source_account.clone(),
            unassigned_account: settings.unassigned_account.clone(),
            encoding: settings.import_encoding,
        }
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Outcome of parsing one export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub requests: Vec<TransferRequest>,
    pub skipped_before_start: usize,
    pub skipped_without_debit: usize,
    pub skipped_balance_reports: usize,
}

impl ImportReport {
    /// Requests no rule matched
    pub fn unassigned_count(&self, placeholder: &str) -> usize {
        self.requests.iter().filter(|r| r.to == placeholder).count()
    }

    pub fn skipped(&self) -> usize {
        self.skipped_before_start + self.skipped_without_debit + self.skipped_balance_reports
    }
}

/// Service for CSV import
#[derive(Debug, Clone)]
pub struct ImportService {
    rules: Vec<ImportRule>,
    options: ImportOptions,
}

/// Load an ordered rule list from a YAML file
pub fn load_rules(path: &Path) -> LedgerResult<Vec<ImportRule>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LedgerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(&content)
        .map_err(|e| LedgerError::Yaml(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Output path used when none is given: the CSV path with a `.yml` extension
pub fn default_output_path(csv_path: &Path) -> PathBuf {
    csv_path.with_extension("yml")
}

fn decode(bytes: &[u8], encoding: CsvEncoding) -> LedgerResult<String> {
    match encoding {
        CsvEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        CsvEncoding::Utf8 => String::from_utf8(bytes.to_vec())
            .map_err(|e| LedgerError::Import(format!("Invalid UTF-8: {}", e))),
    }
}

/// Parse a debit like `12.50` or `1'234.50`
fn parse_debit(s: &str) -> Result<Money, String> {
    let cleaned: String = s.chars().filter(|c| *c != '\'' && *c != ' ').collect();
    Money::parse(&cleaned).map_err(|e| format!("Could not parse amount '{}': {}", s, e))
}

impl ImportService {
    /// Create a new import service
    pub fn new(rules: Vec<ImportRule>, options: ImportOptions) -> Self {
        Self { rules, options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Destination picked by the first matching rule
    pub fn destination_for(&self, text: &str, kind: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(text, kind))
            .map(|rule| {
                debug!(text, to = %rule.to, "rule matched");
                rule.to.as_str()
            })
            .unwrap_or(&self.options.unassigned_account)
    }

    /// Parse an export from an in-memory string
    pub fn parse_csv(&self, content: &[u8]) -> LedgerResult<ImportReport> {
        let mut reader = Self::reader_builder().from_reader(content);
        self.parse_csv_from_reader(&mut reader)
    }

    fn reader_builder() -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.delimiter(b';').has_headers(false).flexible(true);
        builder
    }

    /// Parse an export from a CSV reader
    pub fn parse_csv_from_reader<R: std::io::Read>(
        &self,
        reader: &mut Reader<R>,
    ) -> LedgerResult<ImportReport> {
        let mut report = ImportReport::default();

        for (idx, result) in reader.byte_records().enumerate().skip(SKIP_ROWS) {
            let record = result?;
            let row_number = idx + 1;
            if let Some(request) = self
                .parse_record(&record, &mut report)
                .map_err(|e| LedgerError::Import(format!("Row {}: {}", row_number, e)))?
            {
                report.requests.push(request);
            }
        }

        Ok(report)
    }

    fn field(&self, record: &ByteRecord, index: usize) -> Result<String, String> {
        let bytes = record.get(index).unwrap_or_default();
        decode(bytes, self.options.encoding)
            .map(|s| s.trim().to_string())
            .map_err(|e| e.to_string())
    }

    /// Parse one row; `None` when the row is skipped
    fn parse_record(
        &self,
        record: &ByteRecord,
        report: &mut ImportReport,
    ) -> Result<Option<TransferRequest>, String> {
        let text = self.field(record, column::TEXT)?;
        if text == BALANCE_REPORT_TEXT {
            debug!("skipping balance report row");
            report.skipped_balance_reports += 1;
            return Ok(None);
        }

        let date_str = self.field(record, column::DATE_PURCHASE)?;
        let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
            .map_err(|_| format!("Could not parse date: '{}'", date_str))?;

        if let Some(start) = self.options.start_date {
            if date < start {
                debug!(%date, "skipping row before start date");
                report.skipped_before_start += 1;
                return Ok(None);
            }
        }

        let debit = self.field(record, column::DEBIT)?;
        if debit.is_empty() {
            debug!(text = %text, "skipping row without debit");
            report.skipped_without_debit += 1;
            return Ok(None);
        }
        let amount = parse_debit(&debit)?;

        let kind = self.field(record, column::TYPE)?;
        let description = if kind.is_empty() {
            text.clone()
        } else {
            format!("{} {}", text, kind)
        };

        Ok(Some(TransferRequest {
            from: self.options.source_account.clone(),
            to: self.destination_for(&text, &kind).to_string(),
            amount,
            description,
            date: Some(date),
        }))
    }

    /// Parse an export file and write the requests as YAML.
    ///
    /// Without `output` the requests go next to the CSV with a `.yml`
    /// extension. Returns the report and the path written.
    pub fn import_file(
        &self,
        csv_path: &Path,
        output: Option<&Path>,
    ) -> LedgerResult<(ImportReport, PathBuf)> {
        let mut reader = Self::reader_builder()
            .from_path(csv_path)
            .map_err(|e| LedgerError::Import(format!("Failed to read {}: {}", csv_path.display(), e)))?;
        let report = self.parse_csv_from_reader(&mut reader)?;

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(csv_path));
        write_yaml(&output, &report.requests)?;

        info!(
            csv = %csv_path.display(),
            output = %output.display(),
            requests = report.requests.len(),
            skipped = report.skipped(),
            "imported card export"
        );
        Ok((report, output))
    }
}
