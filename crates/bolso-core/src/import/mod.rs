//! Bank statement import pipeline
//!
//! Converts raw statement text (OFX or delimited CSV) into normalized
//! [`ImportedTransaction`] values and attaches category suggestions.
//! Both parsers are best-effort: malformed rows or blocks are skipped
//! individually and counted, never turned into errors. The caller owns
//! persistence; nothing here touches the file system or network.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionType};

pub mod categorizer;
pub mod csv;
pub mod ofx;

pub use categorizer::{suggest_category, CategoryRule, DEFAULT_CATEGORY};

/// Statement formats the importer can dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementFormat {
    Ofx,
    Csv,
}

impl StatementFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ofx => "ofx",
            Self::Csv => "csv",
        }
    }

    /// Detect the format from a filename extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".ofx") {
            Some(Self::Ofx)
        } else if lower.ends_with(".csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

impl std::fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction extracted from a bank statement, normalized for review.
///
/// Lives only for the duration of an import: the caller either persists it
/// through the repository or discards it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedTransaction {
    pub date: NaiveDateTime,
    /// Always the magnitude; `kind` is derived from the source amount's sign.
    pub amount: f64,
    pub description: String,
    /// Source-system transaction id (OFX FITID) or a deterministic synthetic
    /// id. Used for traceability only, never for deduplication.
    pub fit_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl ImportedTransaction {
    /// Promote an imported row to a full transaction, using the fit id as
    /// the transaction id. Category assignment stays with the caller.
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            id: self.fit_id,
            amount: self.amount,
            description: self.description,
            date: self.date,
            kind: self.kind,
            category_id: None,
        }
    }
}

/// Result of parsing one statement.
///
/// `skipped` counts rows/blocks dropped for missing or unparseable fields,
/// so callers can surface import quality without a side-channel log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub transactions: Vec<ImportedTransaction>,
    pub skipped: usize,
}

/// An imported transaction with its category suggestion attached.
///
/// `suggested_category` is `None` when no keyword rule matched; defaulting
/// (e.g. to "Outros") is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    #[serde(flatten)]
    pub transaction: ImportedTransaction,
    pub suggested_category: Option<&'static str>,
}

/// Parse a raw statement, dispatching on the filename extension.
///
/// Only the dispatch can fail (unknown extension); the parsers themselves
/// are total and return a possibly-empty report.
pub fn parse_statement(content: &str, filename: &str) -> Result<ImportReport> {
    let format = StatementFormat::from_filename(filename)
        .ok_or_else(|| Error::UnsupportedFormat(filename.to_string()))?;

    debug!(format = %format, filename, "Parsing statement");

    let report = match format {
        StatementFormat::Ofx => ofx::parse_ofx(content),
        StatementFormat::Csv => csv::parse_csv(content),
    };

    debug!(
        parsed = report.transactions.len(),
        skipped = report.skipped,
        "Statement parsed"
    );

    Ok(report)
}

/// Attach category suggestions to every transaction in a report.
pub fn categorize_all(report: ImportReport) -> (Vec<CategorizedTransaction>, usize) {
    let skipped = report.skipped;
    let categorized = report
        .transactions
        .into_iter()
        .map(|tx| {
            let suggested_category = suggest_category(&tx.description);
            CategorizedTransaction {
                transaction: tx,
                suggested_category,
            }
        })
        .collect();
    (categorized, skipped)
}

/// Derive a short deterministic id from statement row content.
///
/// Used when the source provides no transaction identifier. Hashing instead
/// of randomizing keeps repeated parses of the same file byte-identical.
pub(crate) fn synthetic_id(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]); // Field separator so ("ab","c") != ("a","bc")
    }
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}
