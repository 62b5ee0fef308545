//! OFX statement parser
//!
//! Scans the document for `<STMTTRN>` blocks and extracts amount, posting
//! date, memo, and the institution transaction id (FITID). Extraction is
//! best-effort: a block missing any required field is counted as skipped and
//! parsing continues with the rest of the document. OFX files in the wild
//! are SGML-flavored and rarely well-formed, so no attempt is made to parse
//! the surrounding envelope.

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::models::TransactionType;

use super::{synthetic_id, ImportReport, ImportedTransaction};

/// Compiled field patterns for one parse pass.
struct OfxPatterns {
    block: Regex,
    amount: Regex,
    date: Regex,
    memo: Regex,
    fit_id: Regex,
}

impl OfxPatterns {
    fn compile() -> Option<Self> {
        Some(Self {
            block: Regex::new(r"(?s)<STMTTRN>(.*?)</STMTTRN>").ok()?,
            amount: Regex::new(r"<TRNAMT>([0-9+.\-]+)").ok()?,
            // 8-digit YYYYMMDD prefix; trailing time/zone qualifiers ignored
            date: Regex::new(r"<DTPOSTED>(\d{8})").ok()?,
            memo: Regex::new(r"<MEMO>([^<\r\n]*)").ok()?,
            fit_id: Regex::new(r"<FITID>([^<\r\n]*)").ok()?,
        })
    }
}

/// Parse OFX statement text into normalized transactions.
///
/// Total function: returns a possibly-empty report, never an error.
pub fn parse_ofx(content: &str) -> ImportReport {
    let Some(patterns) = OfxPatterns::compile() else {
        return ImportReport::default();
    };

    let content = content.replace("\r\n", "\n");

    let mut report = ImportReport::default();

    for block_match in patterns.block.captures_iter(&content) {
        let block = &block_match[1];

        let amount_str = patterns.amount.captures(block).map(|c| c[1].to_string());
        let date_str = patterns.date.captures(block).map(|c| c[1].to_string());
        let memo = patterns
            .memo
            .captures(block)
            .map(|c| c[1].trim().to_string());

        let (Some(amount_str), Some(date_str), Some(memo)) = (amount_str, date_str, memo) else {
            report.skipped += 1;
            continue;
        };

        let Ok(signed_amount) = amount_str.parse::<f64>() else {
            report.skipped += 1;
            continue;
        };

        let Some(date) = parse_ofx_date(&date_str) else {
            report.skipped += 1;
            continue;
        };

        let fit_id = patterns
            .fit_id
            .captures(block)
            .map(|c| c[1].trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "{}-{}",
                    date_str,
                    synthetic_id(&[&date_str, &amount_str, &memo])
                )
            });

        report.transactions.push(ImportedTransaction {
            date: date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            amount: signed_amount.abs(),
            description: memo,
            fit_id,
            kind: TransactionType::from_signed_amount(signed_amount),
        });
    }

    debug!(
        parsed = report.transactions.len(),
        skipped = report.skipped,
        "Parsed OFX statement"
    );

    report
}

/// Parse the 8-digit YYYYMMDD posting date.
fn parse_ofx_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[4..6].parse().ok()?;
    let day: u32 = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
