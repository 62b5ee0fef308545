//! Delimited statement parser
//!
//! Handles CSV-like exports where column layout varies per bank: the header
//! row is matched against known tokens (English and pt-BR) to locate the
//! date, description, and amount columns, with fixed fallback positions when
//! detection fails. Rows that cannot be parsed are skipped individually and
//! counted in the report.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::models::TransactionType;

use super::{synthetic_id, ImportReport, ImportedTransaction};

/// Description used when a row has an empty description column.
const EMPTY_DESCRIPTION: &str = "Sem descrição";

/// Column indices resolved from the header row.
struct ColumnLayout {
    date: usize,
    description: usize,
    amount: usize,
}

impl ColumnLayout {
    /// Locate columns by substring match against known header tokens.
    ///
    /// Falls back to positional defaults (date first, description second,
    /// amount last) for headers that match nothing.
    fn detect(headers: &csv::StringRecord) -> Self {
        let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        let find = |tokens: &[&str]| {
            lower
                .iter()
                .position(|h| tokens.iter().any(|t| h.contains(t)))
        };

        let date = find(&["date", "data"]).unwrap_or(0);
        let description = find(&["desc", "hist", "memo"]).unwrap_or(1);
        // "saldo" (balance) is listed last so a dedicated amount column wins
        let amount = find(&["amount", "valor", "saldo"]).unwrap_or(headers.len().saturating_sub(1));

        Self {
            date,
            description,
            amount,
        }
    }
}

/// Parse delimited statement text into normalized transactions.
///
/// Total function: returns a possibly-empty report, never an error.
pub fn parse_csv(content: &str) -> ImportReport {
    let mut report = ImportReport::default();

    let Some(header_line) = content.lines().find(|l| !l.trim().is_empty()) else {
        return report;
    };

    // Sniff the delimiter from the header row; pt-BR exports favor semicolons
    let delimiter = if header_line.matches(';').count() > header_line.matches(',').count() {
        b';'
    } else {
        b','
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(_) => return report,
    };
    let layout = ColumnLayout::detect(&headers);

    for (row, result) in rdr.records().enumerate() {
        let Ok(record) = result else {
            report.skipped += 1;
            continue;
        };

        if record.len() < 3 {
            report.skipped += 1;
            continue;
        }

        let date_str = record.get(layout.date).unwrap_or("").trim();
        let amount_str = record.get(layout.amount).unwrap_or("").trim();
        let desc_str = record.get(layout.description).unwrap_or("").trim();

        let Some(date) = parse_row_date(date_str) else {
            report.skipped += 1;
            continue;
        };

        let Some(signed_amount) = parse_row_amount(amount_str) else {
            report.skipped += 1;
            continue;
        };

        let description = if desc_str.is_empty() {
            EMPTY_DESCRIPTION.to_string()
        } else {
            desc_str.to_string()
        };

        // Row number participates so identical rows get distinct ids
        let row_tag = (row + 1).to_string();
        let fit_id = format!(
            "CSV-{}-{}",
            row + 1,
            synthetic_id(&[&row_tag, date_str, desc_str, amount_str])
        );

        report.transactions.push(ImportedTransaction {
            date: date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            amount: signed_amount.abs(),
            description,
            fit_id,
            kind: TransactionType::from_signed_amount(signed_amount),
        });
    }

    debug!(
        parsed = report.transactions.len(),
        skipped = report.skipped,
        "Parsed delimited statement"
    );

    report
}

/// Parse a row date: ISO formats first, then day-first pt-BR formats.
fn parse_row_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    let formats = [
        "%Y-%m-%d", // 2024-03-01
        "%Y/%m/%d", // 2024/03/01
        "%d/%m/%Y", // 01/03/2024
        "%d/%m/%y", // 01/03/24
        "%d-%m-%Y", // 01-03-2024
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a row amount, tolerating currency symbols and pt-BR separators.
///
/// Keeps digits, comma, dot, and minus; when a comma is present it is the
/// decimal separator and dots are thousands separators ("R$ 1.234,56").
fn parse_row_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_round_trip() {
        let csv = "Date,Description,Amount\n01/03/2024,Padaria,-15.50";
        let report = parse_csv(csv);

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.skipped, 0);

        let tx = &report.transactions[0];
        assert_eq!(tx.amount, 15.50);
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.description, "Padaria");
        // Day-first: March 1, 2024
        assert_eq!(
            tx.date.date(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_csv_semicolon_ptbr_headers() {
        let csv = "Data;Histórico;Valor\n05/03/2024;Supermercado Central;R$ -1.234,56\n06/03/2024;Pix recebido;R$ 2.000,00";
        let report = parse_csv(csv);

        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.transactions[0].amount, 1234.56);
        assert_eq!(report.transactions[0].kind, TransactionType::Expense);
        assert_eq!(report.transactions[1].amount, 2000.00);
        assert_eq!(report.transactions[1].kind, TransactionType::Income);
    }

    #[test]
    fn test_parse_csv_fallback_columns() {
        // No recognizable header tokens: date=0, description=1, amount=last
        let csv = "A,B,C,D\n2024-03-01,Farmacia,x,-42.00";
        let report = parse_csv(csv);

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].description, "Farmacia");
        assert_eq!(report.transactions[0].amount, 42.00);
    }

    #[test]
    fn test_parse_csv_skips_bad_rows() {
        let csv = "Date,Description,Amount\n\
            01/03/2024,Ok,-10.00\n\
            nota data,Sem data,-5.00\n\
            02/03/2024,Sem valor,abc\n\
            poucos,campos";
        let report = parse_csv(csv);

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_parse_csv_empty_description_placeholder() {
        let csv = "Date,Description,Amount\n01/03/2024,,-10.00";
        let report = parse_csv(csv);

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].description, "Sem descrição");
    }

    #[test]
    fn test_parse_csv_synthetic_ids_unique_and_stable() {
        let csv = "Date,Description,Amount\n01/03/2024,Cafe,-5.00\n01/03/2024,Cafe,-5.00";
        let report = parse_csv(csv);

        assert_eq!(report.transactions.len(), 2);
        assert_ne!(report.transactions[0].fit_id, report.transactions[1].fit_id);
        assert!(report.transactions[0].fit_id.starts_with("CSV-1-"));

        // Idempotent across parses
        let again = parse_csv(csv);
        assert_eq!(report.transactions[0].fit_id, again.transactions[0].fit_id);
    }

    #[test]
    fn test_parse_csv_empty_input() {
        let report = parse_csv("");
        assert!(report.transactions.is_empty());
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_parse_row_amount() {
        assert_eq!(parse_row_amount("-15.50"), Some(-15.50));
        assert_eq!(parse_row_amount("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_row_amount("1,5"), Some(1.5));
        assert_eq!(parse_row_amount("abc"), None);
        assert_eq!(parse_row_amount(""), None);
    }

    #[test]
    fn test_parse_row_date_formats() {
        assert_eq!(
            parse_row_date("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            parse_row_date("01/03/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_row_date("31/02/2024"), None);
        assert_eq!(parse_row_date("ontem"), None);
    }
}
