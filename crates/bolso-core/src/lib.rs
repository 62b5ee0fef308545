//! Bolso Core Library
//!
//! Shared functionality for the Bolso personal finance tool:
//! - Bank statement import parsers (OFX and delimited CSV)
//! - Keyword-based category suggestion for imported transactions
//! - Spending trend forecast (linear regression over monthly totals)
//! - Statistical anomaly detection (outliers and duplicates)
//! - Recurring payment (subscription) detection

pub mod error;
pub mod import;
pub mod insights;
pub mod models;

pub use error::{Error, Result};
pub use import::{
    categorize_all, parse_statement, suggest_category, CategorizedTransaction, ImportReport,
    ImportedTransaction, StatementFormat,
};
pub use insights::{
    Anomaly, AnomalyKind, EngineConfig, ForecastResult, InsightEngine, InsightsReport,
    RecurringPattern,
};
pub use models::{Frequency, Transaction, TransactionType};
