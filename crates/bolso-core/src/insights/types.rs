//! Core types for the insights engine

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Frequency;

/// Result of the monthly spending trend regression.
///
/// Computed fresh on every call; nothing is cached between analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Predicted next-period spend, floored at zero.
    pub next_value: f64,
    /// Linear trend coefficient; positive means rising spend.
    pub slope: f64,
    /// Coefficient of determination (R²) in [0, 1]; 0 when degenerate.
    pub confidence: f64,
}

impl ForecastResult {
    /// Sentinel result for empty or degenerate input.
    pub fn zero() -> Self {
        Self {
            next_value: 0.0,
            slope: 0.0,
            confidence: 0.0,
        }
    }
}

/// Kinds of statistical anomaly the detector can flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    /// Amount is a z-score outlier above the absolute floor.
    HighSpend,
    /// Adjacent transaction with same amount and description within 24h.
    Duplicate,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighSpend => "HIGH_SPEND",
            Self::Duplicate => "DUPLICATE",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnomalyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH_SPEND" => Ok(Self::HighSpend),
            "DUPLICATE" => Ok(Self::Duplicate),
            _ => Err(format!("Unknown anomaly kind: {}", s)),
        }
    }
}

/// One detected anomalous event.
///
/// A transaction may appear in zero or more anomaly records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub transaction_id: String,
    /// Z-score for outliers; fixed sentinel (10.0) for duplicates.
    pub score: f64,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    /// Human-readable explanation, pt-BR.
    pub details: String,
}

/// A description group that passed the monthly periodicity test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringPattern {
    /// Representative label in its original casing (first occurrence).
    pub description: String,
    /// Mean of absolute amounts across the group.
    pub avg_amount: f64,
    pub frequency: Frequency,
    /// Last occurrence plus a fixed 30 days, regardless of observed cadence.
    pub next_potential_date: NaiveDateTime,
    /// Heuristic in [0, 1]; grows with sample count, clamped at 1.
    pub confidence: f64,
}

/// Merged output of one insights run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    pub forecast: ForecastResult,
    pub anomalies: Vec<Anomaly>,
    pub recurring: Vec<RecurringPattern>,
    /// Natural-language tips, pt-BR. Empty when nothing is notable.
    pub tips: Vec<String>,
}
