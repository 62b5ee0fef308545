//! Recurring payment detection
//!
//! Groups the full transaction history by normalized description and tests
//! each group for near-monthly periodicity. A single irregular gap rejects
//! the whole group: the test is all-or-nothing by design, so partial or
//! drifting cadences never surface as subscriptions.

use chrono::Duration;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Frequency, Transaction};

use super::types::RecurringPattern;

/// Thresholds for recurring pattern detection.
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Minimum total transactions before any detection runs.
    pub min_sample: usize,
    /// Inclusive interval bounds (in days) for a gap to count as monthly.
    pub min_interval_days: f64,
    pub max_interval_days: f64,
    /// Fixed offset added to the last occurrence for the next-date
    /// projection, regardless of the observed average interval.
    pub next_date_offset_days: i64,
    /// Confidence heuristic: base + per-occurrence increment, clamped to 1.
    pub base_confidence: f64,
    pub confidence_per_occurrence: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_sample: 5,
            min_interval_days: 25.0,
            max_interval_days: 35.0,
            next_date_offset_days: 30,
            base_confidence: 0.8,
            confidence_per_occurrence: 0.05,
        }
    }
}

/// Detect monthly-recurring payment groups in a transaction history.
///
/// Fewer than `min_sample` transactions in total yields an empty result.
/// Only the monthly cadence is modeled; weekly/yearly groups fail the
/// interval test and are rejected.
pub fn detect_recurring(
    transactions: &[Transaction],
    config: &PatternConfig,
) -> Vec<RecurringPattern> {
    let mut patterns = Vec::new();
    if transactions.len() < config.min_sample {
        return patterns;
    }

    // Group by normalized description. Digits are stripped so entries like
    // "Netflix 1234" and "Netflix 5678" land in the same group.
    let mut groups: HashMap<String, Vec<&Transaction>> = HashMap::new();
    for tx in transactions {
        groups.entry(group_key(&tx.description)).or_default().push(tx);
    }

    for group in groups.values_mut() {
        if group.len() < 2 {
            continue;
        }

        group.sort_by_key(|t| t.date);

        if !intervals_are_monthly(group, config) {
            continue;
        }

        let avg_amount =
            group.iter().map(|t| t.amount.abs()).sum::<f64>() / group.len() as f64;

        let last_date = group[group.len() - 1].date;
        let confidence = (config.base_confidence
            + group.len() as f64 * config.confidence_per_occurrence)
            .min(1.0);

        patterns.push(RecurringPattern {
            // Original casing of the earliest occurrence
            description: group[0].description.clone(),
            avg_amount,
            frequency: Frequency::Monthly,
            next_potential_date: last_date + Duration::days(config.next_date_offset_days),
            confidence,
        });
    }

    // HashMap iteration order is arbitrary; sort for stable output
    patterns.sort_by(|a, b| a.description.cmp(&b.description));

    debug!(
        transactions = transactions.len(),
        patterns = patterns.len(),
        "Recurring pattern detection complete"
    );

    patterns
}

/// Normalized grouping key: lowercased, trimmed, digits removed.
fn group_key(description: &str) -> String {
    description
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect()
}

/// True when every consecutive gap in the (date-sorted) group falls inside
/// the monthly interval bounds. One bad gap disqualifies the series.
fn intervals_are_monthly(group: &[&Transaction], config: &PatternConfig) -> bool {
    group.windows(2).all(|pair| {
        let days = (pair[1].date - pair[0].date).num_seconds() as f64 / 86_400.0;
        days >= config.min_interval_days && days <= config.max_interval_days
    })
}
