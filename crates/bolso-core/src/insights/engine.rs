//! Insights engine - orchestrates analysis over a transaction window
//!
//! Fans one transaction slice out to the forecaster (monthly expense
//! buckets), the anomaly detector (recent window), and the recurring
//! pattern detector (full slice), then merges the results with
//! natural-language tips. Every run is a pure function of its input; no
//! state survives between calls, so concurrent callers are safe.

use chrono::{Datelike, Duration, NaiveDateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{Transaction, TransactionType};

use super::anomalies::{detect_anomalies, AnomalyConfig};
use super::forecast::{calculate_trend, DataPoint};
use super::patterns::{detect_recurring, PatternConfig};
use super::types::InsightsReport;

/// Configuration for one insights run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Only transactions newer than this many days feed the anomaly
    /// detector. The full slice still feeds the pattern detector.
    pub anomaly_window_days: i64,
    pub anomaly: AnomalyConfig,
    pub pattern: PatternConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            anomaly_window_days: 30,
            anomaly: AnomalyConfig::default(),
            pattern: PatternConfig::default(),
        }
    }
}

/// The main insights engine.
pub struct InsightEngine {
    config: EngineConfig,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Run all analyses with "now" as the reference instant.
    ///
    /// The caller supplies the lookback slice (typically the last 6 months
    /// from the repository); the engine does not fetch anything itself.
    pub fn analyze(&self, transactions: &[Transaction]) -> InsightsReport {
        self.analyze_at(transactions, Utc::now().naive_utc())
    }

    /// Run all analyses relative to an explicit reference instant.
    ///
    /// Deterministic for a fixed `now`, which is what tests and replay use.
    pub fn analyze_at(&self, transactions: &[Transaction], now: NaiveDateTime) -> InsightsReport {
        // 1. Forecast: expense totals bucketed per calendar month
        let forecast = calculate_trend(&monthly_expense_points(transactions));

        // 2. Anomalies: recent window only
        let window_seconds = self.config.anomaly_window_days * 86_400;
        let recent: Vec<Transaction> = transactions
            .iter()
            .filter(|t| (now - t.date).num_seconds() < window_seconds)
            .cloned()
            .collect();
        let anomalies = detect_anomalies(&recent, &self.config.anomaly);

        // 3. Patterns: full history
        let recurring = detect_recurring(transactions, &self.config.pattern);

        // 4. Tips
        let mut tips = Vec::new();
        if forecast.slope > 0.0 {
            tips.push(format!(
                "⚠️ Seus gastos estão subindo cerca de R$ {:.2} por mês.",
                forecast.slope
            ));
        } else if forecast.slope < 0.0 {
            tips.push(format!(
                "✅ Parabéns! Você está reduzindo seus gastos em R$ {:.2} ao mês.",
                forecast.slope.abs()
            ));
        }

        if !recurring.is_empty() {
            let total_fixed: f64 = recurring.iter().map(|r| r.avg_amount).sum();
            tips.push(format!(
                "📅 Detectamos {} assinaturas prováveis, totalizando R$ {:.2}/mês.",
                recurring.len(),
                total_fixed
            ));
        }

        debug!(
            transactions = transactions.len(),
            recent = recent.len(),
            anomalies = anomalies.len(),
            recurring = recurring.len(),
            tips = tips.len(),
            "Insights analysis complete"
        );

        InsightsReport {
            forecast,
            anomalies,
            recurring,
            tips,
        }
    }
}

/// Sum expense magnitudes per calendar month. Each point's x is the month
/// offset from the earliest bucket plus 1, so a month with no expenses
/// leaves a gap on the x-axis instead of compressing the series; keying by
/// (year, month) keeps histories that cross a year boundary in order.
fn monthly_expense_points(transactions: &[Transaction]) -> Vec<DataPoint> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();

    for tx in transactions {
        if tx.kind != TransactionType::Expense {
            continue;
        }
        let month_index = tx.date.year() * 12 + tx.date.month() as i32 - 1;
        *totals.entry(month_index).or_insert(0.0) += tx.amount.abs();
    }

    let Some(first) = totals.keys().next().copied() else {
        return Vec::new();
    };

    totals
        .iter()
        .map(|(&index, &total)| DataPoint::new((index - first + 1) as f64, total))
        .collect()
}

/// Convenience filter for "last N days" windows built outside the engine.
pub fn within_last_days(transactions: &[Transaction], now: NaiveDateTime, days: i64) -> Vec<Transaction> {
    let cutoff = now - Duration::days(days);
    transactions
        .iter()
        .filter(|t| t.date > cutoff)
        .cloned()
        .collect()
}
