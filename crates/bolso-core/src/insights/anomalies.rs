//! Statistical anomaly detection
//!
//! Two heuristics over a recent transaction window:
//! - z-score outliers on absolute amounts (HIGH_SPEND)
//! - adjacent same-amount, same-description entries within 24h (DUPLICATE)
//!
//! This is not fraud detection; both checks are deliberately simple and
//! degrade to an empty result on small samples.

use tracing::debug;

use crate::models::Transaction;

use super::types::{Anomaly, AnomalyKind};

/// Thresholds for anomaly detection.
#[derive(Debug, Clone)]
pub struct AnomalyConfig {
    /// Minimum transactions required before any detection runs.
    pub min_sample: usize,
    /// Z-score above which an amount is flagged as an outlier.
    pub z_threshold: f64,
    /// Absolute floor: outliers below this amount are ignored so trivially
    /// small series don't produce flags.
    pub outlier_floor: f64,
    /// Window within which an adjacent identical entry counts as a duplicate.
    pub duplicate_window_hours: i64,
    /// Fixed score assigned to duplicate flags.
    pub duplicate_score: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            min_sample: 5,
            z_threshold: 2.5,
            outlier_floor: 100.0,
            duplicate_window_hours: 24,
            duplicate_score: 10.0,
        }
    }
}

/// Detect outliers and likely duplicates in a transaction window.
///
/// The caller restricts the slice to the window of interest (the engine
/// passes the last 30 days). Fewer than `min_sample` transactions yields an
/// empty result, not an error.
pub fn detect_anomalies(transactions: &[Transaction], config: &AnomalyConfig) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    if transactions.len() < config.min_sample {
        return anomalies;
    }

    detect_outliers(transactions, config, &mut anomalies);
    detect_duplicates(transactions, config, &mut anomalies);

    debug!(
        transactions = transactions.len(),
        anomalies = anomalies.len(),
        "Anomaly detection complete"
    );

    anomalies
}

/// Flag amounts whose z-score exceeds the threshold and the absolute floor.
fn detect_outliers(transactions: &[Transaction], config: &AnomalyConfig, out: &mut Vec<Anomaly>) {
    let amounts: Vec<f64> = transactions.iter().map(|t| t.amount.abs()).collect();
    let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;

    // Population variance
    let variance =
        amounts.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / amounts.len() as f64;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        // All amounts identical: z-score undefined, skip outlier detection
        return;
    }

    for tx in transactions {
        let amount = tx.amount.abs();
        let z_score = (amount - mean) / std_dev;

        if z_score > config.z_threshold && amount > config.outlier_floor {
            out.push(Anomaly {
                transaction_id: tx.id.clone(),
                score: z_score,
                kind: AnomalyKind::HighSpend,
                details: format!(
                    "Valor {:.1}x acima da média (R$ {:.2})",
                    z_score, mean
                ),
            });
        }
    }
}

/// Flag the later of two adjacent entries with identical amount and
/// normalized description inside the duplicate window.
///
/// Known limitation: this is a single adjacent-pair scan after sorting by
/// date. A duplicate separated from its original by an intervening different
/// transaction is not detected even when both fall within the window.
fn detect_duplicates(transactions: &[Transaction], config: &AnomalyConfig, out: &mut Vec<Anomaly>) {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let window_seconds = config.duplicate_window_hours * 3600;

    for pair in sorted.windows(2) {
        let (current, next) = (pair[0], pair[1]);

        let delta = (next.date - current.date).num_seconds().abs();
        if delta >= window_seconds {
            continue;
        }

        if current.amount == next.amount
            && normalize_description(&current.description) == normalize_description(&next.description)
        {
            out.push(Anomaly {
                transaction_id: next.id.clone(),
                score: config.duplicate_score,
                kind: AnomalyKind::Duplicate,
                details: "Possível transação duplicada detectada".to_string(),
            });
        }
    }
}

fn normalize_description(description: &str) -> String {
    description.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::NaiveDate;

    fn tx(id: &str, amount: f64, description: &str, day: u32, hour: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            kind: TransactionType::Expense,
            category_id: None,
        }
    }

    #[test]
    fn test_outlier_flagged() {
        // Nine ordinary amounts plus one ten-fold spike; the spike's z-score
        // is ~3.0, well over the 2.5 threshold and the R$ 100 floor
        let amounts = [50.0, 55.0, 60.0, 58.0, 62.0, 52.0, 57.0, 54.0, 59.0, 500.0];
        let transactions: Vec<Transaction> = amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| tx(&format!("t{}", i), a, &format!("Compra {}", i), 1 + i as u32, 10))
            .collect();

        let anomalies = detect_anomalies(&transactions, &AnomalyConfig::default());

        let high_spend: Vec<_> = anomalies
            .iter()
            .filter(|a| a.kind == AnomalyKind::HighSpend)
            .collect();
        assert_eq!(high_spend.len(), 1);
        assert_eq!(high_spend[0].transaction_id, "t9");
        assert!(high_spend[0].score > 2.5);
        assert!(high_spend[0].details.contains("acima da média"));
    }

    #[test]
    fn test_small_amounts_not_flagged_despite_high_z() {
        // A relative outlier below the R$ 100 floor stays unflagged
        let amounts = [1.0, 1.1, 0.9, 1.0, 1.05, 1.0, 0.95, 1.0, 1.1, 20.0];
        let transactions: Vec<Transaction> = amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| tx(&format!("t{}", i), a, &format!("Cafe {}", i), 1 + i as u32, 10))
            .collect();

        let anomalies = detect_anomalies(&transactions, &AnomalyConfig::default());
        assert!(anomalies
            .iter()
            .all(|a| a.kind != AnomalyKind::HighSpend));
    }

    #[test]
    fn test_insufficient_sample_returns_empty() {
        let transactions = vec![
            tx("t0", 50.0, "A", 1, 10),
            tx("t1", 5000.0, "B", 2, 10),
            tx("t2", 55.0, "C", 3, 10),
            tx("t3", 60.0, "D", 4, 10),
        ];

        let anomalies = detect_anomalies(&transactions, &AnomalyConfig::default());
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_identical_amounts_skip_outlier_detection() {
        // Zero stddev: no outlier flags, but duplicate detection still runs
        let transactions = vec![
            tx("t0", 15.99, "Netflix", 1, 10),
            tx("t1", 15.99, "Netflix", 1, 12),
            tx("t2", 15.99, "Outra coisa", 5, 10),
            tx("t3", 15.99, "Mais uma", 10, 10),
            tx("t4", 15.99, "E outra", 15, 10),
        ];

        let anomalies = detect_anomalies(&transactions, &AnomalyConfig::default());
        assert!(anomalies.iter().all(|a| a.kind == AnomalyKind::Duplicate));
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].transaction_id, "t1");
    }

    #[test]
    fn test_duplicate_within_24h_flags_later_one() {
        let mut transactions = vec![
            tx("orig", 89.90, "Restaurante Sabor", 10, 12),
            tx("dupe", 89.90, "  restaurante sabor ", 10, 14), // 2h later
        ];
        // Padding so the sample-size gate passes
        transactions.push(tx("p1", 20.0, "Mercado", 1, 10));
        transactions.push(tx("p2", 30.0, "Farmacia", 2, 10));
        transactions.push(tx("p3", 40.0, "Posto", 3, 10));

        let anomalies = detect_anomalies(&transactions, &AnomalyConfig::default());

        let duplicates: Vec<_> = anomalies
            .iter()
            .filter(|a| a.kind == AnomalyKind::Duplicate)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].transaction_id, "dupe");
        assert_eq!(duplicates[0].score, 10.0);
    }

    #[test]
    fn test_duplicate_outside_24h_not_flagged() {
        let transactions = vec![
            tx("a", 89.90, "Restaurante Sabor", 10, 12),
            tx("b", 89.90, "Restaurante Sabor", 12, 12), // 48h later
            tx("p1", 20.0, "Mercado", 1, 10),
            tx("p2", 30.0, "Farmacia", 2, 10),
            tx("p3", 40.0, "Posto", 3, 10),
        ];

        let anomalies = detect_anomalies(&transactions, &AnomalyConfig::default());
        assert!(anomalies.iter().all(|a| a.kind != AnomalyKind::Duplicate));
    }

    #[test]
    fn test_same_amount_different_description_not_duplicate() {
        let transactions = vec![
            tx("a", 50.0, "Uber", 10, 12),
            tx("b", 50.0, "Taxi", 10, 13),
            tx("p1", 20.0, "Mercado", 1, 10),
            tx("p2", 30.0, "Farmacia", 2, 10),
            tx("p3", 40.0, "Posto", 3, 10),
        ];

        let anomalies = detect_anomalies(&transactions, &AnomalyConfig::default());
        assert!(anomalies.iter().all(|a| a.kind != AnomalyKind::Duplicate));
    }

    #[test]
    fn test_idempotent() {
        let transactions = vec![
            tx("t0", 50.0, "A", 1, 10),
            tx("t1", 55.0, "B", 2, 10),
            tx("t2", 60.0, "C", 3, 10),
            tx("t3", 58.0, "D", 4, 10),
            tx("t4", 62.0, "E", 5, 10),
            tx("t5", 500.0, "F", 6, 10),
        ];

        let config = AnomalyConfig::default();
        let first = detect_anomalies(&transactions, &config);
        let second = detect_anomalies(&transactions, &config);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.transaction_id, b.transaction_id);
            assert_eq!(a.score, b.score);
        }
    }
}
