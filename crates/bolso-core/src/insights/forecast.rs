//! Spending trend forecast
//!
//! Fits an ordinary least-squares line over per-period totals and predicts
//! the next period. The forecaster is window-size agnostic; the engine feeds
//! it one point per calendar month.

use serde::{Deserialize, Serialize};

use super::types::ForecastResult;

/// One observation: a period index and its total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Time index (month 1, 2, 3...).
    pub x: f64,
    /// Value (total spending for the period).
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Closed-form linear regression over the given points.
///
/// Degenerate inputs produce sentinel values instead of NaN:
/// - empty input: all zeros
/// - a single point: that value as the prediction, slope and confidence 0
/// - all x identical (zero x-variance): mean as the prediction, slope and
///   confidence 0
/// - zero y-variance: confidence 0 (R² undefined)
pub fn calculate_trend(data: &[DataPoint]) -> ForecastResult {
    if data.len() < 2 {
        return ForecastResult {
            next_value: data.first().map(|p| p.y).unwrap_or(0.0),
            slope: 0.0,
            confidence: 0.0,
        };
    }

    let n = data.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;

    for point in data {
        sum_x += point.x;
        sum_y += point.y;
        sum_xy += point.x * point.y;
        sum_xx += point.x * point.x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        // All x identical: the regression is undefined. Fall back to the
        // mean with zero slope rather than dividing by zero.
        return ForecastResult {
            next_value: (sum_y / n).max(0.0),
            slope: 0.0,
            confidence: 0.0,
        };
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    // R² for confidence
    let mean_y = sum_y / n;
    let mut ss_tot = 0.0;
    let mut ss_res = 0.0;
    for point in data {
        let prediction = slope * point.x + intercept;
        ss_tot += (point.y - mean_y).powi(2);
        ss_res += (point.y - prediction).powi(2);
    }

    let confidence = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    // Predict one step past the largest observed index
    let next_x = data.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max) + 1.0;
    let next_value = slope * next_x + intercept;

    ForecastResult {
        // Spending can't go negative
        next_value: next_value.max(0.0),
        slope,
        confidence,
    }
}
