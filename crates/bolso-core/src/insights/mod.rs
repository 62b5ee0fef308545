//! Insights Engine - Financial Analysis
//!
//! Pure-function analysis over a user's transaction history:
//!
//! - **Forecast** - linear trend over monthly expense totals
//! - **Anomalies** - z-score outliers and likely duplicate entries
//! - **Recurring** - near-monthly payment patterns (subscriptions)
//!
//! The engine consumes a transaction slice supplied by the caller and
//! produces an in-memory [`InsightsReport`]; it performs no I/O and keeps
//! no state between runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bolso_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let report = engine.analyze(&transactions);
//! ```

pub mod anomalies;
pub mod engine;
pub mod forecast;
pub mod patterns;
pub mod types;

pub use anomalies::{detect_anomalies, AnomalyConfig};
pub use engine::{within_last_days, EngineConfig, InsightEngine};
pub use forecast::{calculate_trend, DataPoint};
pub use patterns::{detect_recurring, PatternConfig};
pub use types::{Anomaly, AnomalyKind, ForecastResult, InsightsReport, RecurringPattern};
