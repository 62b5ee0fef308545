//! Domain models for Bolso

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or subtracts from the balance.
///
/// Amounts are stored as magnitudes; the type carries the sign semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Derive the type from a signed source amount: negative means expense.
    pub fn from_signed_amount(amount: f64) -> Self {
        if amount < 0.0 {
            Self::Expense
        } else {
            Self::Income
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction as supplied by the external repository.
///
/// The engine never mutates or persists these; every analysis is a pure
/// function of the slice it receives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Magnitude of the transaction; `kind` carries the sign semantics.
    /// Defensive `abs()` is still applied wherever amounts are aggregated.
    pub amount: f64,
    pub description: String,
    /// Calendar timestamp. No timezone semantics beyond same-day and
    /// sub-day delta comparisons.
    pub date: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_id: Option<String>,
}

/// Recurrence cadence for detected payment patterns.
///
/// Labels are the pt-BR strings the original product surfaces to users.
/// Only `Monthly` is currently emitted by the pattern detector; weekly and
/// yearly cadences are modeled for the label table but unimplemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// User-facing label, pt-BR.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Semanal",
            Self::Monthly => "Mensal",
            Self::Yearly => "Anual",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_type_from_signed_amount() {
        assert_eq!(
            TransactionType::from_signed_amount(-15.50),
            TransactionType::Expense
        );
        assert_eq!(
            TransactionType::from_signed_amount(100.0),
            TransactionType::Income
        );
        // Zero is not an expense
        assert_eq!(
            TransactionType::from_signed_amount(0.0),
            TransactionType::Income
        );
    }

    #[test]
    fn test_transaction_type_roundtrip() {
        assert_eq!(
            TransactionType::from_str("EXPENSE").unwrap(),
            TransactionType::Expense
        );
        assert_eq!(TransactionType::Income.as_str(), "INCOME");
    }

    #[test]
    fn test_frequency_labels() {
        assert_eq!(Frequency::Monthly.label(), "Mensal");
        assert_eq!(Frequency::Weekly.label(), "Semanal");
        assert_eq!(Frequency::Yearly.label(), "Anual");
    }

    #[test]
    fn test_transaction_serde_uses_wire_names() {
        let tx = Transaction {
            id: "t1".to_string(),
            amount: 12.5,
            description: "Padaria".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            kind: TransactionType::Expense,
            category_id: None,
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "EXPENSE");
    }
}
