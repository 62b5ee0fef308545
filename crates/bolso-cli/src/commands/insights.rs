//! Insights command: run the analysis engine over an imported statement

use anyhow::Result;
use std::path::Path;

use bolso_core::{
    import::parse_statement,
    insights::{within_last_days, InsightEngine},
    models::Transaction,
};

use super::read_statement;

/// Import a statement file and run the full insights analysis over it.
///
/// This stands in for the repository-backed flow: in the app the engine
/// receives the user's stored history, here it receives whatever the
/// statement contains. The lookback window is anchored to the newest entry
/// in the file, not the wall clock, so historical statements still analyze.
pub fn cmd_insights(file: &Path, months: u32, json: bool) -> Result<()> {
    let (content, filename) = read_statement(file)?;
    let report = parse_statement(&content, &filename)?;

    let transactions: Vec<Transaction> = report
        .transactions
        .into_iter()
        .map(|t| t.into_transaction())
        .collect();

    let Some(reference) = transactions.iter().map(|t| t.date).max() else {
        anyhow::bail!("No transactions found in {}", file.display());
    };
    let window = within_last_days(&transactions, reference, i64::from(months) * 30);

    let engine = InsightEngine::new();
    let insights = engine.analyze_at(&window, reference);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!("Previsão de gastos");
    println!(
        "  próximo mês: R$ {:.2}  tendência: {:+.2}/mês  confiança: {:.0}%",
        insights.forecast.next_value,
        insights.forecast.slope,
        insights.forecast.confidence * 100.0
    );

    if !insights.anomalies.is_empty() {
        println!("\nAnomalias ({})", insights.anomalies.len());
        for anomaly in &insights.anomalies {
            println!(
                "  [{}] {} (score {:.1}): {}",
                anomaly.kind, anomaly.transaction_id, anomaly.score, anomaly.details
            );
        }
    }

    if !insights.recurring.is_empty() {
        println!("\nAssinaturas prováveis ({})", insights.recurring.len());
        for pattern in &insights.recurring {
            println!(
                "  {} - R$ {:.2} ({}), próxima em {} (confiança {:.0}%)",
                pattern.description,
                pattern.avg_amount,
                pattern.frequency.label(),
                pattern.next_potential_date.format("%d/%m/%Y"),
                pattern.confidence * 100.0
            );
        }
    }

    if !insights.tips.is_empty() {
        println!();
        for tip in &insights.tips {
            println!("{}", tip);
        }
    }

    Ok(())
}
