//! Statement import preview and category suggestion commands

use anyhow::Result;
use std::path::Path;

use bolso_core::import::{categorize_all, parse_statement, suggest_category, DEFAULT_CATEGORY};

use super::read_statement;

/// Parse a statement file and print the normalized transactions with their
/// suggested categories. Nothing is persisted; this is a preview of what a
/// bulk insert would receive.
pub fn cmd_import(file: &Path, json: bool) -> Result<()> {
    let (content, filename) = read_statement(file)?;
    let report = parse_statement(&content, &filename)?;
    let (categorized, skipped) = categorize_all(report);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "transactions": categorized,
                "skipped": skipped,
            }))?
        );
        return Ok(());
    }

    println!(
        "{} transações importadas, {} linhas ignoradas\n",
        categorized.len(),
        skipped
    );
    println!(
        "{:<12} {:>12}  {:<8} {:<14} {}",
        "Data", "Valor", "Tipo", "Categoria", "Descrição"
    );

    for item in &categorized {
        let tx = &item.transaction;
        println!(
            "{:<12} {:>12.2}  {:<8} {:<14} {}",
            tx.date.format("%d/%m/%Y"),
            tx.amount,
            tx.kind,
            item.suggested_category.unwrap_or(DEFAULT_CATEGORY),
            tx.description
        );
    }

    Ok(())
}

/// Suggest a category for a free-text description.
pub fn cmd_categorize(description: &str, json: bool) -> Result<()> {
    let suggestion = suggest_category(description);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "description": description,
                "category": suggestion,
            }))?
        );
        return Ok(());
    }

    match suggestion {
        Some(category) => println!("{}", category),
        None => println!("{} (nenhuma regra correspondeu)", DEFAULT_CATEGORY),
    }

    Ok(())
}
