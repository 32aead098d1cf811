//! History and one-shot analysis commands.

use crate::analysis::{Analyzer, TEXT_REQUIRED, validate_text};
use crate::db::HistoryStore;
use crate::history::SentimentRecord;

/// Print up to `limit` recent records, newest first.
pub async fn run_history_command(store: &dyn HistoryStore, limit: usize) -> anyhow::Result<()> {
    let records = store.recent(limit).await?;
    if records.is_empty() {
        println!("No sentiment records yet.");
        return Ok(());
    }
    for record in &records {
        println!("{}", format_record(record));
    }
    Ok(())
}

/// Validate, classify, and record `text`, printing the result as JSON.
pub async fn run_analyze_command(analyzer: &Analyzer, text: &str) -> anyhow::Result<()> {
    let text = validate_text(text, TEXT_REQUIRED)?;
    let sentiment = analyzer.analyze(text).await?;
    println!("{}", serde_json::to_string_pretty(&sentiment)?);
    Ok(())
}

fn format_record(record: &SentimentRecord) -> String {
    format!(
        "{}  {:<8} {:>7}%  {}",
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        record.result.label,
        record.result.percent(),
        preview(&record.text, 60)
    )
}

/// Single-line preview of `text`, at most `max` characters.
fn preview(text: &str, max: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}
