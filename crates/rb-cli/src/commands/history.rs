use chrono::Local;
use comfy_table::{ContentArrangement, Table};
use rb_core::describe_results;
use rb_store::{ActiveTier, Durability};

use super::Session;

pub fn show(session: &Session, limit: Option<usize>) -> Result<(), String> {
    let rolls = session.history.rolls();
    if rolls.is_empty() {
        println!("  No rolls yet. Roll some dice!");
        return Ok(());
    }

    let shown = limit.unwrap_or(rolls.len()).min(rolls.len());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Time", "Roll", "Total", "Dice"]);

    for (i, roll) in rolls.iter().take(shown).enumerate() {
        let time = roll
            .rolled_at()
            .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        let label = match &roll.name {
            Some(name) => format!("{name} ({})", roll.expression),
            None => roll.expression.clone(),
        };
        table.add_row(vec![
            (i + 1).to_string(),
            time,
            label,
            roll.total.to_string(),
            describe_results(roll),
        ]);
    }

    println!("{table}");
    println!();
    if shown < rolls.len() {
        println!("  {shown} of {} rolls", rolls.len());
    } else {
        println!("  {} rolls", rolls.len());
    }
    if session.history.active_tier() == Some(ActiveTier::Fallback) {
        println!("  (loaded from fallback storage)");
    }

    Ok(())
}

pub async fn reroll(session: &mut Session, index: usize) -> Result<(), String> {
    let original = session.nth(index)?.clone();
    let roll = session.generator.reroll(&original);
    session.record(roll).await;
    Ok(())
}

pub async fn clear(session: &mut Session) -> Result<(), String> {
    let count = session.history.len();
    let durability = session.history.clear().await;
    println!("  Cleared {count} rolls.");
    if durability == Durability::Volatile {
        eprintln!("  warning: stored history could not be removed");
    }
    Ok(())
}
