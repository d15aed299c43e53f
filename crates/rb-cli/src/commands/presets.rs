use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rb_core::catalog::find_preset;
use rb_core::matcher::find_match;
use rb_core::{NamedRollPreset, format_expression};

use super::Session;

pub fn catalog(session: &Session, category: Option<&str>) -> Result<(), String> {
    let wanted = category.map(str::to_lowercase);
    let matches = |name: &str| wanted.as_deref().is_none_or(|w| name.to_lowercase() == w);

    let mut shown = 0;
    for cat in session.catalog.iter().filter(|c| matches(&c.name)) {
        print_category(&cat.name, &cat.rolls);
        shown += 1;
    }

    let user = session.user_presets();
    if !user.is_empty() && matches("custom") {
        print_category("Custom", &user);
        shown += 1;
    }

    if shown == 0 {
        return Err(match category {
            Some(name) => format!("no category named '{name}'"),
            None => "catalog is empty".to_string(),
        });
    }
    Ok(())
}

fn print_category(name: &str, presets: &[NamedRollPreset]) {
    println!("  {}", name.bold());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Dice", "Notes"]);
    for preset in presets {
        table.add_row(vec![
            preset.name.clone(),
            format_expression(&preset.dice, preset.modifier),
            preset.description.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
    println!();
}

pub async fn roll(session: &mut Session, name: &str) -> Result<(), String> {
    let preset = match find_preset(&session.catalog, name) {
        Ok(preset) => preset.clone(),
        Err(e) => session
            .user_presets()
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| e.to_string())?,
    };

    let mut roll = session.generator.roll_preset(&preset);
    roll.is_custom = Some(false);
    session.record(roll).await;
    Ok(())
}

pub fn save(
    session: &Session,
    name: &str,
    from: usize,
    description: Option<String>,
) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("preset name cannot be empty".into());
    }

    let roll = session.nth(from)?;
    let user = session.user_presets();
    if let Some(existing) = find_match(&roll.specs(), roll.modifier, &session.catalog, &user) {
        println!("  Note: same dice as existing preset '{}'", existing.name);
    }
    if user.iter().any(|p| p.name == name) {
        println!("  Note: another saved roll is already named '{name}'");
    }

    let mut preset = NamedRollPreset::new(name, roll.specs(), roll.modifier);
    preset.description = description;
    let expression = roll.expression.clone();

    if !session.named.save(preset) {
        return Err("could not write saved rolls".into());
    }
    println!("  Saved '{name}' ({expression})");
    Ok(())
}

pub fn delete(session: &Session, name: &str) -> Result<(), String> {
    match session.named.delete(name) {
        0 => Err(format!("no saved roll named '{name}'")),
        1 => {
            println!("  Deleted '{name}'");
            Ok(())
        }
        n => {
            println!("  Deleted {n} saved rolls named '{name}'");
            Ok(())
        }
    }
}
