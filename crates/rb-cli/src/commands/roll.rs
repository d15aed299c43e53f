use std::collections::BTreeMap;

use rb_core::selection::MAX_COUNT;
use rb_core::{DiceGroupSpec, DiceKind, DiceSelection, is_predefined};
use tracing::debug;

use super::Session;

pub async fn quick(
    session: &mut Session,
    die: &str,
    count: u32,
    modifier: i32,
) -> Result<(), String> {
    let kind = DiceKind::parse(die).map_err(|e| e.to_string())?;
    let roll = session.generator.roll_single(kind, count, modifier);
    session.record(roll).await;
    Ok(())
}

pub async fn multi(session: &mut Session, dice: &[String], modifier: i32) -> Result<(), String> {
    let mut selection = DiceSelection::new();
    let mut requested: BTreeMap<DiceKind, u64> = BTreeMap::new();
    for token in dice {
        let spec = DiceGroupSpec::parse(token).map_err(|e| e.to_string())?;
        selection.add(spec.kind, i64::from(spec.count));
        *requested.entry(spec.kind).or_default() += u64::from(spec.count);
    }

    for (kind, wanted) in requested {
        if wanted > u64::from(MAX_COUNT) {
            debug!(%kind, wanted, "dice count capped");
            eprintln!("  note: {wanted}{kind} capped at {MAX_COUNT}{kind}");
        }
    }

    if !selection.has_active() {
        return Err("select at least one die".into());
    }

    let specs = selection.active();
    let user = session.user_presets();
    let custom = !is_predefined(&specs, modifier, &session.catalog, &user);
    let roll = session.generator.roll_multiple(&specs, modifier, custom);
    session.record(roll).await;
    Ok(())
}
