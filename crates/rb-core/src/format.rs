//! Canonical text for dice expressions and roll breakdowns.

use crate::dice::DiceGroupSpec;
use crate::roll::Roll;

/// Render groups and a modifier as the canonical expression.
///
/// Groups render as `<count><label>` joined by `" + "`. A positive modifier
/// appends `" + n"`, a negative one `" - |n|"`, zero appends nothing. With no
/// groups the modifier stands alone as a signed number (`"3"`, `"-2"`), and
/// `([], 0)` is the empty string.
pub fn format_expression(groups: &[DiceGroupSpec], modifier: i32) -> String {
    let mut expression = groups
        .iter()
        .map(DiceGroupSpec::to_string)
        .collect::<Vec<_>>()
        .join(" + ");

    if modifier != 0 {
        if expression.is_empty() {
            expression = modifier.to_string();
        } else {
            let sign = if modifier > 0 { '+' } else { '-' };
            expression.push_str(&format!(" {sign} {}", modifier.unsigned_abs()));
        }
    }

    expression
}

/// Render the individual results of a roll, e.g. `D6: [3, 5] + D4: [2] +3`.
///
/// Labels are upper-cased; a nonzero modifier trails with an explicit sign.
pub fn describe_results(roll: &Roll) -> String {
    let mut out = roll
        .groups
        .iter()
        .map(|group| {
            let values: Vec<String> = group.results.iter().map(u32::to_string).collect();
            format!(
                "{}: [{}]",
                group.kind.label().to_uppercase(),
                values.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join(" + ");

    if roll.modifier != 0 {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("{:+}", roll.modifier));
    }

    out
}
