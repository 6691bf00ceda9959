use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{
    rule::{AppliesTo, Rule},
    status::Status,
};

pub fn build_status_table(status: &Status) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Provider", "Now", "Period", "Next", "Changes at", "Time left"]);

    let (next, changes_at, time_left) = match status.transition {
        Some(transition) => (
            Cell::new(transition.period).fg(transition.period.color()),
            Cell::new(transition.at.format("%a %b %d %H:%M")),
            Cell::new(
                transition
                    .time_left
                    .to_std()
                    .map_or_else(|_| "now".to_string(), |left| format_countdown(left).to_string()),
            )
            .set_alignment(CellAlignment::Right),
        ),
        None => (
            Cell::new("Unknown").add_attribute(Attribute::Dim),
            Cell::new("-").add_attribute(Attribute::Dim),
            Cell::new("-").add_attribute(Attribute::Dim).set_alignment(CellAlignment::Right),
        ),
    };
    table.add_row(vec![
        Cell::new(status.provider),
        Cell::new(status.now.format("%a %b %d %H:%M:%S %Z")).add_attribute(Attribute::Dim),
        Cell::new(status.period()).fg(status.period().color()),
        next,
        changes_at,
        time_left,
    ]);
    table
}

pub fn build_rules_table<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Provider", "Applies to", "Start", "End", "Period"]);
    for rule in rules {
        let applies_to = match rule.applies_to {
            AppliesTo::DayOfWeek(weekday) => Cell::new(weekday),
            AppliesTo::SpecificDate(date) => {
                Cell::new(date.format("%Y-%m-%d")).fg(Color::DarkYellow)
            }
        };
        table.add_row(vec![
            Cell::new(rule.provider),
            applies_to,
            Cell::new(rule.start_time.format("%H:%M")),
            Cell::new(rule.end_time.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(rule.period()).fg(rule.period().color()),
        ]);
    }
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Whole-second countdown, like `1h 30m 5s`.
fn format_countdown(left: std::time::Duration) -> humantime::FormattedDuration {
    humantime::format_duration(std::time::Duration::from_secs(left.as_secs()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_format_countdown_drops_fraction() {
        let left = Duration::from_millis(5_400_500);
        assert_eq!(format_countdown(left).to_string(), "1h 30m");
    }
}
