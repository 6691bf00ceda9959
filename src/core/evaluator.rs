use chrono::{DateTime, TimeZone};

use crate::core::{selector::DaySchedule, zone::OperatingZone};

/// Tariff state at `now`, given the schedule of `now`'s calendar day.
///
/// The day's rules form a step function: the most recent rule that has started wins.
/// Before the first rule, and on a day without rules, the state is off-peak.
#[must_use]
pub fn current_state<Z: TimeZone>(
    day: &DaySchedule,
    zone: OperatingZone,
    now: &DateTime<Z>,
) -> bool {
    let date = zone.civil_date(now);
    day.effective()
        .filter(|rule| zone.anchor(date, rule.start_time) <= *now)
        .last()
        .is_some_and(|rule| rule.is_peak)
}
