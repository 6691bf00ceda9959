use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::core::{
    provider::Provider,
    rule::{AppliesTo, Rule},
};

/// Public holidays of 2025, off-peak all day long.
const HOLIDAYS_2025: [(u32, u32); 17] = [
    (1, 1),
    (2, 12),
    (4, 7),
    (4, 13),
    (4, 14),
    (4, 15),
    (5, 1),
    (5, 5),
    (6, 3),
    (7, 28),
    (7, 29),
    (8, 12),
    (10, 13),
    (10, 23),
    (12, 5),
    (12, 10),
    (12, 31),
];

const PEAK_START: NaiveTime = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
const PEAK_END: NaiveTime = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
const LAST_MINUTE: NaiveTime = NaiveTime::from_hms_opt(23, 59, 0).unwrap();

const WORKING_DAYS: [Weekday; 5] =
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];

/// Default time-of-use tariff for both providers.
///
/// Working days are on-peak from 09:00 to 22:00. Weekends and public holidays are off-peak.
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    let midnight = NaiveTime::MIN;
    let mut rules = Vec::new();
    for provider in Provider::ALL {
        let rule = |applies_to, start_time, end_time, is_peak| Rule {
            provider,
            applies_to,
            start_time,
            end_time,
            is_peak,
        };
        for weekday in WORKING_DAYS {
            let applies_to = AppliesTo::DayOfWeek(weekday);
            rules.push(rule(applies_to, midnight, PEAK_START, false));
            rules.push(rule(applies_to, PEAK_START, PEAK_END, true));
            rules.push(rule(applies_to, PEAK_END, LAST_MINUTE, false));
        }
        for weekday in [Weekday::Sat, Weekday::Sun] {
            rules.push(rule(AppliesTo::DayOfWeek(weekday), midnight, LAST_MINUTE, false));
        }
        for date in HOLIDAYS_2025
            .into_iter()
            .filter_map(|(month, day)| NaiveDate::from_ymd_opt(2025, month, day))
        {
            rules.push(rule(AppliesTo::SpecificDate(date), midnight, LAST_MINUTE, false));
        }
    }
    rules
}
