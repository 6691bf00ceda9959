use chrono::{DateTime, Days, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::core::{
    provider::Provider,
    rule::{Period, Rule},
    selector::select_day_rules,
    zone::OperatingZone,
};

/// How many days after today are searched for the next transition.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::From)]
#[display("{_0} day(s)")]
pub struct Horizon(u32);

impl Default for Horizon {
    /// Today and tomorrow.
    fn default() -> Self {
        Self(1)
    }
}

impl Horizon {
    #[must_use]
    pub const fn days(self) -> u32 {
        self.0
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    /// Instant when the new period begins.
    pub at: DateTime<Tz>,

    /// The period that begins.
    pub period: Period,

    /// Time left until the transition.
    pub time_left: TimeDelta,
}

impl Transition {
    fn new<Z: TimeZone>(at: DateTime<Tz>, rule: &Rule, now: &DateTime<Z>) -> Self {
        Self { at, period: rule.period(), time_left: at.signed_duration_since(now) }
    }

    /// Whole seconds until the transition.
    #[must_use]
    pub fn seconds_left(&self) -> i64 {
        self.time_left.num_seconds()
    }
}

/// Find the next change away from `current_is_peak`.
///
/// Today's later rules are searched first. After that, each following day within the horizon
/// is searched for its first rule with the opposite state, regardless of its position.
/// Of the rules sharing a start time, only the last one is considered, as in the evaluation.
/// [`None`] means the next change is unknown within the horizon, not that it never happens.
pub fn next_transition<Z: TimeZone>(
    rules: &[Rule],
    provider: Provider,
    zone: OperatingZone,
    now: &DateTime<Z>,
    current_is_peak: bool,
    horizon: Horizon,
) -> Option<Transition> {
    let today = zone.civil_date(now);

    let later_today = select_day_rules(rules, provider, today).effective().find_map(|rule| {
        let at = zone.anchor(today, rule.start_time);
        (at > *now && rule.is_peak != current_is_peak).then(|| Transition::new(at, rule, now))
    });
    if later_today.is_some() {
        return later_today;
    }

    (1..=horizon.days())
        .map_while(|offset| today.checked_add_days(Days::new(u64::from(offset))))
        .find_map(|date| {
            select_day_rules(rules, provider, date)
                .effective()
                .find(|rule| rule.is_peak != current_is_peak)
                .map(|rule| Transition::new(zone.anchor(date, rule.start_time), rule, now))
        })
}
