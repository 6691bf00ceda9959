use bon::Builder;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    core::{
        evaluator::current_state,
        provider::Provider,
        rule::{Period, Rule},
        scanner::{Horizon, Transition, next_transition},
        selector::{DaySchedule, select_day_rules},
        zone::OperatingZone,
    },
    prelude::*,
};

#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct StatusQuery<'a> {
    /// All known rules, other providers' rules are ignored.
    rules: &'a [Rule],

    provider: Provider,
    now: DateTime<Utc>,

    #[builder(default)]
    zone: OperatingZone,

    #[builder(default)]
    horizon: Horizon,
}

impl<S: status_query_builder::IsComplete> StatusQueryBuilder<'_, S> {
    pub fn resolve(self) -> Status {
        self.build().resolve()
    }
}

impl StatusQuery<'_> {
    #[instrument(skip_all, fields(provider = %self.provider, now = %self.now))]
    fn resolve(self) -> Status {
        let now = self.zone.localize(&self.now);
        let today = select_day_rules(self.rules, self.provider, now.date_naive());
        let is_peak = current_state(&today, self.zone, &now);
        let transition =
            next_transition(self.rules, self.provider, self.zone, &now, is_peak, self.horizon);
        debug!(n_rules = today.len(), is_peak, ?transition, "resolved");
        Status { provider: self.provider, now, is_peak, transition, today }
    }
}

/// Tariff status of a provider at one instant.
#[must_use]
pub struct Status {
    pub provider: Provider,

    /// Evaluation instant in the operating zone.
    pub now: DateTime<Tz>,

    pub is_peak: bool,

    /// Next change, if one is known within the horizon.
    pub transition: Option<Transition>,

    /// Rules in force for the evaluation day.
    pub today: DaySchedule,
}

impl Status {
    /// Reported instead of the countdown when the next change is unknown.
    pub const NO_KNOWN_CHANGE: i64 = -1;

    pub const fn period(&self) -> Period {
        Period::from_is_peak(self.is_peak)
    }

    /// Whole seconds until the next change, or [`Self::NO_KNOWN_CHANGE`].
    #[must_use]
    pub fn time_to_next_change_seconds(&self) -> i64 {
        self.transition.map_or(Self::NO_KNOWN_CHANGE, |transition| transition.seconds_left())
    }

    /// The upcoming period, or the current one when no change is known.
    pub fn next_period(&self) -> Period {
        self.transition.map_or_else(|| self.period(), |transition| transition.period)
    }
}
