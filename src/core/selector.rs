use chrono::NaiveDate;
use itertools::Itertools;

use crate::core::{provider::Provider, rule::Rule};

/// Rules in force for one calendar day, ordered by start time.
#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq, derive_more::AsRef, derive_more::IntoIterator)]
pub struct DaySchedule(#[into_iterator(owned, ref)] Vec<Rule>);

impl DaySchedule {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    /// Rules that actually take effect: of those sharing a start time, only the last one.
    pub fn effective(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter().coalesce(|previous, next| {
            if previous.start_time == next.start_time { Ok(next) } else { Err((previous, next)) }
        })
    }

    /// Whether the day is governed by a specific-date override.
    #[must_use]
    pub fn is_override(&self) -> bool {
        self.0.iter().any(|rule| rule.applies_to.is_specific_date())
    }
}

/// Select the rules of the provider that are effective on the date.
///
/// Specific-date rules replace the weekday rules entirely. Rules sharing a start time keep
/// their relative order from the input.
pub fn select_day_rules<'a>(
    rules: impl IntoIterator<Item = &'a Rule>,
    provider: Provider,
    date: NaiveDate,
) -> DaySchedule {
    let matched: Vec<Rule> = rules
        .into_iter()
        .filter(|rule| rule.provider == provider && rule.applies_on(date))
        .copied()
        .collect();
    let mut selected: Vec<Rule> = if matched.iter().any(|rule| rule.applies_to.is_specific_date())
    {
        matched.into_iter().filter(|rule| rule.applies_to.is_specific_date()).collect()
    } else {
        matched
    };
    selected.sort_by_key(|rule| rule.start_time);
    DaySchedule(selected)
}
