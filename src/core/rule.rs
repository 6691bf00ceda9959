use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use comfy_table::Color;
use serde::{Deserialize, Serialize};

use crate::core::provider::Provider;

/// One tariff schedule record.
///
/// The rule marks a transition: its state holds from [`Rule::start_time`] until the start time
/// of the next rule of the same day.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    pub provider: Provider,
    pub applies_to: AppliesTo,
    pub start_time: NaiveTime,

    /// Recorded with the rule, but never consulted by the resolution.
    pub end_time: NaiveTime,

    pub is_peak: bool,
}

impl Rule {
    pub const fn period(&self) -> Period {
        Period::from_is_peak(self.is_peak)
    }

    #[must_use]
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match self.applies_to {
            AppliesTo::DayOfWeek(weekday) => weekday == date.weekday(),
            AppliesTo::SpecificDate(specific_date) => specific_date == date,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AppliesTo {
    /// Recurs every week.
    DayOfWeek(Weekday),

    /// One-time override, for example a public holiday.
    SpecificDate(NaiveDate),
}

impl AppliesTo {
    #[must_use]
    pub const fn is_specific_date(self) -> bool {
        matches!(self, Self::SpecificDate(_))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Period {
    #[display("On-peak")]
    #[serde(rename = "ON_PEAK")]
    OnPeak,

    #[display("Off-peak")]
    #[serde(rename = "OFF_PEAK")]
    OffPeak,
}

impl Period {
    pub const fn from_is_peak(is_peak: bool) -> Self {
        if is_peak { Self::OnPeak } else { Self::OffPeak }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::OnPeak => Color::Red,
            Self::OffPeak => Color::Green,
        }
    }
}

impl From<bool> for Period {
    fn from(is_peak: bool) -> Self {
        Self::from_is_peak(is_peak)
    }
}
