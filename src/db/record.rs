use chrono::{DateTime, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    core::{
        provider::Provider,
        rule::{AppliesTo, Rule},
        zone::OperatingZone,
    },
    prelude::*,
};

/// Day numbering of the stored records, starting from Sunday.
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const TIME_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Flat rule record as kept by the rule store.
#[skip_serializing_none]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    pub provider: String,

    /// `0` is Sunday, `6` is Saturday.
    pub day_of_week: Option<i64>,

    /// `YYYY-MM-DD`, or an RFC 3339 timestamp.
    pub specific_date: Option<String>,

    /// `HH:MM`.
    pub start_time: String,

    /// `HH:MM`.
    pub end_time: String,

    pub is_peak: bool,
}

impl RuleRecord {
    /// Validate the record.
    ///
    /// Timestamps in `specificDate` are converted to the zone before taking the date.
    pub fn to_rule(&self, zone: OperatingZone) -> Result<Rule> {
        let provider: Provider = self.provider.parse()?;
        let applies_to = match (self.day_of_week, &self.specific_date) {
            (Some(day_of_week), None) => AppliesTo::DayOfWeek(parse_weekday(day_of_week)?),
            (None, Some(specific_date)) => {
                AppliesTo::SpecificDate(parse_date(specific_date, zone)?)
            }
            (Some(_), Some(_)) => bail!("both `dayOfWeek` and `specificDate` are set"),
            (None, None) => bail!("neither `dayOfWeek` nor `specificDate` is set"),
        };
        Ok(Rule {
            provider,
            applies_to,
            start_time: parse_time(&self.start_time).context("invalid `startTime`")?,
            end_time: parse_time(&self.end_time).context("invalid `endTime`")?,
            is_peak: self.is_peak,
        })
    }
}

impl From<&Rule> for RuleRecord {
    fn from(rule: &Rule) -> Self {
        let (day_of_week, specific_date) = match rule.applies_to {
            AppliesTo::DayOfWeek(weekday) => {
                (Some(i64::from(weekday.num_days_from_sunday())), None)
            }
            AppliesTo::SpecificDate(date) => (None, Some(date.format(DATE_FORMAT).to_string())),
        };
        Self {
            provider: rule.provider.to_string(),
            day_of_week,
            specific_date,
            start_time: rule.start_time.format(TIME_FORMAT).to_string(),
            end_time: rule.end_time.format(TIME_FORMAT).to_string(),
            is_peak: rule.is_peak,
        }
    }
}

fn parse_weekday(day_of_week: i64) -> Result<Weekday> {
    usize::try_from(day_of_week)
        .ok()
        .and_then(|index| WEEKDAYS.get(index))
        .copied()
        .with_context(|| format!("`dayOfWeek` must be within 0..=6, got {day_of_week}"))
}

fn parse_date(value: &str, zone: OperatingZone) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    let timestamp = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("invalid `specificDate`: `{value}`"))?;
    Ok(zone.civil_date(&timestamp))
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .with_context(|| format!("`{value}` is not `HH:MM`"))
}
