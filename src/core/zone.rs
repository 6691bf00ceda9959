use chrono::{
    DateTime,
    LocalResult,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    Offset,
    TimeDelta,
    TimeZone,
};
use chrono_tz::Tz;

/// The single time zone in which calendar days, weekdays, and rule start times are interpreted.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::From)]
pub struct OperatingZone(Tz);

impl Default for OperatingZone {
    fn default() -> Self {
        Self(chrono_tz::Asia::Bangkok)
    }
}

impl OperatingZone {
    pub fn localize<Z: TimeZone>(self, instant: &DateTime<Z>) -> DateTime<Tz> {
        instant.with_timezone(&self.0)
    }

    /// Calendar day of the instant as seen in the zone.
    #[must_use]
    pub fn civil_date<Z: TimeZone>(self, instant: &DateTime<Z>) -> NaiveDate {
        self.localize(instant).date_naive()
    }

    /// Combine the civil date and the time of day into an instant.
    ///
    /// Ambiguous local times resolve to the earlier instant. Local times skipped by a forward
    /// transition are shifted forward by the length of the gap.
    pub fn anchor(self, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
        let local = date.and_time(time);
        match self.0.from_local_datetime(&local) {
            LocalResult::Single(instant) | LocalResult::Ambiguous(instant, _) => instant,
            LocalResult::None => self.anchor_in_gap(local),
        }
    }

    fn anchor_in_gap(self, local: NaiveDateTime) -> DateTime<Tz> {
        // Gaps never span a whole day, so the offset a day earlier is the one before the gap:
        let offset = self.0.offset_from_utc_datetime(&(local - TimeDelta::days(1))).fix();
        let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
        self.0.from_utc_datetime(&utc)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike, Utc, Weekday};

    use super::*;

    #[test]
    fn test_civil_date_crosses_utc_midnight() {
        let zone = OperatingZone::default();

        // 20:00 UTC on Wednesday is already 03:00 on Thursday in Bangkok:
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 20, 0, 0).unwrap();
        let date = zone.civil_date(&instant);
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(date.weekday(), Weekday::Thu);
        assert_ne!(instant.date_naive(), date);
    }

    #[test]
    fn test_anchor_uses_zone_offset() {
        let zone = OperatingZone::default();
        let anchored = zone.anchor(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), NaiveTime::MIN);
        assert_eq!(anchored, Utc.with_ymd_and_hms(2024, 12, 31, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_anchor_in_gap_shifts_forward() {
        let zone = OperatingZone::from(chrono_tz::Europe::Amsterdam);

        // 02:30 does not exist on the spring-forward night:
        let anchored = zone.anchor(
            NaiveDate::from_ymd_opt(2025, 3, 30).unwrap(),
            NaiveTime::from_hms_opt(2, 30, 0).unwrap(),
        );
        assert_eq!(anchored.hour(), 3);
        assert_eq!(anchored.minute(), 30);
        assert_eq!(anchored, Utc.with_ymd_and_hms(2025, 3, 30, 1, 30, 0).unwrap());
    }

    #[test]
    fn test_anchor_in_fold_takes_earlier() {
        let zone = OperatingZone::from(chrono_tz::Europe::Amsterdam);

        // 02:30 occurs twice on the fall-back night:
        let anchored = zone.anchor(
            NaiveDate::from_ymd_opt(2025, 10, 26).unwrap(),
            NaiveTime::from_hms_opt(2, 30, 0).unwrap(),
        );
        assert_eq!(anchored, Utc.with_ymd_and_hms(2025, 10, 26, 0, 30, 0).unwrap());
    }
}
