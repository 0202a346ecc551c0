use std::fmt;

use jiff::{
    Timestamp,
    civil::{Date, DateTime, Weekday},
    tz::{Offset, TimeZone},
};
use nom::{IResult, Parser, character::complete::char, sequence::terminated};
use tracing::{trace, warn};

use crate::units::nom_digits;

/// The `DDHHMMZ` stamp of a report. Year and month are not transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTime {
    pub day: i8,
    pub hour: i8,
    pub minute: i8,
}

pub(crate) fn nom_metar_timestamp(input: &str) -> IResult<&str, DayTime> {
    terminated(
        (
            nom_digits::<i8>(2, 2),
            nom_digits::<i8>(2, 2),
            nom_digits::<i8>(2, 2),
        ),
        char('Z'),
    )
    .map(|(day, hour, minute)| DayTime { day, hour, minute })
    .parse(input)
}

/// Observation time in UTC and in Spanish peninsular local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTime {
    pub utc: DateTime,
    pub local: DateTime,
    pub offset_hours: i8,
}

impl ReportTime {
    pub fn resolve(day_time: DayTime, now: Timestamp) -> Option<Self> {
        let Some(instant) = resolve_day_time(day_time, now) else {
            warn!(
                day = day_time.day,
                hour = day_time.hour,
                minute = day_time.minute,
                "Report day/time does not fit the previous, current or next month"
            );
            return None;
        };
        let offset_hours = spain_utc_offset(instant);
        let local = instant
            .to_zoned(TimeZone::fixed(Offset::constant(offset_hours)))
            .datetime();
        Some(Self {
            utc: instant.to_zoned(TimeZone::UTC).datetime(),
            local,
            offset_hours,
        })
    }
}

impl fmt::Display for ReportTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Día {:02} a las {:02}.{:02} UTC (España: día {:02} a las {:02}.{:02}, GMT+{})",
            self.utc.day(),
            self.utc.hour(),
            self.utc.minute(),
            self.local.day(),
            self.local.hour(),
            self.local.minute(),
            self.offset_hours,
        )
    }
}

/// Places the stamp in the previous, current or next month, whichever gives
/// the instant closest to `now`. The earlier candidate wins a tie.
pub fn resolve_day_time(day_time: DayTime, now: Timestamp) -> Option<Timestamp> {
    let today = now.to_zoned(TimeZone::UTC);
    let (year, month) = (today.year(), today.month());

    [-1, 0, 1]
        .into_iter()
        .filter_map(|shift| {
            let (year, month) = shift_month(year, month, shift);
            let days_in_month = Date::new(year, month, 1).ok()?.days_in_month();
            if day_time.day > days_in_month {
                return None;
            }
            DateTime::new(
                year,
                month,
                day_time.day,
                day_time.hour,
                day_time.minute,
                0,
                0,
            )
            .and_then(|dt| dt.to_zoned(TimeZone::UTC))
            .map(|zoned| zoned.timestamp())
            .ok()
        })
        .inspect(|candidate| trace!(%candidate, "Report time candidate"))
        .min_by_key(|candidate| (candidate.as_second() - now.as_second()).abs())
}

fn shift_month(year: i16, month: i8, shift: i8) -> (i16, i8) {
    let index = i16::from(month) - 1 + i16::from(shift);
    (year + index.div_euclid(12), (index.rem_euclid(12) + 1) as i8)
}

pub fn last_sunday(year: i16, month: i8) -> Result<Date, jiff::Error> {
    let mut candidate = Date::new(year, month, 1)?.last_of_month();
    while candidate.weekday() != Weekday::Sunday {
        candidate = candidate.yesterday()?;
    }
    Ok(candidate)
}

/// Hours ahead of UTC for peninsular Spain: +2 from 01:00 UTC on the last
/// Sunday of March until 01:00 UTC on the last Sunday of October, +1 otherwise.
pub fn spain_utc_offset(instant: Timestamp) -> i8 {
    let year = instant.to_zoned(TimeZone::UTC).year();
    let change_at = |month| -> Result<Timestamp, jiff::Error> {
        last_sunday(year, month)?
            .at(1, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .map(|zoned| zoned.timestamp())
    };
    match (change_at(3), change_at(10)) {
        (Ok(start), Ok(end)) if start <= instant && instant < end => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use tracing_test::traced_test;

    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn day_time(day: i8, hour: i8, minute: i8) -> DayTime {
        DayTime { day, hour, minute }
    }

    #[test]
    fn test_nom_metar_timestamp() {
        assert_eq!(nom_metar_timestamp("121430Z"), Ok(("", day_time(12, 14, 30))));
        assert!(nom_metar_timestamp("121430").is_err());
        assert!(nom_metar_timestamp("12143Z").is_err());
    }

    #[test]
    fn test_last_sunday() {
        assert_eq!(last_sunday(2024, 3).unwrap(), date(2024, 3, 31));
        assert_eq!(last_sunday(2024, 10).unwrap(), date(2024, 10, 27));
        assert_eq!(last_sunday(2026, 3).unwrap(), date(2026, 3, 29));
        assert_eq!(last_sunday(2026, 10).unwrap(), date(2026, 10, 25));
    }

    #[test]
    fn test_spain_utc_offset_boundaries() {
        assert_eq!(spain_utc_offset(ts("2024-03-31T00:59:00Z")), 1);
        assert_eq!(spain_utc_offset(ts("2024-03-31T01:00:00Z")), 2);
        assert_eq!(spain_utc_offset(ts("2024-07-15T12:00:00Z")), 2);
        assert_eq!(spain_utc_offset(ts("2024-10-27T00:59:00Z")), 2);
        assert_eq!(spain_utc_offset(ts("2024-10-27T01:00:00Z")), 1);
        assert_eq!(spain_utc_offset(ts("2024-12-24T18:00:00Z")), 1);
    }

    #[test]
    fn test_resolve_same_month() {
        let now = ts("2024-07-12T15:00:00Z");
        assert_eq!(
            resolve_day_time(day_time(12, 14, 0), now),
            Some(ts("2024-07-12T14:00:00Z"))
        );
    }

    #[test]
    fn test_resolve_previous_month() {
        let now = ts("2024-03-01T00:30:00Z");
        assert_eq!(
            resolve_day_time(day_time(29, 23, 0), now),
            Some(ts("2024-02-29T23:00:00Z"))
        );
    }

    #[test]
    fn test_resolve_next_month() {
        let now = ts("2024-12-31T23:50:00Z");
        assert_eq!(
            resolve_day_time(day_time(1, 0, 0), now),
            Some(ts("2025-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_resolve_skips_months_without_the_day() {
        let now = ts("2024-05-01T00:10:00Z");
        assert_eq!(
            resolve_day_time(day_time(31, 23, 50), now),
            Some(ts("2024-05-31T23:50:00Z"))
        );
        let now = ts("2024-04-01T00:10:00Z");
        assert_eq!(
            resolve_day_time(day_time(31, 23, 50), now),
            Some(ts("2024-03-31T23:50:00Z"))
        );
    }

    #[test]
    fn test_resolve_invalid_stamp() {
        let now = ts("2024-07-12T15:00:00Z");
        assert_eq!(resolve_day_time(day_time(0, 12, 0), now), None);
        assert_eq!(resolve_day_time(day_time(12, 25, 0), now), None);
        assert_eq!(resolve_day_time(day_time(12, 10, 61), now), None);
    }

    #[test]
    fn test_report_time_sentence() {
        let summer = ReportTime::resolve(day_time(12, 14, 0), ts("2024-07-12T15:00:00Z")).unwrap();
        assert_eq!(
            summer.to_string(),
            "Día 12 a las 14.00 UTC (España: día 12 a las 16.00, GMT+2)"
        );
        let winter = ReportTime::resolve(day_time(12, 23, 30), ts("2024-01-12T23:40:00Z")).unwrap();
        assert_eq!(
            winter.to_string(),
            "Día 12 a las 23.30 UTC (España: día 13 a las 00.30, GMT+1)"
        );
    }

    #[test]
    #[traced_test]
    fn test_unresolvable_stamp_is_logged() {
        assert_eq!(
            ReportTime::resolve(day_time(40, 10, 0), ts("2024-07-12T15:00:00Z")),
            None
        );
        assert!(logs_contain("does not fit the previous, current or next month"));
    }
}
