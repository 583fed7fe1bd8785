//! Shift window arithmetic: parsing requirement dates and times, whole-hour
//! durations, and overlap checks between booked shifts.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

use crate::config::OvernightPolicy;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Errors raised while interpreting shift dates and times.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftError {
    #[error("Invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid time {0:?} (expected HH:MM)")]
    InvalidTime(String),
    #[error("Shift {start}-{end} crosses midnight")]
    Overnight { start: String, end: String },
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ShiftError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ShiftError::InvalidDate(s.to_string()))
}

pub fn parse_time(s: &str) -> Result<NaiveTime, ShiftError> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
        .map_err(|_| ShiftError::InvalidTime(s.to_string()))
}

/// A shift crosses midnight when it ends before it starts, minutes included.
#[inline]
pub fn is_overnight(start: NaiveTime, end: NaiveTime) -> bool {
    end < start
}

/// Whole hours between two hour-of-day values.
///
/// Only the hour component counts: 10:30-18:00 is 8 hours. A shift that
/// crosses midnight is either rejected or wrapped into the next day.
pub fn shift_hours(
    start: NaiveTime,
    end: NaiveTime,
    policy: OvernightPolicy,
) -> Result<u32, ShiftError> {
    let (start_hour, end_hour) = (start.hour(), end.hour());
    if !is_overnight(start, end) {
        return Ok(end_hour - start_hour);
    }
    match policy {
        OvernightPolicy::Wrap => Ok(end_hour + 24 - start_hour),
        OvernightPolicy::Reject => Err(ShiftError::Overnight {
            start: start.format(TIME_FORMAT).to_string(),
            end: end.format(TIME_FORMAT).to_string(),
        }),
    }
}

/// A concrete shift on the calendar, used for double-booking checks.
///
/// Half-open: a shift ending at 16:00 does not overlap one starting at 16:00.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShiftWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ShiftWindow {
    /// Build the window for a shift on `date`. When `end` is before `start`
    /// the shift is taken to finish on the following day.
    pub fn on(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        let start_at = date.and_time(start);
        let end_date = if is_overnight(start, end) {
            date.checked_add_days(Days::new(1)).unwrap_or(date)
        } else {
            date
        };
        Self {
            start: start_at,
            end: end_date.and_time(end),
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &ShiftWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A requirement's date and times, parsed once up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedShift {
    pub date: NaiveDate,
    pub window: ShiftWindow,
    pub hours: u32,
}

impl ParsedShift {
    pub fn parse(
        date: &str,
        start: &str,
        end: &str,
        policy: OvernightPolicy,
    ) -> Result<Self, ShiftError> {
        let date = parse_date(date)?;
        let start = parse_time(start)?;
        let end = parse_time(end)?;
        let hours = shift_hours(start, end, policy)?;
        Ok(Self {
            date,
            window: ShiftWindow::on(date, start, end),
            hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        parse_time(s).unwrap()
    }

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(parse_date("2025-11-20"), Ok(d(2025, 11, 20)));
        assert_eq!(
            parse_date("20/11/2025"),
            Err(ShiftError::InvalidDate("20/11/2025".to_string()))
        );
        assert_eq!(t("08:00").hour(), 8);
        assert!(parse_time("8am").is_err());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_day_shift_hours() {
        assert_eq!(shift_hours(t("10:00"), t("18:00"), OvernightPolicy::Reject), Ok(8));
        // Minutes are ignored
        assert_eq!(shift_hours(t("10:30"), t("18:00"), OvernightPolicy::Reject), Ok(8));
        assert_eq!(shift_hours(t("09:00"), t("09:45"), OvernightPolicy::Reject), Ok(0));
    }

    #[test]
    fn test_overnight_shift_policy() {
        assert!(matches!(
            shift_hours(t("22:00"), t("06:00"), OvernightPolicy::Reject),
            Err(ShiftError::Overnight { .. })
        ));
        assert_eq!(shift_hours(t("22:00"), t("06:00"), OvernightPolicy::Wrap), Ok(8));
        assert_eq!(shift_hours(t("16:00"), t("00:00"), OvernightPolicy::Wrap), Ok(8));
    }

    #[test]
    fn test_minute_level_overnight_shift() {
        // Same start and end hour, but 23:00 is before 23:30
        assert!(is_overnight(t("23:30"), t("23:00")));
        assert!(!is_overnight(t("23:00"), t("23:30")));
        assert_eq!(
            shift_hours(t("23:30"), t("23:00"), OvernightPolicy::Reject),
            Err(ShiftError::Overnight {
                start: "23:30".to_string(),
                end: "23:00".to_string(),
            })
        );
        assert_eq!(shift_hours(t("23:30"), t("23:00"), OvernightPolicy::Wrap), Ok(24));
        assert_eq!(shift_hours(t("23:00"), t("23:30"), OvernightPolicy::Reject), Ok(0));

        let late = |policy| ParsedShift::parse("2025-11-20", "23:30", "23:00", policy);
        let wrapped = late(OvernightPolicy::Wrap).unwrap();
        assert_eq!(wrapped.window.end, d(2025, 11, 21).and_time(t("23:00")));
        assert_eq!(wrapped.hours, 24);
        assert!(late(OvernightPolicy::Reject).is_err());
    }

    #[test]
    fn test_window_overlap_is_half_open() {
        let day = d(2025, 11, 20);
        let morning = ShiftWindow::on(day, t("08:00"), t("16:00"));
        let evening = ShiftWindow::on(day, t("16:00"), t("23:00"));
        let lunch = ShiftWindow::on(day, t("11:00"), t("14:00"));

        assert!(!morning.overlaps(&evening));
        assert!(morning.overlaps(&lunch));
        assert!(lunch.overlaps(&morning));
    }

    #[test]
    fn test_overnight_window_reaches_next_day() {
        let night = ShiftWindow::on(d(2025, 11, 20), t("22:00"), t("06:00"));
        let next_morning = ShiftWindow::on(d(2025, 11, 21), t("05:00"), t("09:00"));
        assert_eq!(night.end, d(2025, 11, 21).and_time(t("06:00")));
        assert!(night.overlaps(&next_morning));
    }
}
