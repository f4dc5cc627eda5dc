// Calendar date range domain models
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const START_OF_DAY: &str = "T00:00:00";
const END_OF_DAY: &str = "T23:59:59";

#[derive(Debug, Error, PartialEq)]
pub enum DateRangeError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
    #[error("unknown range shortcut '{0}'")]
    UnknownShortcut(String),
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, DateRangeError> {
        if start_date > end_date {
            return Err(DateRangeError::Inverted {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Full timestamps covering the whole first and last day.
    pub fn query_bounds(&self) -> (String, String) {
        (
            format!("{}{}", self.start_date.format(DATE_FORMAT), START_OF_DAY),
            format!("{}{}", self.end_date.format(DATE_FORMAT), END_OF_DAY),
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT)
        )
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| DateRangeError::InvalidDate(s.to_string()))
}

/// Named date range presets offered next to the date pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeShortcut {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    ThisMonth,
}

impl RangeShortcut {
    pub const ALL: [RangeShortcut; 5] = [
        RangeShortcut::Today,
        RangeShortcut::Yesterday,
        RangeShortcut::Last7Days,
        RangeShortcut::Last30Days,
        RangeShortcut::ThisMonth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RangeShortcut::Today => "Today",
            RangeShortcut::Yesterday => "Yesterday",
            RangeShortcut::Last7Days => "Last 7 Days",
            RangeShortcut::Last30Days => "Last 30 Days",
            RangeShortcut::ThisMonth => "This Month",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            RangeShortcut::Today => "today",
            RangeShortcut::Yesterday => "yesterday",
            RangeShortcut::Last7Days => "last-7-days",
            RangeShortcut::Last30Days => "last-30-days",
            RangeShortcut::ThisMonth => "this-month",
        }
    }
}

impl FromStr for RangeShortcut {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.slug() == needle || r.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DateRangeError::UnknownShortcut(s.to_string()))
    }
}

impl fmt::Display for RangeShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = DateRange::new(date(2025, 5, 21), date(2025, 5, 20)).unwrap_err();
        assert_eq!(
            err,
            DateRangeError::Inverted {
                start: date(2025, 5, 21),
                end: date(2025, 5, 20)
            }
        );
        assert!(DateRange::new(date(2025, 5, 20), date(2025, 5, 20)).is_ok());
    }

    #[test]
    fn test_parse() {
        let range = DateRange::parse("2025-05-01", " 2025-05-03").unwrap();
        assert_eq!(range.start_date(), date(2025, 5, 1));
        assert_eq!(range.end_date(), date(2025, 5, 3));

        assert_eq!(
            DateRange::parse("05/01/2025", "2025-05-03"),
            Err(DateRangeError::InvalidDate("05/01/2025".to_string()))
        );
    }

    #[test]
    fn test_query_bounds() {
        let range = DateRange::parse("2025-05-13", "2025-05-20").unwrap();
        assert_eq!(
            range.query_bounds(),
            (
                "2025-05-13T00:00:00".to_string(),
                "2025-05-20T23:59:59".to_string()
            )
        );
    }

    #[test]
    fn test_serializes_as_calendar_dates() {
        let range = DateRange::single_day(date(2025, 5, 19));
        assert_eq!(
            serde_json::to_value(range).unwrap(),
            serde_json::json!({"startDate": "2025-05-19", "endDate": "2025-05-19"})
        );
    }

    #[test]
    fn test_shortcut_from_str() {
        assert_eq!("Last 7 Days".parse(), Ok(RangeShortcut::Last7Days));
        assert_eq!("this-month".parse(), Ok(RangeShortcut::ThisMonth));
        assert_eq!("yesterday".parse(), Ok(RangeShortcut::Yesterday));
        assert_eq!(
            "last-90-days".parse::<RangeShortcut>(),
            Err(DateRangeError::UnknownShortcut("last-90-days".to_string()))
        );
    }
}
