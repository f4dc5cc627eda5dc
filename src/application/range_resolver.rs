// Resolves named shortcuts into concrete date ranges
use crate::domain::date_range::{DateRange, RangeShortcut};
use chrono::{Datelike, Days, NaiveDate, Utc};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// UTC calendar date of the host clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn resolve(shortcut: RangeShortcut, today: NaiveDate) -> DateRange {
    let days_ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN);

    let start = match shortcut {
        RangeShortcut::Today => today,
        RangeShortcut::Yesterday => return DateRange::single_day(days_ago(1)),
        RangeShortcut::Last7Days => days_ago(7),
        RangeShortcut::Last30Days => days_ago(30),
        RangeShortcut::ThisMonth => today.with_day(1).unwrap_or(today),
    };

    // start never exceeds today for any shortcut
    DateRange::new(start, today).unwrap_or(DateRange::single_day(today))
}

/// Range used by the analysis view when nothing was selected.
pub fn default_range(clock: &dyn Clock) -> DateRange {
    resolve(RangeShortcut::Last7Days, clock.today())
}
