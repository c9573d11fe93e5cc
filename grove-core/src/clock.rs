use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use std::fmt::Debug;

const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun.", "Mon.", "Tue.", "Wed.", "Thu.", "Fri.", "Sat."];

/// Produces the current instant on demand.
pub trait TimeSource: Send + Sync + Debug {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl TimeSource for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Render as `"{h}:{mm} {am|pm}"`, e.g. `"9:05 am"`. Midnight and noon show as 12.
pub fn format_time<T: Timelike>(instant: &T) -> String {
    let (is_pm, hour) = instant.hour12();
    let suffix = if is_pm { "pm" } else { "am" };

    format!("{hour}:{:02} {suffix}", instant.minute())
}

/// Render as `"{weekday abbreviation} {day}"`, e.g. `"Wed. 14"`.
pub fn format_date<T: Datelike>(instant: &T) -> String {
    let weekday = instant.weekday().num_days_from_sunday() as usize;

    format!("{} {}", WEEKDAY_ABBREVIATIONS[weekday], instant.day())
}
