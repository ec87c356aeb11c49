use std::fmt;

use chrono::{Datelike, Local, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Simulated clock the traffic model is evaluated against: a day of the week
/// and a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl Clock {
    pub fn new(weekday: Weekday, time: NaiveTime) -> Self {
        Self { weekday, time }
    }

    /// Clock at `hour:minute` on `weekday`, or `None` for an invalid time
    pub fn at(weekday: Weekday, hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self::new(weekday, time))
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self::new(datetime.weekday(), datetime.time())
    }

    /// Current local time
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// `[07:00, 10:00)` or `[16:00, 19:00)`
    pub fn is_rush_hour(&self) -> bool {
        matches!(self.time.hour(), 7..=9 | 16..=18)
    }

    /// `[22:00, 24:00)` or `[00:00, 05:00)`
    pub fn is_late_night(&self) -> bool {
        matches!(self.time.hour(), 22..=23 | 0..=4)
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.time.format("%H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_are_half_open() {
        let at = |hour, minute| Clock::at(Weekday::Mon, hour, minute).unwrap();

        assert!(!at(6, 59).is_rush_hour());
        assert!(at(7, 0).is_rush_hour());
        assert!(at(9, 59).is_rush_hour());
        assert!(!at(10, 0).is_rush_hour());
        assert!(at(16, 0).is_rush_hour());
        assert!(!at(19, 0).is_rush_hour());

        assert!(!at(21, 59).is_late_night());
        assert!(at(22, 0).is_late_night());
        assert!(at(0, 0).is_late_night());
        assert!(at(4, 59).is_late_night());
        assert!(!at(5, 0).is_late_night());
    }

    #[test]
    fn weekend_days() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();

        assert!(Clock::new(Weekday::Sat, noon).is_weekend());
        assert!(Clock::new(Weekday::Sun, noon).is_weekend());
        assert!(!Clock::new(Weekday::Fri, noon).is_weekend());
    }

    #[test]
    fn from_datetime_keeps_weekday_and_time() {
        // 2024-06-01 was a Saturday
        let datetime = chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let clock = Clock::from_datetime(datetime);

        assert_eq!(clock.weekday, Weekday::Sat);
        assert!(clock.is_rush_hour());
        assert_eq!(clock.to_string(), "Sat 08:30");
    }
}
