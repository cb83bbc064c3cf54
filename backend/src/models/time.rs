use serde::{Deserialize, Serialize};
use std::fmt;

/// Time of day in 24-hour `HH:MM` form.
///
/// Wire formats keep times as zero-padded strings; `ClockTime` is the parsed
/// form used wherever a value has to be checked rather than just compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Build a time from its components, rejecting out-of-range values.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Parse a strict `HH:MM` string.
    ///
    /// Exactly five characters are accepted: two digits, a colon, two digits.
    /// `9:00`, `09:00:00` and `24:00` are all rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }
        let digit = |b: u8| b.is_ascii_digit().then(|| b - b'0');
        let hour = digit(bytes[0])? * 10 + digit(bytes[1])?;
        let minute = digit(bytes[3])? * 10 + digit(bytes[4])?;
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Whether `s` is a well-formed 24-hour `HH:MM` time.
pub fn is_clock_time(s: &str) -> bool {
    ClockTime::parse(s).is_some()
}

/// Whether `s` is a real calendar date in `YYYY-MM-DD` form.
pub fn is_calendar_date(s: &str) -> bool {
    s.len() == 10 && chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
