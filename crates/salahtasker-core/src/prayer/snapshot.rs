//! Resolved prayer times for one calendar date.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Wall-clock time of day, minute resolution.
///
/// Parses the `HH:mm` strings the AlAdhan API returns, tolerating trailing
/// annotations such as `"05:02 (EET)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Construct from hour/minute; `None` if out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight. All period comparisons operate on this.
    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    /// Convert to a chrono time-of-day.
    pub fn to_naive_time(self) -> NaiveTime {
        // Always in range by construction.
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "05:02" or "05:02 (EET)" -- keep only the HH:mm head.
        let head = s.split_whitespace().next().unwrap_or("");
        let (h, m) = head
            .split_once(':')
            .ok_or_else(|| format!("invalid time of day: {s:?}"))?;
        let hour: u8 = h.parse().map_err(|_| format!("invalid hour in {s:?}"))?;
        let minute: u8 = m.parse().map_err(|_| format!("invalid minute in {s:?}"))?;
        ClockTime::new(hour, minute).ok_or_else(|| format!("time of day out of range: {s:?}"))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// The six resolved prayer timestamps for one date at one location/method.
///
/// Immutable after construction: replace, don't edit. Built either by the
/// AlAdhan client from a remote response or reconstructed from a cache row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimeSnapshot {
    pub date: NaiveDate,
    pub fajr: ClockTime,
    pub sunrise: ClockTime,
    pub dhuhr: ClockTime,
    pub asr: ClockTime,
    pub maghrib: ClockTime,
    pub isha: ClockTime,
}

impl PrayerTimeSnapshot {
    /// The six times in canonical order with their names.
    pub fn times(&self) -> [(&'static str, ClockTime); 6] {
        [
            ("Fajr", self.fajr),
            ("Sunrise", self.sunrise),
            ("Dhuhr", self.dhuhr),
            ("Asr", self.asr),
            ("Maghrib", self.maghrib),
            ("Isha", self.isha),
        ]
    }

    /// Check the ordering invariant fajr <= sunrise <= dhuhr <= asr <=
    /// maghrib <= isha.
    ///
    /// A violation indicates an upstream data error and is reported as
    /// [`CoreError::UpstreamMalformed`], never silently corrected. Applied
    /// at cache-write time only; cached rows are returned verbatim.
    pub fn validate(&self) -> Result<(), CoreError> {
        let times = self.times();
        for pair in times.windows(2) {
            let (earlier_name, earlier) = pair[0];
            let (later_name, later) = pair[1];
            if earlier > later {
                return Err(CoreError::UpstreamMalformed(format!(
                    "prayer times out of order on {}: {earlier_name} {earlier} is after {later_name} {later}",
                    self.date
                )));
            }
        }
        Ok(())
    }
}
