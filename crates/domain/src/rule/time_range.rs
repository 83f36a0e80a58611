//! Time range codec: the composite `"HH:mm-HH:mm"` value of `TIME_RANGE` conditions.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};

const ENDPOINT_FORMAT: &str = "%H:%M";

/// Why a string could not be read as a time range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeRangeError {
    #[error("missing '-' between start and end")]
    MissingSeparator,
    #[error("endpoint {0:?} is not HH:mm")]
    BadEndpoint(String),
}

/// A daily window between two wall-clock times, minute precision.
///
/// `start > end` denotes an overnight window such as `22:00-06:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    /// Build a range; seconds and sub-seconds are truncated.
    #[must_use]
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start: truncate(start),
            end: truncate(end),
        }
    }

    #[must_use]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Serialize both endpoints into the single wire string.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}-{}",
            self.start.format(ENDPOINT_FORMAT),
            self.end.format(ENDPOINT_FORMAT)
        )
    }

    /// Strictly parse `"HH:mm-HH:mm"`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError`] when the separator or either endpoint is
    /// missing or malformed.
    pub fn parse(value: &str) -> Result<Self, TimeRangeError> {
        let (start, end) = value
            .split_once('-')
            .ok_or(TimeRangeError::MissingSeparator)?;
        Ok(Self {
            start: parse_endpoint(start)?,
            end: parse_endpoint(end)?,
        })
    }

    /// Lenient decode used for display: anything malformed reads as "not set".
    #[must_use]
    pub fn decode(value: &str) -> Option<Self> {
        Self::parse(value).ok()
    }

    /// Whether `time` falls inside the window, endpoints included.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        let time = truncate(time);
        if self.start <= self.end {
            time >= self.start && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for TimeRange {
    type Err = TimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse a single `HH:mm` endpoint (exactly two digits on each side).
///
/// # Errors
///
/// Returns [`TimeRangeError::BadEndpoint`] for any other shape or an
/// out-of-range hour/minute.
pub fn parse_endpoint(value: &str) -> Result<NaiveTime, TimeRangeError> {
    let bad = || TimeRangeError::BadEndpoint(value.to_string());
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !shaped {
        return Err(bad());
    }
    NaiveTime::parse_from_str(value, ENDPOINT_FORMAT).map_err(|_| bad())
}

fn truncate(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
