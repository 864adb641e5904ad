//! Wall-clock durations and midpoint arithmetic.
//!
//! Durations come out of ffprobe as `H:MM:SS` with the fractional part
//! already stripped. [`Timecode::parse`] accepts exactly that shape, and
//! [`Timecode::midpoint`] halves it for the frame seek.

use std::fmt;

use crate::error::TimecodeParseError;

/// A whole-second duration. Minutes and seconds are always below 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timecode {
    hours: u64,
    minutes: u8,
    seconds: u8,
}

impl Timecode {
    /// Largest hour count whose total still fits in a `u64` of seconds.
    const MAX_HOURS: u64 = (u64::MAX - 3599) / 3600;

    /// Builds a timecode, `None` when minutes or seconds are out of range.
    pub fn new(hours: u64, minutes: u8, seconds: u8) -> Option<Self> {
        if minutes >= 60 || seconds >= 60 || hours > Self::MAX_HOURS {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Parses `H+:MM:SS`: one or more hour digits, then exactly two digits
    /// each for minutes and seconds, both below 60. Nothing else is accepted,
    /// including surrounding whitespace and fractional seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use vidthumb_core::Timecode;
    ///
    /// let tc = Timecode::parse("02:00:30").unwrap();
    /// assert_eq!(tc.total_seconds(), 7230);
    /// assert!(Timecode::parse("bad").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, TimecodeParseError> {
        let err = || TimecodeParseError::new(text);

        let mut parts = text.split(':');
        let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
            return Err(err());
        };

        if h.is_empty() || !h.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let hours = h.parse::<u64>().map_err(|_| err())?;
        let minutes = two_digits(m).ok_or_else(err)?;
        let seconds = two_digits(s).ok_or_else(err)?;

        Self::new(hours, minutes, seconds).ok_or_else(err)
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// ((hours * 60) + minutes) * 60 + seconds
    pub fn total_seconds(&self) -> u64 {
        (self.hours * 60 + u64::from(self.minutes)) * 60 + u64::from(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }

    /// The temporal halfway point of a clip of this length.
    pub fn midpoint(&self) -> Midpoint {
        Midpoint::from_seconds(self.total_seconds() as f64 / 2.0)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

fn two_digits(part: &str) -> Option<u8> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// A seek position that may carry half a second.
///
/// Halving a whole number of seconds leaves either no fraction or exactly
/// `.5`. Rendering truncates it, so the rounding rule is round-half-down:
/// a 7 second clip seeks to `00:00:03`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Midpoint {
    hours: u64,
    minutes: u64,
    seconds: f64,
}

impl Midpoint {
    /// Splits a non-negative seconds value into hours, minutes and seconds.
    pub fn from_seconds(total: f64) -> Self {
        let total = total.max(0.0);
        let hours = (total / 3600.0).floor();
        let minutes = ((total - hours * 3600.0) / 60.0).floor();
        let seconds = total - (hours * 3600.0 + minutes * 60.0);

        Self {
            hours: hours as u64,
            minutes: minutes as u64,
            seconds,
        }
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    /// Seconds within the minute, including any fractional part.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Whole seconds from the start of the clip, fraction dropped.
    pub fn whole_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds.trunc() as u64
    }

    /// Zero-padded `HH:MM:SS` with the fractional second dropped.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Midpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours,
            self.minutes,
            self.seconds.trunc() as u64
        )
    }
}
