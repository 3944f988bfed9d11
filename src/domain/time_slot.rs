// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hourly Time Slot Value Object

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Time slot parse error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeSlotError {
    #[error("Time slot is empty")]
    Empty,

    #[error("Hour is not a number: {0}")]
    InvalidHour(String),

    #[error("Hour out of range 0-23: {0}")]
    OutOfRange(u32),
}

/// A whole-hour start time such as `"10:00"`
///
/// Only the hour is significant. `"10:30"` parses to the same slot as
/// `"10:00"`, and slots always render as `HH:00`.
///
/// # Examples
///
/// ```rust
/// use lab_reservations::domain::TimeSlot;
///
/// let slot: TimeSlot = "09:00".parse().unwrap();
/// assert_eq!(slot.hour(), 9);
/// assert_eq!(slot.to_string(), "09:00");
/// assert!("".parse::<TimeSlot>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u32);

impl TimeSlot {
    /// Last valid hour of the day
    pub const MAX_HOUR: u32 = 23;

    /// Create a slot for a whole hour
    pub fn new(hour: u32) -> Result<Self, TimeSlotError> {
        if hour > Self::MAX_HOUR {
            return Err(TimeSlotError::OutOfRange(hour));
        }
        Ok(Self(hour))
    }

    /// Parse `"HH"` or `"HH:MM"`, keeping only the hour
    pub fn parse(value: &str) -> Result<Self, TimeSlotError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(TimeSlotError::Empty);
        }

        let hour_part = value.split(':').next().unwrap_or(value);
        let hour = hour_part
            .parse::<u32>()
            .map_err(|_| TimeSlotError::InvalidHour(hour_part.to_string()))?;

        Self::new(hour)
    }

    /// Hour of day (0-23)
    pub fn hour(&self) -> u32 {
        self.0
    }

    /// Every slot from `first` through `last`, inclusive
    pub fn range_inclusive(first: u32, last: u32) -> Vec<TimeSlot> {
        (first..=last.min(Self::MAX_HOUR)).map(TimeSlot).collect()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for TimeSlot {
    type Err = TimeSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for TimeSlot {
    type Error = TimeSlotError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeSlot::parse(&raw).map_err(serde::de::Error::custom)
    }
}
