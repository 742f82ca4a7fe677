use serde::{de::Visitor, Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A wall clock time with minute granularity, `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
}

impl TimeOfDay {
    /// Minutes elapsed since local midnight.
    pub fn minutes_of_day(&self) -> i64 {
        self.hours as i64 * 60 + self.minutes as i64
    }
}

#[derive(Error, Debug)]
pub enum InvalidTimeOfDayError {
    #[error("Time: {0} is malformed, expected format: HH:MM")]
    Malformed(String),
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(':').collect::<Vec<_>>();
        if parts.len() != 2 {
            return Err(InvalidTimeOfDayError::Malformed(s.to_string()));
        }
        let hours = parts[0].parse::<u32>();
        let minutes = parts[1].parse::<u32>();

        let (hours, minutes) = match (hours, minutes) {
            (Ok(hours), Ok(minutes)) => (hours, minutes),
            _ => return Err(InvalidTimeOfDayError::Malformed(s.to_string())),
        };
        if hours > 23 || minutes > 59 {
            return Err(InvalidTimeOfDayError::Malformed(s.to_string()));
        }

        Ok(Self { hours, minutes })
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl std::cmp::PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self.hours.cmp(&other.hours) {
            std::cmp::Ordering::Less => return Some(std::cmp::Ordering::Less),
            std::cmp::Ordering::Greater => return Some(std::cmp::Ordering::Greater),
            _ => (),
        };

        Some(self.minutes.cmp(&other.minutes))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeOfDayVisitor;

        impl<'de> Visitor<'de> for TimeOfDayVisitor {
            type Value = TimeOfDay;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A time string on the format HH:MM")
            }

            fn visit_str<E>(self, value: &str) -> Result<TimeOfDay, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<TimeOfDay>()
                    .map_err(|_| E::custom(format!("Malformed time: {}", value)))
            }
        }

        deserializer.deserialize_str(TimeOfDayVisitor)
    }
}
