//! Common value types used throughout LexiDB.

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Human-readable timestamp format stored in the record file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compact timestamp format used in backup file names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Alternate format accepted when reading files edited by other tools.
const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Shapes tried, in order, when ordering a stored value that is not in the
/// canonical format.
const LOOSE_FORMATS: [&str; 4] = [
    TIMESTAMP_FORMAT,
    ISO_TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A local wall-clock timestamp with second resolution.
///
/// Serialized as `YYYY-MM-DD HH:MM:SS`. The derived ordering is
/// chronological, which matches the lexical order of the serialized form.
///
/// The default value is `1970-01-01 00:00:00`, used to order rows whose
/// timestamps are missing or unreadable.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Creates a timestamp, dropping any sub-second part.
    #[must_use]
    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }

    /// Parses a timestamp in the stored format.
    ///
    /// `YYYY-MM-DDTHH:MM:SS` is accepted as well. Returns `None` for anything
    /// else.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(input, ISO_TIMESTAMP_FORMAT))
            .ok()
            .map(Self::from_naive)
    }

    /// Parses any date-time shape commonly found in hand-edited files:
    /// the stored format, the `T` separator, fractional seconds, and
    /// RFC 3339 with an offset (read as its local wall-clock time).
    fn parse_loose(input: &str) -> Option<Self> {
        let input = input.trim();
        LOOSE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(input)
                    .ok()
                    .map(|value| value.naive_local())
            })
            .map(Self::from_naive)
    }

    /// Returns the underlying naive date-time.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Formats the timestamp for use in a backup file name.
    #[must_use]
    pub fn compact(&self) -> String {
        self.0.format(BACKUP_TIMESTAMP_FORMAT).to_string()
    }

    /// Returns this timestamp shifted by `seconds`.
    #[must_use]
    pub fn plus_seconds(&self, seconds: i64) -> Self {
        Self(self.0 + chrono::Duration::seconds(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({self})")
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::from_naive(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw:?}")))
    }
}

/// A timestamp field of a stored record.
///
/// Values stamped by the store are canonical [`Timestamp`]s. A value read
/// from the record file in any other textual shape keeps its exact text,
/// which is written back unchanged on every rewrite; its parsed form (the
/// default timestamp when it cannot be read at all) is only used for
/// ordering. Non-string values read as the default timestamp.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordTime {
    at: Timestamp,
    raw: Option<String>,
}

impl RecordTime {
    /// Reads a stored value, keeping its text unless it is canonical.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match Timestamp::parse_loose(&text) {
            Some(at) if at.to_string() == text => Self { at, raw: None },
            parsed => Self {
                at: parsed.unwrap_or_default(),
                raw: Some(text),
            },
        }
    }

    /// Returns the time used for ordering.
    #[must_use]
    pub const fn at(&self) -> Timestamp {
        self.at
    }

    /// Returns the original text if it was not in the canonical format.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl From<Timestamp> for RecordTime {
    fn from(at: Timestamp) -> Self {
        Self { at, raw: None }
    }
}

impl PartialEq<Timestamp> for RecordTime {
    fn eq(&self, other: &Timestamp) -> bool {
        self.raw.is_none() && self.at == *other
    }
}

impl fmt::Display for RecordTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f.write_str(raw),
            None => write!(f, "{}", self.at),
        }
    }
}

impl fmt::Debug for RecordTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordTime({self})")
    }
}

impl Serialize for RecordTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) => Ok(Self::from_text(text)),
            _ => Ok(Self::default()),
        }
    }
}
