use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{call_types, DEFAULT_DATE_FORMAT};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
    Rejected,
    Blocked,
    Unknown,
}

impl CallType {
    /// Map a raw call-log type code. Total: unrecognized codes are `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            call_types::INCOMING => Self::Incoming,
            call_types::OUTGOING => Self::Outgoing,
            call_types::MISSED => Self::Missed,
            call_types::REJECTED => Self::Rejected,
            call_types::BLOCKED => Self::Blocked,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Incoming => "Incoming",
            Self::Outgoing => "Outgoing",
            Self::Missed => "Missed",
            Self::Rejected => "Rejected",
            Self::Blocked => "Blocked",
            Self::Unknown => "Unknown",
        }
    }
}

/// Which clock a [`TimestampFormatter`] renders in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimeZoneMode {
    #[default]
    Local,
    Utc,
}

/// Renders epoch milliseconds with a chrono pattern.
#[derive(Clone, Debug)]
pub struct TimestampFormatter {
    pattern: String,
    zone: TimeZoneMode,
}

impl TimestampFormatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            zone: TimeZoneMode::Local,
        }
    }

    pub fn with_zone(mut self, zone: TimeZoneMode) -> Self {
        self.zone = zone;
        self
    }

    /// Empty string for out-of-range timestamps or a broken pattern.
    pub fn format(&self, timestamp_millis: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp_millis(timestamp_millis) else {
            return String::new();
        };

        let mut out = String::new();
        let written = match self.zone {
            TimeZoneMode::Local => write!(out, "{}", utc.with_timezone(&Local).format(&self.pattern)),
            TimeZoneMode::Utc => write!(out, "{}", utc.format(&self.pattern)),
        };
        if written.is_err() {
            return String::new();
        }
        out
    }
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

/// Immutable snapshot of one call-log row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    id: String,
    number: String,
    name: Option<String>,
    timestamp_millis: i64,
    duration_seconds: u64,
    call_type: CallType,
    formatted_timestamp: String,
}

impl CallRecord {
    pub fn new(
        id: impl Into<String>,
        number: impl Into<String>,
        name: Option<String>,
        timestamp_millis: i64,
        duration_seconds: u64,
        call_type: CallType,
        formatter: &TimestampFormatter,
    ) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            name,
            timestamp_millis,
            duration_seconds,
            call_type,
            formatted_timestamp: formatter.format(timestamp_millis),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn call_type(&self) -> CallType {
        self.call_type
    }

    pub fn formatted_timestamp(&self) -> &str {
        &self.formatted_timestamp
    }

    /// Cached contact name, falling back to the number.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.number,
        }
    }

    /// "Duration: 1 min 15 sec", or empty for calls that never connected.
    pub fn duration_label(&self) -> String {
        let duration = format_duration(self.duration_seconds);
        if duration.is_empty() {
            duration
        } else {
            format!("Duration: {}", duration)
        }
    }
}

/// Format a call length: "" for 0, "45 sec", "1 min 15 sec".
pub fn format_duration(duration_seconds: u64) -> String {
    if duration_seconds == 0 {
        return String::new();
    }

    let minutes = duration_seconds / 60;
    let seconds = duration_seconds % 60;
    if minutes > 0 {
        format!("{} min {} sec", minutes, seconds)
    } else {
        format!("{} sec", seconds)
    }
}
