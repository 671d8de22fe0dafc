//! Duplicate-suppression policy.
//!
//! A `DedupCache` remembers the last message it evaluated. A candidate is
//! rejected when its text equals the remembered text and it arrived within the
//! window. The record rolls forward on every evaluation, accepted or not, so a
//! burst of identical messages is always compared with its immediate
//! predecessor.

use std::{fmt, str::FromStr};

use super::{
    error::ValueObjectError,
    value_object::{RoomName, Timestamp},
};

/// Default suppression window in milliseconds
pub const DEFAULT_DEDUP_WINDOW_MILLIS: i64 = 5_000;

/// Last evaluated message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    pub text: String,
    pub received_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct DedupCache {
    window_millis: i64,
    last: Option<CacheRecord>,
}

impl DedupCache {
    pub fn new(window_millis: i64) -> Self {
        Self {
            window_millis,
            last: None,
        }
    }

    /// Evaluate a candidate and record it.
    ///
    /// Returns `false` for a duplicate within the window.
    pub fn accept(&mut self, text: &str, received_at: Timestamp) -> bool {
        let accepted = match &self.last {
            Some(record) => {
                record.text != text
                    || received_at.millis_since(record.received_at) > self.window_millis
            }
            None => true,
        };

        self.last = Some(CacheRecord {
            text: text.to_string(),
            received_at,
        });

        accepted
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&CacheRecord> {
        self.last.as_ref()
    }

    #[cfg(test)]
    pub fn window_millis(&self) -> i64 {
        self.window_millis
    }
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_WINDOW_MILLIS)
    }
}

/// Which messages share a cache record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupScope {
    /// One record per room.
    #[default]
    PerRoom,
    /// A single record shared by every room.
    Global,
}

impl DedupScope {
    /// Key of the record that messages in `room` are compared against.
    pub fn key_for(&self, room: &RoomName) -> DedupKey {
        match self {
            Self::PerRoom => DedupKey::Room(room.clone()),
            Self::Global => DedupKey::Global,
        }
    }
}

impl FromStr for DedupScope {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" | "per-room" => Ok(Self::PerRoom),
            "global" => Ok(Self::Global),
            other => Err(ValueObjectError::UnknownDedupScope(other.to_string())),
        }
    }
}

impl fmt::Display for DedupScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerRoom => f.write_str("room"),
            Self::Global => f.write_str("global"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    Global,
    Room(RoomName),
}
