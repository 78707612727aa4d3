//! Timestamp source abstraction.
//!
//! Every timestamp the store writes (record metadata, backup names,
//! document `lastModified` stamps) flows through a [`Clock`] so tests can
//! substitute a [`FixedClock`] and assert exact on-disk contents.

use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

/// Source of ISO 8601 timestamps with millisecond precision.
pub trait Clock: Send + Sync {
    /// Current time as an ISO 8601 UTC string, e.g. `2024-01-15T08:30:00.000Z`.
    fn now_iso(&self) -> String;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Test clock that returns a programmable timestamp.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<String>,
}

impl FixedClock {
    pub fn new(now: &str) -> Self {
        Self {
            now: Mutex::new(now.to_string()),
        }
    }

    /// Advance (or rewind) the reported time.
    pub fn set(&self, now: &str) {
        *self.now.lock().expect("clock mutex poisoned") = now.to_string();
    }
}

impl Clock for FixedClock {
    fn now_iso(&self) -> String {
        self.now.lock().expect("clock mutex poisoned").clone()
    }
}
