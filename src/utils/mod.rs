mod atomic;

pub use atomic::atomic_write;

use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;

/// Name of the per-user fieldops folder
pub const FIELDOPS_FOLDER: &str = ".fieldops";

/// Environment variable overriding the fieldops home directory
pub const FIELDOPS_HOME_ENV: &str = "FIELDOPS_HOME";

/// Resolve the fieldops home directory (`$FIELDOPS_HOME` or `~/.fieldops`).
#[must_use]
pub fn fieldops_home() -> PathBuf {
    if let Ok(home) = std::env::var(FIELDOPS_HOME_ENV) {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(FIELDOPS_FOLDER)
}

/// Current UTC time.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Timestamp for a modification of a record last touched at `previous`.
///
/// Always strictly after `previous`, even when the wall clock has not advanced
/// (or went backwards) since the last write.
#[must_use]
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous
            .checked_add_signed(Duration::microseconds(1))
            .unwrap_or(previous)
    }
}

/// Generate a new opaque entity id.
#[must_use]
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
#[path = "utils_tests.rs"]
mod tests;
