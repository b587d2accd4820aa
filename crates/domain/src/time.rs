//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp recorded as `last_changed` on every shadow state.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
