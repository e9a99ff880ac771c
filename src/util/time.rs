//! Timestamps. Every mutating operation takes its `now` from the caller so
//! that records are stamped with the time of the transaction they belong to.

use chrono::{DateTime, Utc};

/// The current time, for callers that don't have a transaction time already.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
