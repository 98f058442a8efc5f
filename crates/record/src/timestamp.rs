//! Epoch timestamps split into seconds and nanoseconds.

use serde::Serialize;

const MILLIS_PER_SECOND: i64 = 1000;
const NANOS_PER_MILLI: i64 = 1_000_000;

/// Seconds/nanoseconds view of a millisecond epoch timestamp.
///
/// Serializes with `seconds` before `nanos`, matching the emitted JSON
/// field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch.
    pub seconds: i64,
    /// Nanosecond remainder, always in `0..=999_999_999`.
    pub nanos: u32,
}

impl Timestamp {
    /// Split a millisecond epoch timestamp.
    ///
    /// Uses Euclidean division so pre-epoch timestamps still produce a
    /// non-negative nanosecond remainder.
    #[must_use]
    pub const fn from_epoch_ms(timestamp_ms: i64) -> Self {
        let seconds = timestamp_ms.div_euclid(MILLIS_PER_SECOND);
        let remainder_ms = timestamp_ms.rem_euclid(MILLIS_PER_SECOND);
        Self {
            seconds,
            nanos: (remainder_ms * NANOS_PER_MILLI) as u32,
        }
    }
}
