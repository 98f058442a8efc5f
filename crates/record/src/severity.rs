//! Severity bands derived from numeric levels.

use crate::Level;
use std::fmt;

/// Coarse severity band attached to emitted output.
///
/// The four bands partition the whole numeric level space. Ordering follows
/// priority, `Debug` lowest through `Error` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Everything below the `INFO` threshold, trace detail included.
    Debug,
    /// At or above the `INFO` threshold.
    Info,
    /// At or above the `WARNING` threshold.
    Warning,
    /// At or above the `ERROR` threshold.
    Error,
}

impl Severity {
    /// Map a numeric level onto its band.
    ///
    /// The band is the one whose threshold is the highest threshold at or
    /// below the level. The mapping is total and monotonic in the level
    /// value.
    #[must_use]
    pub const fn for_level(level: Level) -> Self {
        let value = level.value();
        if value >= Level::ERROR.value() {
            Self::Error
        } else if value >= Level::WARNING.value() {
            Self::Warning
        } else if value >= Level::INFO.value() {
            Self::Info
        } else {
            Self::Debug
        }
    }

    /// Upper-case band name used in rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thresholds_map_to_their_band() {
        assert_eq!(Severity::for_level(Level::ERROR), Severity::Error);
        assert_eq!(Severity::for_level(Level::WARNING), Severity::Warning);
        assert_eq!(Severity::for_level(Level::INFO), Severity::Info);
        assert_eq!(Severity::for_level(Level::DEBUG), Severity::Debug);
        assert_eq!(Severity::for_level(Level::TRACE), Severity::Debug);
    }

    #[test]
    fn band_boundaries_are_inclusive_below() {
        assert_eq!(Severity::for_level(Level::from_value(999)), Severity::Warning);
        assert_eq!(Severity::for_level(Level::from_value(899)), Severity::Info);
        assert_eq!(Severity::for_level(Level::from_value(799)), Severity::Debug);
        assert_eq!(Severity::for_level(Level::from_value(1001)), Severity::Error);
    }

    #[test]
    fn extremes_stay_in_range() {
        assert_eq!(Severity::for_level(Level::ALL), Severity::Debug);
        assert_eq!(Severity::for_level(Level::OFF), Severity::Error);
    }

    proptest! {
        #[test]
        fn every_level_maps_to_a_named_band(value in any::<i32>()) {
            let band = Severity::for_level(Level::from_value(value));
            prop_assert!(matches!(
                band.as_str(),
                "ERROR" | "WARNING" | "INFO" | "DEBUG"
            ));
        }

        #[test]
        fn banding_is_monotonic(low in any::<i32>(), high in any::<i32>()) {
            let (low, high) = if low <= high { (low, high) } else { (high, low) };
            let low_band = Severity::for_level(Level::from_value(low));
            let high_band = Severity::for_level(Level::from_value(high));
            prop_assert!(high_band >= low_band);
        }
    }
}
