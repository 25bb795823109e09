//! Timestamps and call deadlines.

use core::fmt;

use crate::error::{AmmError, Result};

/// Seconds since the host's epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from raw seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the raw seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Returns the timestamp `secs` later, saturating at `u64::MAX`.
    #[must_use]
    pub const fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Latest timestamp at which a router call may still execute.
///
/// A call is expired when the current time is strictly after the deadline;
/// a call executing exactly at the deadline is allowed.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::{Deadline, Timestamp};
///
/// let deadline = Deadline::at(Timestamp::from_secs(100));
/// assert!(deadline.ensure_not_expired(Timestamp::from_secs(100)).is_ok());
/// assert!(deadline.ensure_not_expired(Timestamp::from_secs(101)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deadline(Timestamp);

impl Deadline {
    /// A deadline that never expires.
    pub const NEVER: Self = Self(Timestamp(u64::MAX));

    /// Creates a deadline at `timestamp`.
    #[must_use]
    pub const fn at(timestamp: Timestamp) -> Self {
        Self(timestamp)
    }

    /// Returns the deadline's timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.0
    }

    /// Returns `true` if `now` is past the deadline.
    #[must_use]
    pub const fn is_expired(&self, now: Timestamp) -> bool {
        now.0 > self.0 .0
    }

    /// Checks the deadline against `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Expired`] if `now` is past the deadline.
    pub const fn ensure_not_expired(&self, now: Timestamp) -> Result<()> {
        if self.is_expired(now) {
            return Err(AmmError::Expired);
        }
        Ok(())
    }
}

impl From<Timestamp> for Deadline {
    fn from(timestamp: Timestamp) -> Self {
        Self(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_strict() {
        let deadline = Deadline::at(Timestamp::from_secs(50));
        assert!(!deadline.is_expired(Timestamp::from_secs(49)));
        assert!(!deadline.is_expired(Timestamp::from_secs(50)));
        assert!(deadline.is_expired(Timestamp::from_secs(51)));
        assert_eq!(
            deadline.ensure_not_expired(Timestamp::from_secs(51)),
            Err(AmmError::Expired)
        );
    }

    #[test]
    fn never_does_not_expire() {
        assert!(!Deadline::NEVER.is_expired(Timestamp::from_secs(u64::MAX)));
    }

    #[test]
    fn plus_secs_saturates() {
        let t = Timestamp::from_secs(u64::MAX - 1);
        assert_eq!(t.plus_secs(10).as_secs(), u64::MAX);
    }
}
