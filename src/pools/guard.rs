//! Per-pool mutual-exclusion guard.
//!
//! The guard is held for the whole of a mutating pool call, including the
//! token transfers it makes.  A transfer that calls back into the same
//! pool finds the guard taken and fails with [`AmmError::Locked`] instead
//! of observing half-updated reserves.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::{AmmError, Result};

#[derive(Debug, Default)]
pub(crate) struct ReentrancyGuard {
    locked: AtomicBool,
}

impl ReentrancyGuard {
    pub(crate) const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Takes the guard, or fails with [`AmmError::Locked`] if it is held.
    ///
    /// Released when the returned token is dropped, on both the success and
    /// the error path.
    pub(crate) fn enter(&self) -> Result<GuardToken<'_>> {
        self.locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AmmError::Locked)?;
        Ok(GuardToken { guard: self })
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

/// Proof that the guard is held.
#[derive(Debug)]
pub(crate) struct GuardToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn second_entry_is_locked() {
        let guard = ReentrancyGuard::new();
        let Ok(_token) = guard.enter() else {
            panic!("expected Ok");
        };
        assert!(guard.is_locked());
        assert_eq!(guard.enter().err(), Some(AmmError::Locked));
    }

    #[test]
    fn released_on_drop() {
        let guard = ReentrancyGuard::new();
        {
            let Ok(_token) = guard.enter() else {
                panic!("expected Ok");
            };
        }
        assert!(!guard.is_locked());
        assert!(guard.enter().is_ok());
    }

    #[test]
    fn released_on_error_path() {
        fn failing(guard: &ReentrancyGuard) -> Result<()> {
            let _token = guard.enter()?;
            Err(AmmError::InvariantViolation)
        }
        let guard = ReentrancyGuard::new();
        assert_eq!(failing(&guard), Err(AmmError::InvariantViolation));
        assert!(!guard.is_locked());
    }
}
