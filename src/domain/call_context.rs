//! Per-call execution context supplied by the host.

use super::{Address, Amount, Timestamp};

/// Who is calling, when, and with how much native value attached.
///
/// The router reads the caller to pull tokens, the timestamp to enforce
/// deadlines, and the attached value for the native-asset entry points.
/// Entry points that are not native-aware ignore `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    /// Account on whose behalf the call executes.
    pub caller: Address,
    /// Host time of execution.
    pub timestamp: Timestamp,
    /// Native value attached to the call.
    pub value: Amount,
}

impl CallContext {
    /// Creates a context with no attached value.
    #[must_use]
    pub const fn new(caller: Address, timestamp: Timestamp) -> Self {
        Self {
            caller,
            timestamp,
            value: Amount::ZERO,
        }
    }

    /// Returns a copy with `value` attached.
    #[must_use]
    pub const fn with_value(self, value: Amount) -> Self {
        Self { value, ..self }
    }
}
