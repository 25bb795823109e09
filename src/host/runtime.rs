//! All-or-nothing call execution over a ledger and a factory.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{Address, Amount, CallContext, Timestamp};
use crate::error::Result;
use crate::factory::PairFactory;

/// A minimal host: a clock, a ledger and a pair registry, with every call
/// executed atomically.
///
/// [`execute`](Self::execute) snapshots the ledger and every registered
/// pool before running the call.  If the call fails, both are restored and
/// the error is returned, so a failed call has no observable effect.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use hydra_cpmm::config::PoolConfig;
/// use hydra_cpmm::domain::{Address, Amount};
/// use hydra_cpmm::error::AmmError;
/// use hydra_cpmm::factory::PairFactory;
/// use hydra_cpmm::host::{MemoryLedger, Runtime};
/// use hydra_cpmm::traits::TokenLedger;
///
/// let token = Address::repeat_byte(1);
/// let alice = Address::repeat_byte(0xa1);
/// let factory = Arc::new(PairFactory::new(Address::repeat_byte(0xfa), PoolConfig::default()));
/// let mut runtime = Runtime::new(MemoryLedger::new(Address::repeat_byte(0xee)), factory);
/// runtime.ledger_mut().mint(token, alice, Amount::new(10)).expect("mint");
///
/// let result: Result<(), AmmError> = runtime.execute(alice, Amount::ZERO, |ledger, ctx| {
///     ledger.transfer(token, ctx.caller, Address::repeat_byte(0xb0), Amount::new(4))?;
///     Err(AmmError::Expired)
/// });
/// assert_eq!(result, Err(AmmError::Expired));
/// assert_eq!(runtime.ledger().balance_of(token, alice), Amount::new(10));
/// ```
#[derive(Debug)]
pub struct Runtime<L> {
    ledger: L,
    factory: Arc<PairFactory>,
    now: Timestamp,
}

impl<L: Clone> Runtime<L> {
    /// Creates a runtime at time zero.
    #[must_use]
    pub fn new(ledger: L, factory: Arc<PairFactory>) -> Self {
        Self {
            ledger,
            factory,
            now: Timestamp::default(),
        }
    }

    /// Current host time.
    #[must_use]
    pub const fn now(&self) -> Timestamp {
        self.now
    }

    /// Sets the host time.
    pub fn set_time(&mut self, now: Timestamp) {
        self.now = now;
    }

    /// Moves the host time forward by `secs`.
    pub fn advance(&mut self, secs: u64) {
        self.now = self.now.plus_secs(secs);
    }

    /// The ledger, for reads.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The ledger, for setup outside of any call.  Changes made here are
    /// not subject to rollback.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The pair registry.
    #[must_use]
    pub const fn factory(&self) -> &Arc<PairFactory> {
        &self.factory
    }

    /// Runs `call` as `caller` with `value` native value attached.
    ///
    /// # Errors
    ///
    /// Returns whatever `call` returns.  On error, the ledger and all pool
    /// and registry state are rolled back to their state before the call.
    pub fn execute<T, F>(&mut self, caller: Address, value: Amount, call: F) -> Result<T>
    where
        F: FnOnce(&mut L, &CallContext) -> Result<T>,
    {
        let ctx = CallContext::new(caller, self.now).with_value(value);
        let ledger_snapshot = self.ledger.clone();
        let factory_snapshot = self.factory.snapshot();
        match call(&mut self.ledger, &ctx) {
            Ok(output) => Ok(output),
            Err(error) => {
                self.ledger = ledger_snapshot;
                self.factory.restore(&factory_snapshot);
                warn!(
                    %caller,
                    %error,
                    kind = %error.kind(),
                    "call reverted, state rolled back"
                );
                Err(error)
            }
        }
    }
}
