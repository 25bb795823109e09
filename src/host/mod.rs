//! In-memory reference host.
//!
//! The core assumes its environment runs each external call atomically and
//! provides a token ledger.  [`MemoryLedger`] and [`Runtime`] provide
//! exactly that for tests, demos and embedding applications that have no
//! chain underneath.

mod memory_ledger;
mod runtime;

pub use memory_ledger::MemoryLedger;
pub use runtime::Runtime;
