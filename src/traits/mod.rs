//! Trait seams to the external collaborators.
//!
//! Pools and the router never own token balances directly; they move them
//! through a [`TokenLedger`], and the native-asset entry points additionally
//! require a [`NativeWrapper`].

mod native_wrapper;
mod token_ledger;

pub use native_wrapper::NativeWrapper;
pub use token_ledger::TokenLedger;
