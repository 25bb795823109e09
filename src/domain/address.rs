//! Opaque 32-byte identifier for tokens, pools and accounts.

use core::fmt;

use alloy_primitives::keccak256;

/// A chain-agnostic 32-byte address.
///
/// Tokens, pools, routers and user accounts all share this identifier
/// space.  Addresses are totally ordered (lexicographically by byte), which
/// is what makes pair keys canonical.  [`Address::ZERO`] is the null holder
/// that receives the locked minimum liquidity and is never a valid token or
/// swap recipient.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::Address;
///
/// let addr = Address::repeat_byte(1);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// assert!(Address::ZERO < addr);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

impl Address {
    /// The all-zero null address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an address with every byte set to `byte`.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 32])
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the null address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Derives a deterministic address as `keccak256` of the concatenated
    /// parts.
    ///
    /// The factory uses this to place each pool at an address that depends
    /// only on the factory and the canonical token pair.
    #[must_use]
    pub fn derive(parts: &[&[u8]]) -> Self {
        let preimage: Vec<u8> = parts.iter().flat_map(|p| p.iter().copied()).collect();
        Self(keccak256(preimage).0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        f.write_str("…")?;
        for byte in &self.0[28..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
