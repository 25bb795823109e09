//! Canonically ordered pair of distinct tokens.

use core::fmt;

use super::Address;
use crate::error::{AmmError, Result};

/// An unordered pair of distinct tokens, stored in canonical order.
///
/// Construction sorts the two addresses so that `token0 < token1`.  The
/// pair is therefore the same value whichever order the tokens were
/// supplied in, which is what lets the factory key its registry on it.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::{Address, TokenPair};
///
/// let a = Address::repeat_byte(1);
/// let b = Address::repeat_byte(2);
///
/// let pair = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(pair.token0(), a);
/// assert_eq!(pair.token1(), b);
/// assert_eq!(pair, TokenPair::new(a, b).expect("distinct tokens"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTokenPair"))]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAddresses`] if both tokens are equal.
    /// - [`AmmError::ZeroAddress`] if either token is the null address.
    pub fn new(token_a: Address, token_b: Address) -> Result<Self> {
        let (token0, token1) = sort_tokens(token_a, token_b)?;
        Ok(Self { token0, token1 })
    }

    /// Returns the lower-ordered token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Returns the higher-ordered token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Returns `true` if `token` is one of the two tokens.
    #[must_use]
    pub fn contains(&self, token: Address) -> bool {
        self.token0 == token || self.token1 == token
    }

    /// Returns the counterpart of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PairNotFound`] if `token` is not in the pair.
    pub fn other(&self, token: Address) -> Result<Address> {
        if token == self.token0 {
            Ok(self.token1)
        } else if token == self.token1 {
            Ok(self.token0)
        } else {
            Err(AmmError::PairNotFound)
        }
    }
}

/// Unchecked wire form of a [`TokenPair`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTokenPair {
    token0: Address,
    token1: Address,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTokenPair> for TokenPair {
    type Error = AmmError;

    fn try_from(raw: RawTokenPair) -> Result<Self> {
        Self::new(raw.token0, raw.token1)
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token0, self.token1)
    }
}

/// Returns `(token_a, token_b)` in canonical order.
///
/// # Errors
///
/// - [`AmmError::IdenticalAddresses`] if both tokens are equal.
/// - [`AmmError::ZeroAddress`] if the lower token is the null address.
pub fn sort_tokens(token_a: Address, token_b: Address) -> Result<(Address, Address)> {
    if token_a == token_b {
        return Err(AmmError::IdenticalAddresses);
    }
    let (token0, token1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    // The null address sorts first, so checking token0 covers both.
    if token0.is_zero() {
        return Err(AmmError::ZeroAddress);
    }
    Ok((token0, token1))
}
