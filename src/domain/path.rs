//! Multi-hop swap routes.

use super::Address;
use crate::error::{AmmError, Result};

/// An ordered route of tokens for a multi-hop swap.
///
/// Each adjacent pair of tokens is one hop through the pool for that pair.
/// A path always has at least two tokens and never repeats a token in
/// adjacent positions.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::{Address, SwapPath};
///
/// let a = Address::repeat_byte(1);
/// let b = Address::repeat_byte(2);
/// let c = Address::repeat_byte(3);
///
/// let path = SwapPath::new(vec![a, b, c]).expect("valid path");
/// assert_eq!(path.hop_count(), 2);
/// assert_eq!(path.first(), a);
/// assert_eq!(path.last(), c);
/// assert!(SwapPath::new(vec![a]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Address>"))]
pub struct SwapPath(Vec<Address>);

impl SwapPath {
    /// Validates and wraps a token route.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if fewer than two tokens are given.
    /// - [`AmmError::IdenticalAddresses`] if two adjacent tokens are equal.
    pub fn new(tokens: Vec<Address>) -> Result<Self> {
        if tokens.len() < 2 {
            return Err(AmmError::InvalidPath("path needs at least two tokens"));
        }
        if tokens.windows(2).any(|hop| hop[0] == hop[1]) {
            return Err(AmmError::IdenticalAddresses);
        }
        Ok(Self(tokens))
    }

    /// Returns the tokens of the route.
    #[must_use]
    pub fn tokens(&self) -> &[Address] {
        &self.0
    }

    /// Number of tokens in the route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a valid path has at least two tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of pools the route crosses.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.0.len() - 1
    }

    /// Input token of the route.
    #[must_use]
    pub fn first(&self) -> Address {
        self.0[0]
    }

    /// Output token of the route.
    #[must_use]
    pub fn last(&self) -> Address {
        self.0[self.0.len() - 1]
    }

    /// Iterates `(input, output)` token pairs in route order.
    pub fn hops(&self) -> impl DoubleEndedIterator<Item = (Address, Address)> + ExactSizeIterator + '_ {
        self.0.windows(2).map(|hop| (hop[0], hop[1]))
    }
}

impl TryFrom<Vec<Address>> for SwapPath {
    type Error = AmmError;

    fn try_from(tokens: Vec<Address>) -> Result<Self> {
        Self::new(tokens)
    }
}
