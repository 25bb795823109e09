//! Pair registry and pool creation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use crate::config::PoolConfig;
use crate::domain::{Address, TokenPair};
use crate::error::{AmmError, Result};
use crate::pools::{Pool, PoolSnapshot};

#[derive(Debug, Default)]
struct Registry {
    by_pair: HashMap<TokenPair, Arc<Pool>>,
    all: Vec<Arc<Pool>>,
}

/// A copy of the registry length and every pool's state, restorable with
/// [`PairFactory::restore`].
#[derive(Debug, Clone)]
pub struct FactorySnapshot {
    pair_count: usize,
    pools: Vec<PoolSnapshot>,
}

/// Append-only registry of constant-product pools, one per unordered token
/// pair.
///
/// Each pool lives at a deterministic address,
/// `keccak256(factory ‖ token0 ‖ token1)`, and is configured with the
/// factory's [`PoolConfig`].
///
/// # Thread Safety
///
/// The registry sits behind an `RwLock`; lookups take a read lock and only
/// [`create_pair`](Self::create_pair) takes the write lock.  Handles
/// returned are `Arc<Pool>`, so they stay valid independently of the
/// factory.
///
/// # Example
///
/// ```rust
/// use hydra_cpmm::config::PoolConfig;
/// use hydra_cpmm::domain::Address;
/// use hydra_cpmm::error::AmmError;
/// use hydra_cpmm::factory::PairFactory;
///
/// let factory = PairFactory::new(Address::repeat_byte(0xfa), PoolConfig::default());
/// let (a, b) = (Address::repeat_byte(2), Address::repeat_byte(1));
///
/// let pool = factory.create_pair(a, b).expect("new pair");
/// assert_eq!(pool.token0(), b);
/// assert!(factory.get_pair(b, a).is_some());
/// assert_eq!(factory.create_pair(b, a).err(), Some(AmmError::PairExists));
/// ```
#[derive(Debug)]
pub struct PairFactory {
    address: Address,
    config: PoolConfig,
    registry: RwLock<Registry>,
}

impl PairFactory {
    /// Creates an empty factory.
    ///
    /// `config` is applied to every pool the factory creates.  It is
    /// trusted as given; configs that did not come from
    /// [`PoolConfig::new`] should be checked with
    /// [`PoolConfig::validate`] first.
    #[must_use]
    pub fn new(address: Address, config: PoolConfig) -> Self {
        Self {
            address,
            config,
            registry: RwLock::new(Registry::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The factory's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The configuration applied to every pool.
    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        self.config
    }

    /// Deterministic address of the pool for `(token_a, token_b)`, whether
    /// or not it has been created.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`create_pair`](Self::create_pair).
    pub fn pair_address(&self, token_a: Address, token_b: Address) -> Result<Address> {
        let pair = TokenPair::new(token_a, token_b)?;
        Ok(self.address_of(pair))
    }

    fn address_of(&self, pair: TokenPair) -> Address {
        Address::derive(&[
            &self.address.as_bytes(),
            &pair.token0().as_bytes(),
            &pair.token1().as_bytes(),
        ])
    }

    /// Creates and registers the pool for an unordered token pair.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAddresses`] if `token_a == token_b`.
    /// - [`AmmError::ZeroAddress`] if either token is the null address.
    /// - [`AmmError::PairExists`] if the pair is already registered, in
    ///   either order.
    pub fn create_pair(&self, token_a: Address, token_b: Address) -> Result<Arc<Pool>> {
        let pair = TokenPair::new(token_a, token_b)?;
        let mut registry = self.write();
        if registry.by_pair.contains_key(&pair) {
            return Err(AmmError::PairExists);
        }
        let address = self.address_of(pair);
        let pool = Arc::new(Pool::new(address, pair, self.config));
        registry.by_pair.insert(pair, Arc::clone(&pool));
        registry.all.push(Arc::clone(&pool));
        info!(
            factory = %self.address,
            %pair,
            pool = %address,
            index = registry.all.len() - 1,
            "pair created"
        );
        Ok(pool)
    }

    /// The pool for an unordered token pair, if registered.
    #[must_use]
    pub fn get_pair(&self, token_a: Address, token_b: Address) -> Option<Arc<Pool>> {
        let pair = TokenPair::new(token_a, token_b).ok()?;
        self.read().by_pair.get(&pair).cloned()
    }

    /// The `index`-th pool in creation order.
    #[must_use]
    pub fn all_pairs(&self, index: usize) -> Option<Arc<Pool>> {
        self.read().all.get(index).cloned()
    }

    /// Number of registered pools.
    #[must_use]
    pub fn all_pairs_length(&self) -> usize {
        self.read().all.len()
    }

    /// Captures the registry length and the state of every pool.
    #[must_use]
    pub fn snapshot(&self) -> FactorySnapshot {
        let registry = self.read();
        FactorySnapshot {
            pair_count: registry.all.len(),
            pools: registry.all.iter().map(|pool| pool.snapshot()).collect(),
        }
    }

    /// Drops pools created after `snapshot` was taken and restores the
    /// state of the others.
    pub fn restore(&self, snapshot: &FactorySnapshot) {
        let mut registry = self.write();
        let keep = snapshot.pair_count.min(registry.all.len());
        let created: Vec<Arc<Pool>> = registry.all.drain(keep..).collect();
        for pool in created {
            registry.by_pair.remove(&pool.pair());
        }
        for (pool, state) in registry.all.iter().zip(&snapshot.pools) {
            pool.restore(state);
        }
    }
}
