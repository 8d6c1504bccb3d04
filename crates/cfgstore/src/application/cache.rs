//! Per-path cache of coerced config values.
//!
//! Every typed read on a store goes through [`ValueCache::get_or_insert_with`]:
//!
//! ```text
//! get_int("max-retries")
//!   └─ cache hit?  ── yes ──► cached value
//!        │
//!        no
//!        └─ read document, coerce, store, return the computed value
//! ```
//!
//! Entries are keyed by path **and** [`Accessor`], so reading the same path
//! as an int and as a string yields two independent entries instead of one
//! accessor observing the other's type.  The int accessor carries its
//! default in the key: `get_int("x")` and `get_int_or("x", 3)` never hand
//! out each other's fallback.
//!
//! Entries never expire individually.  The only invalidation is
//! [`ValueCache::clear`], which drops everything.
//!
//! The map sits behind a `Mutex` so a store shared through an `Arc` can be
//! read from several threads.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cfgstore_core::ConfigSection;
use tracing::trace;

/// Which typed getter produced a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    Int { default: i64 },
    Bool,
    Double,
    String,
    Ints,
    Bools,
    Doubles,
    Strings,
    Section,
}

/// A coerced value as stored in the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Int(i64),
    Bool(bool),
    Double(f64),
    String(String),
    Ints(Vec<i64>),
    Bools(Vec<bool>),
    Doubles(Vec<f64>),
    Strings(Vec<String>),
    /// Section lookups cache their miss as well.
    Section(Option<ConfigSection>),
}

/// Conversion between a getter's return type and [`CachedValue`].
pub trait Cacheable: Clone {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: &CachedValue) -> Option<Self>;
}

macro_rules! impl_cacheable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Cacheable for $ty {
                fn into_cached(self) -> CachedValue {
                    CachedValue::$variant(self)
                }

                fn from_cached(value: &CachedValue) -> Option<Self> {
                    match value {
                        CachedValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_cacheable! {
    i64 => Int,
    bool => Bool,
    f64 => Double,
    String => String,
    Vec<i64> => Ints,
    Vec<bool> => Bools,
    Vec<f64> => Doubles,
    Vec<String> => Strings,
    Option<ConfigSection> => Section,
}

/// Mutex-guarded map from `(path, accessor)` to [`CachedValue`].
#[derive(Debug, Default)]
pub struct ValueCache {
    entries: Mutex<HashMap<String, HashMap<Accessor, CachedValue>>>,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `(path, accessor)`, or runs `compute`,
    /// caches its result, and returns it.
    ///
    /// `compute` runs while the cache lock is held, so it must not call back
    /// into this cache.
    pub fn get_or_insert_with<T, F>(&self, path: &str, accessor: Accessor, compute: F) -> T
    where
        T: Cacheable,
        F: FnOnce() -> T,
    {
        let mut entries = self.lock();
        if let Some(hit) = entries
            .get(path)
            .and_then(|by_accessor| by_accessor.get(&accessor))
            .and_then(T::from_cached)
        {
            return hit;
        }

        trace!("cache miss for {path} ({accessor:?})");
        let value = compute();
        entries
            .entry(path.to_string())
            .or_default()
            .insert(accessor, value.clone().into_cached());
        value
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Total number of cached `(path, accessor)` entries.
    pub fn len(&self) -> usize {
        self.lock().values().map(HashMap::len).sum()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, HashMap<Accessor, CachedValue>>> {
        // A panic inside `compute` cannot leave the map half-updated: the
        // insert happens after `compute` returns.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
