//! Cache abstraction consumed by request handlers

use crate::error::Result;

/// Minimal key/value cache contract.
///
/// Handlers hold a `dyn Cache` so the replacement policy can be swapped
/// without touching request plumbing.
pub trait Cache<K, V>: Send + Sync {
    /// Store `value` under `key` and return the stored value
    fn put(&self, key: K, value: V) -> Result<V>;

    /// Fetch the value for `key`, `Ok(None)` when absent
    fn get(&self, key: &K) -> Result<Option<V>>;

    /// Delete `key`, returning its value if present
    fn remove(&self, key: &K) -> Option<V>;
}
