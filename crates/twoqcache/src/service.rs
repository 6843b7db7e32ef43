//! Request handling on top of the cache
//!
//! Transport-independent half of a cache server: validates incoming
//! requests and maps cache results onto response messages or status codes.
//! A network layer only has to decode requests into these types and encode
//! the results.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn, Level};

use crate::cache::TwoQCache;
use crate::error::{Error, Result};
use crate::traits::Cache;

/// Store a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRequest<V> {
    /// Cache key
    pub key: Option<String>,
    /// Value to store
    pub value: Option<V>,
}

/// Stored value echoed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutResponse<V> {
    /// Value now held by the cache
    pub value: V,
}

/// Fetch a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    /// Cache key
    pub key: Option<String>,
}

/// Fetched value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetResponse<V> {
    /// Cached value
    pub value: V,
}

/// Delete a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveRequest {
    /// Cache key
    pub key: Option<String>,
}

/// Removal result; `None` when the key was not cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveResponse<V> {
    /// Value that was removed
    pub value: Option<V>,
}

/// Failure status returned to the remote caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Request was missing a required field
    InvalidArgument(String),
    /// Key is not cached
    NotFound,
    /// The cache failed internally
    Internal(String),
}

impl Status {
    /// Canonical status code name
    pub fn code(&self) -> &'static str {
        match self {
            Status::InvalidArgument(_) => "INVALID_ARGUMENT",
            Status::NotFound => "NOT_FOUND",
            Status::Internal(_) => "INTERNAL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InvalidArgument(msg) => write!(f, "{}: {}", self.code(), msg),
            Status::NotFound => f.write_str(self.code()),
            Status::Internal(msg) => write!(f, "{}: {}", self.code(), msg),
        }
    }
}

impl std::error::Error for Status {}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidArgument(msg) => Status::InvalidArgument(msg),
            other => Status::Internal(other.to_string()),
        }
    }
}

/// Put/get/remove handlers backed by a shared cache
pub struct CacheService<V> {
    cache: Arc<dyn Cache<String, V>>,
    /// Concrete cache kept for state dumps in debug logs
    inspect: Option<Arc<TwoQCache<String, V>>>,
}

impl<V> CacheService<V>
where
    V: Clone + Send + 'static,
{
    /// Build a service over a new 2Q cache.
    ///
    /// The capacity is taken as a signed integer, as it arrives from
    /// configuration or the wire.
    ///
    /// # Errors
    /// * `Error::InvalidConfiguration` - `capacity` is zero or negative
    pub fn with_capacity(capacity: i64) -> Result<Self> {
        let capacity = usize::try_from(capacity)
            .ok()
            .filter(|&c| c >= 1)
            .ok_or_else(|| {
                Error::InvalidConfiguration(format!(
                    "capacity must be at least 1, got {}",
                    capacity
                ))
            })?;
        Ok(Self::new(Arc::new(TwoQCache::new(capacity)?)))
    }

    /// Build a service over an existing 2Q cache
    pub fn new(cache: Arc<TwoQCache<String, V>>) -> Self {
        Self {
            cache: cache.clone(),
            inspect: Some(cache),
        }
    }

    /// Build a service over any [`Cache`] implementation
    pub fn from_cache(cache: Arc<dyn Cache<String, V>>) -> Self {
        Self {
            cache,
            inspect: None,
        }
    }

    /// Store a value
    pub fn put_in_cache(
        &self,
        request: PutRequest<V>,
    ) -> std::result::Result<PutResponse<V>, Status> {
        let key = require_key(request.key, "put")?;
        let value = request.value.ok_or_else(|| {
            warn!(op = "put", "rejected request without value");
            Status::InvalidArgument("value is required".to_string())
        })?;

        let value = self.cache.put(key, value)?;
        self.trace_state("put");
        Ok(PutResponse { value })
    }

    /// Fetch a value; a missing key is reported as [`Status::NotFound`]
    pub fn get_from_cache(&self, request: GetRequest) -> std::result::Result<GetResponse<V>, Status> {
        let key = require_key(request.key, "get")?;

        let found = self.cache.get(&key)?;
        self.trace_state("get");
        match found {
            Some(value) => Ok(GetResponse { value }),
            None => Err(Status::NotFound),
        }
    }

    /// Delete a value; deleting a missing key succeeds
    pub fn remove_from_cache(
        &self,
        request: RemoveRequest,
    ) -> std::result::Result<RemoveResponse<V>, Status> {
        let key = require_key(request.key, "remove")?;

        let value = self.cache.remove(&key);
        self.trace_state("remove");
        Ok(RemoveResponse { value })
    }

    fn trace_state(&self, op: &str) {
        if !tracing::enabled!(Level::DEBUG) {
            return;
        }
        if let Some(cache) = &self.inspect {
            debug!(op, cache = ?cache, "request handled");
        } else {
            debug!(op, "request handled");
        }
    }
}

fn require_key(key: Option<String>, op: &str) -> std::result::Result<String, Status> {
    key.ok_or_else(|| {
        warn!(op, "rejected request without key");
        Status::InvalidArgument("key is required".to_string())
    })
}
