//! # twoqcache
//!
//! Bounded in-process key/value cache using the 2Q replacement policy.
//!
//! ## Architecture
//! - **HashMap**: AHash map holding every cached value (O(1))
//! - **Segments**: three slab-backed linked queues (O(1) touch/evict)
//!   - In: FIFO, 20% of capacity
//!   - Out: FIFO, 60% of capacity
//!   - Hot: LRU, 20% of capacity
//! - **Locking**: one `parking_lot::Mutex` serializes every operation
//! - **Service**: request validation and status mapping for a remote front end
//!
//! ```
//! use twoqcache::{Segment, TwoQCache};
//!
//! let cache = TwoQCache::new(10).unwrap();
//! cache.put("a".to_string(), 1).unwrap();
//! assert_eq!(cache.get("a").unwrap(), Some(1));
//! assert_eq!(cache.segment_of("a"), Some(Segment::In));
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod queue;
mod service;
mod stats;
mod traits;

pub use cache::{Segment, SegmentSnapshot, TwoQCache};
pub use config::{CacheConfig, Capacities, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use service::{
    CacheService, GetRequest, GetResponse, PutRequest, PutResponse, RemoveRequest,
    RemoveResponse, Status,
};
pub use stats::CacheStats;
pub use traits::Cache;
