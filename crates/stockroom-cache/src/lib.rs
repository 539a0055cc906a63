//! Client-side query cache for Stockroom.
//!
//! One entry per query key, overwritten in place on refetch. Concurrent
//! fetches for a key coalesce onto the in-flight load, and the entry always
//! reflects the most recently issued load (last-issued-wins). Mutations mark
//! whole cache families stale through [`InvalidateFamily`]; the next access
//! re-runs the loader.

pub mod entry;
pub mod key;
pub mod store;

pub use entry::{CacheSnapshot, QueryStatus};
pub use key::QueryKey;
pub use store::{DEFAULT_FETCH_TIMEOUT, InvalidateFamily, QueryCache};
