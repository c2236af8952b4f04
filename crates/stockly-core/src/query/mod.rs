// ── Remote query cache ──
//
// Keyed, shared store of in-flight and last-known results per
// (resource, filters) pair. Constructed explicitly and injected; there
// is no process-wide instance.

mod cache;
mod key;
mod state;

pub use cache::{CacheStats, QueryCache, QueryHandle};
pub use key::{Filters, QueryKey, Resource};
pub use state::{QueryState, Snapshot};
