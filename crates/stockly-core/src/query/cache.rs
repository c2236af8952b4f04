// ── Keyed query cache ──
//
// One entry per `QueryKey`, each with its own `watch` channel. Loads are
// shared futures so concurrent readers of a key join a single request.
// Invalidation marks entries stale and refetches only the ones somebody
// is watching.

use std::any::Any;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared, join_all};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, trace};

use super::key::{QueryKey, Resource};
use super::state::{QueryState, Snapshot};
use crate::error::CoreError;

type Payload = Arc<dyn Any + Send + Sync>;
type LoadResult = Result<Payload, Arc<CoreError>>;
type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, LoadResult> + Send + Sync>;
type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Entry ────────────────────────────────────────────────────────────

struct Entry {
    key: QueryKey,
    snapshot: watch::Sender<Snapshot<dyn Any + Send + Sync>>,
    fetcher: Mutex<Option<Fetcher>>,
    in_flight: Mutex<Option<SharedLoad>>,
    /// Bumped on invalidation; loads from an older generation never publish.
    generation: AtomicU64,
    observers: AtomicUsize,
}

impl Entry {
    fn new(key: QueryKey) -> Self {
        let (snapshot, _) = watch::channel(Snapshot::initial());
        Self {
            key,
            snapshot,
            fetcher: Mutex::new(None),
            in_flight: Mutex::new(None),
            generation: AtomicU64::new(0),
            observers: AtomicUsize::new(0),
        }
    }

    fn observers(&self) -> usize {
        self.observers.load(Ordering::Acquire)
    }

    /// Fresh data is cached and nothing invalidated it since.
    fn fresh(&self) -> Option<Payload> {
        let snap = self.snapshot.borrow();
        match (&snap.state, snap.stale) {
            (QueryState::Ready(payload), false) => Some(Arc::clone(payload)),
            _ => None,
        }
    }

    /// Never loaded, or invalidated since the last load.
    fn needs_load(&self) -> bool {
        let snap = self.snapshot.borrow();
        !snap.fetching && (snap.stale || snap.state.is_loading())
    }

    fn mark_stale(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        lock(&self.in_flight).take();
        self.snapshot.send_modify(|snap| {
            snap.stale = true;
            snap.fetching = false;
        });
    }

    fn publish(&self, generation: u64, result: &LoadResult) {
        if self.generation.load(Ordering::Acquire) != generation {
            trace!(key = %self.key, "discarding superseded load");
            return;
        }
        lock(&self.in_flight).take();
        self.snapshot.send_modify(|snap| {
            snap.state = match result {
                Ok(payload) => QueryState::Ready(Arc::clone(payload)),
                Err(err) => QueryState::Failed(Arc::clone(err)),
            };
            snap.stale = false;
            snap.fetching = false;
        });
    }
}

// ── Stats ────────────────────────────────────────────────────────────

/// Counters for loads started and invalidations requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Network loads started (deduplicated joins are not counted).
    pub loads: u64,
    /// Joins onto an already in-flight load.
    pub deduplicated: u64,
    /// Calls to `invalidate` / `invalidate_key`.
    pub invalidations: u64,
}

// ── QueryCache ───────────────────────────────────────────────────────

/// Shared cache of remote query results.
///
/// Cheaply cloneable via `Arc`. Build one per application (or per test)
/// with [`QueryCache::new`] and tear it down with [`QueryCache::clear`].
#[derive(Clone, Default)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    entries: DashMap<QueryKey, Arc<Entry>>,
    loads: AtomicU64,
    deduplicated: AtomicU64,
    invalidations: AtomicU64,
    invalidations_by_resource: DashMap<Resource, u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Observe a query. Starts a load when the entry is new or stale.
    ///
    /// The returned handle counts as an observer until dropped, which is
    /// what makes [`invalidate`](Self::invalidate) refetch this key.
    pub fn watch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryHandle<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let entry = self.entry_with(key, fetcher);
        entry.observers.fetch_add(1, Ordering::AcqRel);
        if entry.needs_load() {
            drop(self.start_load(&entry));
        }

        QueryHandle {
            cache: self.clone(),
            rx: entry.snapshot.subscribe(),
            entry,
            _marker: PhantomData,
        }
    }

    /// One-off read: the cached value when fresh, otherwise a load.
    ///
    /// Does not register an observer.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Arc<T>, CoreError>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let entry = self.entry_with(key, fetcher);
        if let Some(payload) = entry.fresh() {
            trace!(key = %entry.key, "cache hit");
            return downcast(&entry.key, payload);
        }

        let load = self.start_load(&entry);
        match load.await {
            Ok(payload) => downcast(&entry.key, payload),
            Err(err) => Err((*err).clone()),
        }
    }

    /// Number of live handles watching `key`.
    pub fn observer_count(&self, key: &QueryKey) -> usize {
        self.inner
            .entries
            .get(key)
            .map_or(0, |entry| entry.observers())
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    // ── Invalidation ─────────────────────────────────────────────────

    /// Mark every entry of `resource` stale and refetch the observed ones.
    ///
    /// Refetches run concurrently and are awaited. Returns how many were
    /// issued; zero (and no network traffic) when nobody is watching.
    pub async fn invalidate(&self, resource: Resource) -> usize {
        self.count_invalidation(resource);
        let entries: Vec<Arc<Entry>> = self
            .inner
            .entries
            .iter()
            .filter(|e| e.key().resource == resource)
            .map(|e| Arc::clone(e.value()))
            .collect();

        let refetched = self.refresh(entries).await;
        debug!(%resource, refetched, "invalidated");
        refetched
    }

    /// [`invalidate`](Self::invalidate) for one exact key.
    pub async fn invalidate_key(&self, key: &QueryKey) -> usize {
        self.count_invalidation(key.resource);
        let entries: Vec<Arc<Entry>> = self
            .inner
            .entries
            .get(key)
            .map(|e| Arc::clone(e.value()))
            .into_iter()
            .collect();

        let refetched = self.refresh(entries).await;
        debug!(%key, refetched, "invalidated key");
        refetched
    }

    // ── Lifecycle & stats ────────────────────────────────────────────

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            loads: self.inner.loads.load(Ordering::Relaxed),
            deduplicated: self.inner.deduplicated.load(Ordering::Relaxed),
            invalidations: self.inner.invalidations.load(Ordering::Relaxed),
        }
    }

    /// Invalidations requested for one resource.
    pub fn invalidations_of(&self, resource: Resource) -> u64 {
        self.inner
            .invalidations_by_resource
            .get(&resource)
            .map_or(0, |n| *n)
    }

    /// Drop every entry. Live handles keep their last snapshot.
    pub fn clear(&self) {
        let dropped = self.inner.entries.len();
        self.inner.entries.clear();
        debug!(dropped, "query cache cleared");
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn entry_with<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Arc<Entry>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let entry = Arc::clone(
            self.inner
                .entries
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Entry::new(key)))
                .value(),
        );

        let erased: Fetcher = Arc::new(move || {
            let fut = fetcher();
            async move {
                fut.await
                    .map(|value| Arc::new(value) as Payload)
                    .map_err(Arc::new)
            }
            .boxed()
        });
        *lock(&entry.fetcher) = Some(erased);
        entry
    }

    /// Join the in-flight load for `entry`, or spawn a new one.
    fn start_load(&self, entry: &Arc<Entry>) -> SharedLoad {
        let mut slot = lock(&entry.in_flight);
        if let Some(load) = slot.as_ref() {
            trace!(key = %entry.key, "joining in-flight load");
            self.inner.deduplicated.fetch_add(1, Ordering::Relaxed);
            return load.clone();
        }

        let fetcher = lock(&entry.fetcher).clone();
        let generation = entry.generation.load(Ordering::Acquire);
        let target = Arc::clone(entry);

        let load = async move {
            let result = match fetcher {
                Some(fetch) => fetch().await,
                None => Err(Arc::new(CoreError::Internal(format!(
                    "no fetcher registered for {}",
                    target.key
                )))),
            };
            target.publish(generation, &result);
            result
        }
        .boxed()
        .shared();

        debug!(key = %entry.key, "loading query");
        self.inner.loads.fetch_add(1, Ordering::Relaxed);
        entry.snapshot.send_modify(|snap| snap.fetching = true);
        *slot = Some(load.clone());
        drop(slot);

        // Drive the load even if every caller stops polling it.
        tokio::spawn(load.clone());
        load
    }

    async fn refresh(&self, entries: Vec<Arc<Entry>>) -> usize {
        let mut loads = Vec::new();
        for entry in entries {
            entry.mark_stale();
            if entry.observers() > 0 {
                loads.push(self.start_load(&entry));
            } else {
                trace!(key = %entry.key, "stale without observers, not refetching");
            }
        }
        let refetched = loads.len();
        join_all(loads).await;
        refetched
    }

    fn count_invalidation(&self, resource: Resource) {
        self.inner.invalidations.fetch_add(1, Ordering::Relaxed);
        *self
            .inner
            .invalidations_by_resource
            .entry(resource)
            .or_insert(0) += 1;
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, payload: Payload) -> Result<Arc<T>, CoreError> {
    payload.downcast::<T>().map_err(|_| {
        CoreError::Internal(format!("cached value for {key} has an unexpected type"))
    })
}

// ── QueryHandle ──────────────────────────────────────────────────────

/// A live observation of one cached query.
///
/// Dropping the handle unregisters the observer.
pub struct QueryHandle<T> {
    cache: QueryCache,
    entry: Arc<Entry>,
    rx: watch::Receiver<Snapshot<dyn Any + Send + Sync>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> QueryHandle<T> {
    pub fn key(&self) -> &QueryKey {
        &self.entry.key
    }

    /// Current state.
    pub fn state(&self) -> QueryState<T> {
        self.snapshot().state
    }

    /// Current state with freshness flags.
    pub fn snapshot(&self) -> Snapshot<T> {
        typed(&self.entry.key, &self.rx.borrow())
    }

    /// Wait for the next published change.
    ///
    /// Returns `None` once the entry can no longer change.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.rx.changed().await.ok()?;
        Some(typed(&self.entry.key, &self.rx.borrow_and_update()))
    }

    /// Wait until nothing is in flight and a result is available.
    pub async fn settled(&mut self) -> QueryState<T> {
        loop {
            {
                let snap = self.rx.borrow_and_update();
                if snap.is_settled() {
                    return typed(&self.entry.key, &snap).state;
                }
            }
            if self.rx.changed().await.is_err() {
                return self.state();
            }
        }
    }

    /// User-initiated retry: invalidate this key and wait for the result.
    pub async fn refetch(&mut self) -> QueryState<T> {
        self.cache.invalidate_key(&self.entry.key).await;
        self.settled().await
    }

    /// Stream of snapshots, starting with the current one.
    pub fn into_stream(self) -> impl Stream<Item = Snapshot<T>> + Send + 'static {
        let key = self.entry.key.clone();
        let rx = self.rx.clone();
        // `self` moves into the closure so the observer stays registered.
        WatchStream::new(rx).map(move |snap| {
            let _keep = &self;
            typed(&key, &snap)
        })
    }
}

impl<T> Drop for QueryHandle<T> {
    fn drop(&mut self) {
        self.entry.observers.fetch_sub(1, Ordering::AcqRel);
    }
}

fn typed<T: Send + Sync + 'static>(
    key: &QueryKey,
    snap: &Snapshot<dyn Any + Send + Sync>,
) -> Snapshot<T> {
    let state = match &snap.state {
        QueryState::Loading => QueryState::Loading,
        QueryState::Failed(err) => QueryState::Failed(Arc::clone(err)),
        QueryState::Ready(payload) => match downcast::<T>(key, Arc::clone(payload)) {
            Ok(value) => QueryState::Ready(value),
            Err(err) => QueryState::Failed(Arc::new(err)),
        },
    };
    Snapshot {
        state,
        stale: snap.stale,
        fetching: snap.fetching,
    }
}
