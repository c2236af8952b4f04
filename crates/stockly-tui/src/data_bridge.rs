//! Data bridge: cache observations to TUI actions.
//!
//! Each mounted tab gets one background task that owns the tab's
//! [`QueryHandle`](stockly_core::QueryHandle) and forwards every
//! published snapshot as an [`Action`]. Holding the handle is what makes
//! the tab an observer, so a mutation's invalidation refetches exactly
//! the tabs that have been opened. Tabs stay mounted once visited.
//!
//! Products and stock levels carry filters; changing them swaps the
//! observed query key.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use stockly_core::view::views;
use stockly_core::{
    Collection, Filters, Inventory, ListView, QueryKey, QueryState, Record, Resource, Snapshot,
    TabId,
};

use crate::action::{Action, Records, ViewFeed};

struct Feed {
    key: QueryKey,
    cancel: CancellationToken,
}

pub struct DataBridge {
    inventory: Inventory,
    action_tx: UnboundedSender<Action>,
    /// Parent of every feed's token.
    cancel: CancellationToken,
    feeds: HashMap<TabId, Feed>,
    filters: HashMap<TabId, Filters>,
}

impl DataBridge {
    pub fn new(inventory: Inventory, action_tx: UnboundedSender<Action>) -> Self {
        Self {
            inventory,
            action_tx,
            cancel: CancellationToken::new(),
            feeds: HashMap::new(),
            filters: HashMap::new(),
        }
    }

    pub fn is_mounted(&self, tab: TabId) -> bool {
        self.feeds.contains_key(&tab)
    }

    /// Query key currently observed for `tab`.
    pub fn key(&self, tab: TabId) -> Option<&QueryKey> {
        self.feeds.get(&tab).map(|f| &f.key)
    }

    /// Start observing `tab`, and whatever its filter choices come from.
    /// Already-mounted tabs are left alone.
    pub fn mount(&mut self, tab: TabId) {
        for &dep in depends_on(tab) {
            self.mount(dep);
        }
        if self.is_mounted(tab) {
            return;
        }
        let cancel = self.cancel.child_token();
        let key = self.spawn_feed(tab, cancel.clone());
        debug!(%tab, %key, "mounted tab");
        self.feeds.insert(tab, Feed { key, cancel });
    }

    /// Replace a tab's query. The old observation is dropped, so its key
    /// stops refetching on invalidation. Unmounted tabs just keep the
    /// filters for when they mount.
    pub fn set_filters(&mut self, tab: TabId, filters: Filters) {
        if self.filters.get(&tab) == Some(&filters) {
            return;
        }
        self.filters.insert(tab, filters);
        if let Some(old) = self.feeds.remove(&tab) {
            old.cancel.cancel();
            self.mount(tab);
        }
    }

    fn filters_for(&self, tab: TabId) -> Filters {
        self.filters.get(&tab).cloned().unwrap_or_default()
    }

    /// User-initiated retry of a mounted tab's query.
    pub fn retry(&self, tab: TabId) {
        let Some(feed) = self.feeds.get(&tab) else {
            return;
        };
        let cache = self.inventory.cache().clone();
        let key = feed.key.clone();
        tokio::spawn(async move {
            debug!(%key, "retrying");
            cache.invalidate_key(&key).await;
        });
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn spawn_feed(&self, tab: TabId, cancel: CancellationToken) -> QueryKey {
        let inv = &self.inventory;
        let tx = self.action_tx.clone();
        match tab {
            TabId::Dashboard => spawn_analytics(inv, tx, cancel),
            TabId::Products => spawn_view(
                inv,
                tab,
                views::products(self.filters_for(TabId::Products)),
                |c| Records::Products(Arc::clone(c)),
                tx,
                cancel,
            ),
            TabId::Categories => spawn_view(inv, tab, views::categories(), no_records, tx, cancel),
            TabId::Warehouses => spawn_view(
                inv,
                tab,
                views::warehouses(),
                |c| Records::Warehouses(Arc::clone(c)),
                tx,
                cancel,
            ),
            TabId::StockLevels => spawn_view(
                inv,
                tab,
                views::stock_levels(self.filters_for(TabId::StockLevels)),
                |c| Records::StockLevels(Arc::clone(c)),
                tx,
                cancel,
            ),
            TabId::Movements => spawn_view(inv, tab, views::movements(), no_records, tx, cancel),
            TabId::Adjustments => spawn_view(
                inv,
                tab,
                views::adjustments(),
                |c| Records::Adjustments(Arc::clone(c)),
                tx,
                cancel,
            ),
            TabId::SerialNumbers => {
                spawn_view(inv, tab, views::serial_numbers(), no_records, tx, cancel)
            }
            TabId::BatchNumbers => {
                spawn_view(inv, tab, views::batch_numbers(), no_records, tx, cancel)
            }
        }
    }
}

impl Drop for DataBridge {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Tabs whose feeds supply another tab's filter choices.
fn depends_on(tab: TabId) -> &'static [TabId] {
    match tab {
        TabId::StockLevels => &[TabId::Warehouses],
        _ => &[],
    }
}

fn no_records<T>(_: &Arc<Collection<T>>) -> Records {
    Records::None
}

/// Render one snapshot into a feed.
///
/// A retry after a failure shows the loading state rather than the stale
/// error; a refetch over good data keeps the table up.
pub fn feed_for<T>(
    tab: TabId,
    key: &QueryKey,
    view: &ListView<T>,
    snap: &Snapshot<Collection<T>>,
    records: fn(&Arc<Collection<T>>) -> Records,
) -> ViewFeed {
    let state = match &snap.state {
        QueryState::Failed(_) if snap.fetching => QueryState::Loading,
        other => other.clone(),
    };
    ViewFeed {
        tab,
        key: key.clone(),
        view: view.render(&state),
        refreshing: snap.fetching && state.data().is_some(),
        records: state.data().map_or(Records::None, records),
    }
}

fn spawn_view<T: Record>(
    inventory: &Inventory,
    tab: TabId,
    view: ListView<T>,
    records: fn(&Arc<Collection<T>>) -> Records,
    tx: UnboundedSender<Action>,
    cancel: CancellationToken,
) -> QueryKey {
    let mut handle = inventory.watch_view(&view);
    let key = handle.key().clone();
    let task_key = key.clone();

    tokio::spawn(async move {
        let send = |snap: &Snapshot<Collection<T>>| {
            let feed = feed_for(tab, &task_key, &view, snap, records);
            tx.send(Action::ViewUpdated(Box::new(feed))).is_ok()
        };
        if !send(&handle.snapshot()) {
            return;
        }
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                snap = handle.changed() => match snap {
                    Some(snap) if send(&snap) => {}
                    _ => break,
                },
            }
        }
        debug!(key = %task_key, "feed stopped");
    });

    key
}

fn spawn_analytics(
    inventory: &Inventory,
    tx: UnboundedSender<Action>,
    cancel: CancellationToken,
) -> QueryKey {
    let mut handle = inventory.watch_analytics();
    let key = QueryKey::new(Resource::Analytics);

    tokio::spawn(async move {
        if tx.send(Action::AnalyticsUpdated(handle.state())).is_err() {
            return;
        }
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                snap = handle.changed() => match snap {
                    Some(snap) => {
                        if tx.send(Action::AnalyticsUpdated(snap.state)).is_err() {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    });

    key
}
