// ── Inventory facade ──
//
// The main entry point for consumers. Owns the API client and an
// injected `QueryCache`; reads go through the cache, writes go through
// `execute` and invalidate what they touched.

use std::sync::Arc;

use tracing::{debug, info, warn};

use stockly_api::InventoryClient;

use crate::command::{Command, CommandResult};
use crate::config::InventoryConfig;
use crate::error::CoreError;
use crate::model::{InventoryAnalytics, Product, RecordId};
use crate::query::{Filters, QueryCache, QueryHandle, QueryKey, Resource};
use crate::record::{Collection, Record};
use crate::view::ListView;

/// Handle to one inventory API plus its query cache.
///
/// Cheaply cloneable via `Arc<InventoryInner>`.
#[derive(Clone)]
pub struct Inventory {
    inner: Arc<InventoryInner>,
}

struct InventoryInner {
    config: InventoryConfig,
    client: InventoryClient,
    cache: QueryCache,
}

impl Inventory {
    /// Build a facade over `cache`. Does no I/O.
    pub fn new(config: InventoryConfig, cache: QueryCache) -> Result<Self, CoreError> {
        let client = InventoryClient::new(config.api_url.as_str(), &config.transport())?;
        debug!(api_url = %config.api_url, "inventory client ready");
        Ok(Self {
            inner: Arc::new(InventoryInner {
                config,
                client,
                cache,
            }),
        })
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.inner.config
    }

    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    pub fn client(&self) -> &InventoryClient {
        &self.inner.client
    }

    // ── Collection reads ─────────────────────────────────────────────

    /// Observe a filtered collection. The handle refetches whenever the
    /// resource is invalidated while it is alive.
    pub fn watch<T: Record>(&self, filters: Filters) -> QueryHandle<Collection<T>> {
        let key = QueryKey::with_filters(T::RESOURCE, filters.clone());
        let client = self.inner.client.clone();
        self.inner
            .cache
            .watch(key, move || T::fetch(client.clone(), filters.clone()))
    }

    /// Observe the collection behind a list view.
    pub fn watch_view<T: Record>(&self, view: &ListView<T>) -> QueryHandle<Collection<T>> {
        self.watch::<T>(view.filters().clone())
    }

    /// One-off collection read through the cache.
    pub async fn list<T: Record>(
        &self,
        filters: Filters,
    ) -> Result<Arc<Collection<T>>, CoreError> {
        let key = QueryKey::with_filters(T::RESOURCE, filters.clone());
        let client = self.inner.client.clone();
        self.inner
            .cache
            .fetch(key, move || T::fetch(client.clone(), filters.clone()))
            .await
    }

    // ── Single records ───────────────────────────────────────────────

    /// Product detail, cached under the products resource so product
    /// mutations invalidate it too.
    pub async fn product(&self, id: &RecordId) -> Result<Arc<Product>, CoreError> {
        let filters = Filters::new().with("id", id.to_string());
        let key = QueryKey::with_filters(Resource::Products, filters);
        let client = self.inner.client.clone();
        let id = id.to_string();
        self.inner
            .cache
            .fetch(key, move || {
                let client = client.clone();
                let id = id.clone();
                async move {
                    let dto = client.get_product(&id).await?;
                    Ok::<_, CoreError>(Product::from(dto))
                }
            })
            .await
    }

    pub fn watch_analytics(&self) -> QueryHandle<InventoryAnalytics> {
        let client = self.inner.client.clone();
        self.inner
            .cache
            .watch(QueryKey::new(Resource::Analytics), move || {
                analytics(client.clone())
            })
    }

    pub async fn analytics(&self) -> Result<Arc<InventoryAnalytics>, CoreError> {
        let client = self.inner.client.clone();
        self.inner
            .cache
            .fetch(QueryKey::new(Resource::Analytics), move || {
                analytics(client.clone())
            })
            .await
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Run a command. On success each affected resource is invalidated
    /// exactly once; on failure the cache is left untouched. Never retries.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        cmd.validate()?;
        let verb = cmd.describe();
        let affected = cmd.affected_resources();

        let result = match route_command(&self.inner.client, cmd).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "{verb} failed");
                return Err(e);
            }
        };

        for resource in affected {
            self.inner.cache.invalidate(*resource).await;
        }
        info!("{verb} succeeded");
        Ok(result)
    }

    /// Delete a product after `confirm` agrees. Returns `false` without
    /// touching the network when the user declines.
    pub async fn delete_product(
        &self,
        id: RecordId,
        confirm: impl FnOnce() -> bool,
    ) -> Result<bool, CoreError> {
        if !confirm() {
            debug!(%id, "delete declined");
            return Ok(false);
        }
        self.execute(Command::DeleteProduct { id }).await?;
        Ok(true)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Tear down cached state.
    pub fn shutdown(&self) {
        self.inner.cache.clear();
    }

    /// Build, run `f`, shut down. For single request-response callers.
    pub async fn oneshot<F, Fut, T>(config: InventoryConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Inventory) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let inventory = Inventory::new(config, QueryCache::new())?;
        let result = f(inventory.clone()).await;
        inventory.shutdown();
        result
    }
}

async fn analytics(client: InventoryClient) -> Result<InventoryAnalytics, CoreError> {
    Ok(client.get_analytics().await?.into())
}

// ── Command routing ──────────────────────────────────────────────────

async fn route_command(
    client: &InventoryClient,
    cmd: Command,
) -> Result<CommandResult, CoreError> {
    match cmd {
        Command::CreateProduct(payload) => {
            let dto = client.create_product(&payload).await?;
            Ok(CommandResult::Product(dto.into()))
        }
        Command::UpdateProduct { id, payload } => {
            let dto = client.update_product(&id.to_string(), &payload).await?;
            Ok(CommandResult::Product(dto.into()))
        }
        Command::DeleteProduct { id } => {
            client.delete_product(&id.to_string()).await?;
            Ok(CommandResult::Ok)
        }
        Command::CreateCategory(payload) => {
            let dto = client.create_category(&payload).await?;
            Ok(CommandResult::Category(dto.into()))
        }
        Command::ApproveAdjustment { id } => {
            let dto = client.approve_adjustment(&id.to_string()).await?;
            Ok(CommandResult::Adjustment(dto.into()))
        }
        Command::RejectAdjustment { id } => {
            let dto = client.reject_adjustment(&id.to_string()).await?;
            Ok(CommandResult::Adjustment(dto.into()))
        }
    }
}
