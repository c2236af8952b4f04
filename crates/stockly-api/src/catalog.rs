// Product and category endpoints
//
// `inventory/products` is the only paginated collection; categories come
// back as a bare array.

use tracing::debug;

use crate::client::InventoryClient;
use crate::error::Error;
use crate::types::{
    CategoryDto, CategoryPayload, ListPayload, ProductDto, ProductPayload, ProductQuery,
};

impl InventoryClient {
    /// List products, optionally filtered and paginated.
    ///
    /// `GET inventory/products?page&limit&search&category&status`
    pub async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ListPayload<ProductDto>, Error> {
        self.get_with_params("inventory/products", &query.to_params())
            .await
    }

    /// Fetch a single product.
    ///
    /// `GET inventory/products/{id}`
    pub async fn get_product(&self, id: &str) -> Result<ProductDto, Error> {
        self.get(&format!("inventory/products/{id}")).await
    }

    /// `POST inventory/products`
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<ProductDto, Error> {
        debug!(sku = ?payload.sku, "creating product");
        self.post("inventory/products", payload).await
    }

    /// Update the fields set in `payload`.
    ///
    /// `PUT inventory/products/{id}`
    pub async fn update_product(
        &self,
        id: &str,
        payload: &ProductPayload,
    ) -> Result<ProductDto, Error> {
        debug!(id, "updating product");
        self.put(&format!("inventory/products/{id}"), payload).await
    }

    /// Delete (deactivate) a product. The server answers without a body.
    ///
    /// `DELETE inventory/products/{id}`
    pub async fn delete_product(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting product");
        self.delete(&format!("inventory/products/{id}")).await
    }

    /// `GET inventory/categories`
    pub async fn list_categories(&self) -> Result<ListPayload<CategoryDto>, Error> {
        self.get("inventory/categories").await
    }

    /// `POST inventory/categories`
    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<CategoryDto, Error> {
        debug!(name = %payload.name, "creating category");
        self.post("inventory/categories", payload).await
    }
}
