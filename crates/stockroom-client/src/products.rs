//! Product endpoints.

use crate::http::{ApiClient, ListResponse};
use reqwest::Method;
use stockroom_core::product::{Product, ProductCreate, ProductUpdate};
use stockroom_core::{Page, ProductId, Result};

impl ApiClient {
    pub async fn list_products(&self, skip: u32, limit: u32) -> Result<Page<Product>> {
        let path = format!("/products/?skip={}&limit={}", skip, limit);
        let res = Self::send(self.request(Method::GET, &path)).await?;
        let body: ListResponse<Product> = Self::json(res).await?;
        Ok(body.into_page())
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product> {
        let path = format!("/products/{}", id.as_uuid());
        let res = Self::send(self.request(Method::GET, &path)).await?;
        Self::json(res).await
    }

    pub async fn create_product(&self, body: &ProductCreate) -> Result<Product> {
        tracing::debug!(sku = %body.sku, "creating product");
        let res = Self::send(self.request(Method::POST, "/products/").json(body)).await?;
        Self::json(res).await
    }

    pub async fn update_product(&self, id: ProductId, body: &ProductUpdate) -> Result<Product> {
        tracing::debug!(%id, "updating product");
        let path = format!("/products/{}", id.as_uuid());
        let res = Self::send(self.request(Method::PUT, &path).json(body)).await?;
        Self::json(res).await
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        tracing::debug!(%id, "deleting product");
        let path = format!("/products/{}", id.as_uuid());
        Self::send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
