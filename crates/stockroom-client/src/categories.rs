//! Category endpoints.

use crate::http::{ApiClient, ListResponse};
use reqwest::Method;
use stockroom_core::category::{Category, CategoryCreate, CategoryUpdate};
use stockroom_core::{CategoryId, Page, Result};

impl ApiClient {
    pub async fn list_categories(&self, skip: u32, limit: u32) -> Result<Page<Category>> {
        let path = format!("/categories/?skip={}&limit={}", skip, limit);
        let res = Self::send(self.request(Method::GET, &path)).await?;
        let body: ListResponse<Category> = Self::json(res).await?;
        Ok(body.into_page())
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Category> {
        let path = format!("/categories/{}", id.as_uuid());
        let res = Self::send(self.request(Method::GET, &path)).await?;
        Self::json(res).await
    }

    pub async fn create_category(&self, body: &CategoryCreate) -> Result<Category> {
        tracing::debug!(name = %body.name, "creating category");
        let res = Self::send(self.request(Method::POST, "/categories/").json(body)).await?;
        Self::json(res).await
    }

    pub async fn update_category(&self, id: CategoryId, body: &CategoryUpdate) -> Result<Category> {
        tracing::debug!(%id, "updating category");
        let path = format!("/categories/{}", id.as_uuid());
        let res = Self::send(self.request(Method::PATCH, &path).json(body)).await?;
        Self::json(res).await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<()> {
        tracing::debug!(%id, "deleting category");
        let path = format!("/categories/{}", id.as_uuid());
        // the backend responds with a confirmation message body; discard it
        Self::send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
