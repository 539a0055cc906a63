//! Product entity and its mutation payloads.

use crate::ids::{CategoryId, ProductId};
use crate::validate::{Validate, require_non_empty, require_non_negative, require_some};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: f64,
    pub quantity: u32,
    pub in_stock: bool,
    pub image_url: Option<String>,
    pub is_active: bool,
    /// Every product belongs to an existing category.
    pub category_id: CategoryId,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Cache-family identifier for product listings.
    pub const RESOURCE: &'static str = "products";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sku: String,
    pub price: f64,
    pub quantity: u32,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
    /// Optional in the form so validation can report it; required at dispatch.
    pub category_id: Option<CategoryId>,
}

impl Default for ProductCreate {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            sku: String::new(),
            price: 0.0,
            quantity: 0,
            in_stock: true,
            image_url: None,
            is_active: true,
            category_id: None,
        }
    }
}

impl Validate for ProductCreate {
    fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("sku", &self.sku)?;
        require_non_negative("price", self.price)?;
        require_some("category_id", &self.category_id)?;
        Ok(())
    }
}

/// Partial update; unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl Validate for ProductUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(sku) = &self.sku {
            require_non_empty("sku", sku)?;
        }
        if let Some(price) = self.price {
            require_non_negative("price", price)?;
        }
        Ok(())
    }
}

impl Validate for ProductId {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl From<&Product> for ProductUpdate {
    fn from(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            description: product.description.clone(),
            sku: Some(product.sku.clone()),
            price: Some(product.price),
            quantity: Some(product.quantity),
            in_stock: Some(product.in_stock),
            image_url: product.image_url.clone(),
            is_active: Some(product.is_active),
            category_id: Some(product.category_id),
        }
    }
}
