//! Category entity and its mutation payloads.

use crate::ids::CategoryId;
use crate::validate::{Validate, require_non_empty};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

impl Category {
    /// Cache-family identifier for category listings.
    pub const RESOURCE: &'static str = "categories";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
}

impl Validate for CategoryCreate {
    fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)
    }
}

/// Partial update; unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
}

impl Validate for CategoryUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        Ok(())
    }
}

impl Validate for CategoryId {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl From<&Category> for CategoryUpdate {
    fn from(category: &Category) -> Self {
        Self {
            name: Some(category.name.clone()),
            parent_id: category.parent_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        let payload = CategoryCreate {
            name: String::new(),
            parent_id: None,
        };
        let err = payload.validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "name", .. }));
    }

    #[test]
    fn test_update_allows_unset_name() {
        let payload = CategoryUpdate::default();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let payload = CategoryUpdate {
            name: Some("  ".into()),
            parent_id: None,
        };
        assert!(payload.validate().is_err());
    }
}
