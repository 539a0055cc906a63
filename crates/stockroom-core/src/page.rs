//! One fetched page of a listed resource.

use serde::{Deserialize, Serialize};

/// A page of items plus the resource's total server-side row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Number of pages at the given page size. Zero rows means zero pages.
    pub fn page_count(&self, page_size: u32) -> u32 {
        page_count(self.total_count, page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `ceil(total / page_size)`.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64) as u32
}
