//! Paginated resource view model.

use crate::display::{DisplayPage, display_page};
use crate::pager::{self, Paginator};
use std::future::Future;
use stockroom_cache::{InvalidateFamily, QueryCache, QueryKey};
use stockroom_core::category::Category;
use stockroom_core::product::Product;
use stockroom_core::{Page, Result};

/// The application's caches, one per resource family. Constructed at
/// startup and handed to the components that need it; dropped at shutdown.
#[derive(Clone, Default)]
pub struct CacheSet {
    pub categories: QueryCache<Category>,
    pub products: QueryCache<Product>,
}

impl CacheSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InvalidateFamily for CacheSet {
    fn invalidate_family(&self, resource: &str) {
        match resource {
            Category::RESOURCE => self.categories.invalidate_family(resource),
            Product::RESOURCE => self.products.invalidate_family(resource),
            other => tracing::warn!(resource = other, "unknown cache family"),
        }
    }
}

/// One table render's worth of state.
#[derive(Debug, Clone)]
pub struct TableView<T> {
    pub page: u32,
    pub page_count: u32,
    pub total_count: u64,
    pub items: Vec<T>,
    pub is_placeholder: bool,
    pub error: Option<String>,
    pub has_prev: bool,
    pub has_next: bool,
}

/// A paginated listing of one resource: pager plus cache plus the memory
/// of the last displayed page for the placeholder fallback.
pub struct PagedView<T> {
    resource: &'static str,
    paginator: Paginator,
    cache: QueryCache<T>,
    previous: Option<Page<T>>,
}

impl<T: Clone> PagedView<T> {
    pub fn new(resource: &'static str, page_size: u32, cache: QueryCache<T>) -> Self {
        Self {
            resource,
            paginator: Paginator::new(page_size),
            cache,
            previous: None,
        }
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn key(&self, page: u32) -> QueryKey {
        QueryKey::new(self.resource, page)
    }

    /// Synchronous peek at what the table should show for `page` right
    /// now: the entry's data if it has any, otherwise the previously
    /// displayed page as a placeholder. Never fetches.
    pub fn read(&self, page: u32) -> Option<TableView<T>> {
        let page = page.max(pager::FIRST_PAGE);
        let snapshot = self.cache.get(&self.key(page));
        display_page(snapshot.as_ref(), self.previous.as_ref())
            .map(|display| self.table(page, display))
    }

    /// Loads the requested page through the cache, silently clamping
    /// out-of-range requests against the fresh total, then publishes the
    /// page signal and remembers the result for the placeholder fallback.
    pub async fn load<F, Fut>(&mut self, requested: u32, loader: F) -> Result<TableView<T>>
    where
        F: Fn(u32, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let mut page = requested.max(pager::FIRST_PAGE);
        let mut fetched = self.fetch_page(page, &loader).await?;

        let clamped = pager::clamp_page(page, fetched.page_count(self.paginator.page_size()));
        if clamped != page {
            tracing::debug!(resource = self.resource, requested = page, clamped, "page out of range");
            page = clamped;
            fetched = self.fetch_page(page, &loader).await?;
        }

        self.paginator.set_page(page);
        self.previous = Some(fetched.clone());
        Ok(self.table(
            page,
            DisplayPage {
                page: fetched,
                is_placeholder: false,
                error: None,
            },
        ))
    }

    /// Re-reads the page currently shown; stale entries re-run the loader.
    pub async fn refresh<F, Fut>(&mut self, loader: F) -> Result<TableView<T>>
    where
        F: Fn(u32, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        self.load(self.paginator.current_page(), loader).await
    }

    async fn fetch_page<F, Fut>(&self, page: u32, loader: &F) -> Result<Page<T>>
    where
        F: Fn(u32, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let (skip, limit) = pager::compute_offsets(page, self.paginator.page_size());
        self.cache
            .fetch(&self.key(page), || loader(skip, limit))
            .await
    }

    fn table(&self, page: u32, display: DisplayPage<T>) -> TableView<T> {
        let page_count = display.page.page_count(self.paginator.page_size());
        TableView {
            page,
            page_count,
            total_count: display.page.total_count,
            items: display.page.items,
            is_placeholder: display.is_placeholder,
            error: display.error,
            has_prev: pager::has_prev(page),
            has_next: pager::has_next(page, page_count),
        }
    }
}
