//! Pagination controller.
//!
//! Derives skip/limit offsets from a 1-based page number and publishes the
//! current page through a watch channel. Out-of-range and non-numeric page
//! values coerce silently to page 1; setting a page never fetches by
//! itself.

use tokio::sync::watch;

/// Lowest valid page number.
pub const FIRST_PAGE: u32 = 1;

/// Parses a page value from user input, falling back to page 1 for
/// anything that is not a positive integer.
pub fn parse_page(text: &str) -> u32 {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= FIRST_PAGE)
        .unwrap_or(FIRST_PAGE)
}

/// `(skip, limit)` for the given page. Pages below 1 clamp to 1.
pub fn compute_offsets(page: u32, page_size: u32) -> (u32, u32) {
    let page = page.max(FIRST_PAGE);
    ((page - 1) * page_size, page_size)
}

/// Pins a page into `[1, page_count]`; an empty resource counts as one page.
pub fn clamp_page(page: u32, page_count: u32) -> u32 {
    page.max(FIRST_PAGE).min(page_count.max(FIRST_PAGE))
}

pub fn has_prev(page: u32) -> bool {
    page > FIRST_PAGE
}

pub fn has_next(page: u32, page_count: u32) -> bool {
    page < page_count
}

/// Holds a view's page size and its current-page signal.
pub struct Paginator {
    page_size: u32,
    page: watch::Sender<u32>,
}

impl Paginator {
    pub fn new(page_size: u32) -> Self {
        let (page, _) = watch::channel(FIRST_PAGE);
        Self { page_size, page }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        *self.page.borrow()
    }

    /// Updates the page signal. Fetching is the cache's reaction, not a
    /// side effect of this call.
    pub fn set_page(&self, page: u32) {
        self.page.send_replace(page.max(FIRST_PAGE));
    }

    /// Subscribes to page transitions.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.page.subscribe()
    }

    pub fn offsets(&self) -> (u32, u32) {
        compute_offsets(self.current_page(), self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_offsets() {
        assert_eq!(compute_offsets(1, 10), (0, 10));
        assert_eq!(compute_offsets(2, 10), (10, 10));
        assert_eq!(compute_offsets(3, 5), (10, 5));
    }

    #[test]
    fn test_compute_offsets_clamps_low_pages() {
        assert_eq!(compute_offsets(0, 10), (0, 10));
    }

    #[test]
    fn test_parse_page_coerces_invalid_input() {
        assert_eq!(parse_page("3"), 3);
        assert_eq!(parse_page(" 2 "), 2);
        assert_eq!(parse_page("abc"), 1);
        assert_eq!(parse_page("-5"), 1);
        assert_eq!(parse_page("0"), 1);
        assert_eq!(parse_page(""), 1);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(4, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(1, 0), 1);
    }

    #[test]
    fn test_boundary_affordances() {
        assert!(!has_prev(1));
        assert!(has_prev(2));
        assert!(has_next(2, 3));
        assert!(!has_next(3, 3));
        assert!(!has_next(1, 0));
    }

    #[test]
    fn test_paginator_signal() {
        let paginator = Paginator::new(5);
        let mut rx = paginator.subscribe();

        assert_eq!(paginator.current_page(), 1);
        paginator.set_page(3);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 3);
        assert_eq!(paginator.offsets(), (10, 5));
    }

    #[test]
    fn test_paginator_set_page_clamps() {
        let paginator = Paginator::new(5);
        paginator.set_page(0);
        assert_eq!(paginator.current_page(), 1);
    }
}
