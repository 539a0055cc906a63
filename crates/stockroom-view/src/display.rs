//! Placeholder rendering fallback.

use stockroom_cache::{CacheSnapshot, QueryStatus};
use stockroom_core::Page;

/// What a table should render right now.
#[derive(Debug, Clone)]
pub struct DisplayPage<T> {
    pub page: Page<T>,
    /// True when the page shown belongs to a previously displayed key.
    pub is_placeholder: bool,
    /// Set when the current entry's last load failed; the data shown is
    /// then the last successful page.
    pub error: Option<String>,
}

/// Pure derived view: the current entry's data when it has any, otherwise
/// the previously displayed page as a placeholder while the new key loads.
/// Cache state is never modified here.
pub fn display_page<T: Clone>(
    current: Option<&CacheSnapshot<T>>,
    previous: Option<&Page<T>>,
) -> Option<DisplayPage<T>> {
    let error = current.and_then(|snap| {
        if snap.status == QueryStatus::Error {
            snap.last_error.clone()
        } else {
            None
        }
    });

    if let Some(page) = current.and_then(|snap| snap.data.clone()) {
        return Some(DisplayPage {
            page,
            is_placeholder: false,
            error,
        });
    }

    previous.cloned().map(|page| DisplayPage {
        page,
        is_placeholder: true,
        error,
    })
}
