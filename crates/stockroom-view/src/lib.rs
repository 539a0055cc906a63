//! View-model layer for Stockroom.
//!
//! Composes the query cache with a pagination controller and a mutation
//! coordinator: page changes drive cache fetches, mutations invalidate the
//! owning cache families, and the placeholder fallback keeps tables stable
//! while a new page loads.

pub mod display;
pub mod model;
pub mod mutation;
pub mod pager;

pub use display::{DisplayPage, display_page};
pub use model::{CacheSet, PagedView, TableView};
pub use mutation::{MutationCoordinator, MutationState};
pub use pager::{Paginator, compute_offsets, parse_page};
