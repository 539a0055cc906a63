//! Stockroom Core
//!
//! Core domain types, payload records, and error handling for Stockroom.
//! This crate has minimal dependencies and defines the shared vocabulary
//! used across all other crates.

pub mod category;
pub mod error;
pub mod ids;
pub mod page;
pub mod product;
pub mod validate;

pub use error::{Error, Result};
pub use ids::*;
pub use page::Page;
pub use validate::Validate;
