//! REST client for the Stockroom inventory API.
//!
//! One `ApiClient` per process, with per-resource methods speaking the
//! backend's wire format: `{data, count}` list envelopes and `{detail}`
//! error bodies under the `/api/v1` prefix.

mod categories;
mod http;
mod products;

pub use http::{ApiClient, ListResponse};
