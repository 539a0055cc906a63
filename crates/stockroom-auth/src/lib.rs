//! Authentication for Stockroom: login flow and the client-side token store.

pub mod login;
pub mod token;

pub use login::{AuthClient, TokenResponse, logout};
pub use token::TokenStore;
