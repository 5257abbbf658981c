//! Caller identification

pub mod api_key;

pub use api_key::{auth_middleware, optional_auth_middleware};
