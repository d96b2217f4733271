// frontdesk-api: Async Rust client for the Frontdesk REST backend

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ApiClient;
pub use error::{Error, FALLBACK_MESSAGE};
