// stockly-api: Async Rust client for the Stockly inventory REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

mod catalog;
mod stock;

pub use client::InventoryClient;
pub use error::Error;
pub use transport::TransportConfig;
