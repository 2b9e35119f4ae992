// Inventory service client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::{normalize_endpoint, InventoryClient};
