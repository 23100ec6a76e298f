//! Test utilities for the Hyperliquid SDK and MCP server
//!
//! - [`TestServer`]: in-process mock of the `/info` and `/exchange` endpoints
//! - [`fixtures`]: canned universe, mids, orders and positions

pub mod fixtures;
pub mod server;

pub use fixtures::TEST_PRIVATE_KEY;
pub use server::{MockState, TestServer};
