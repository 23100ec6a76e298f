//! MCP server exposing Hyperliquid trading tools
//!
//! Tools are listed and invoked over the Model Context Protocol; each one
//! maps onto a call of [`hyperliquid_sdk::ExchangeClient`] and answers with
//! formatted text.

pub mod config;
pub mod error;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::{ToolError, ToolResult};
pub use server::HyperliquidServer;
pub use tools::ToolOutput;
