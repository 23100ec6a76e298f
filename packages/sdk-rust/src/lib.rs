//! Hyperliquid SDK
//!
//! Thin Rust client for the Hyperliquid perpetuals API.
//!
//! This SDK provides:
//! - Typed info queries (account state, open orders, mids, asset metadata)
//! - Signed order placement, cancellation and modification
//! - Asset symbol to index resolution
//! - Formatting utilities for wire and display values
//!
//! # Example
//!
//! ```no_run
//! use hyperliquid_sdk::{ExchangeClient, Network, Wallet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hyperliquid_sdk::SdkError> {
//!     let wallet = Wallet::from_hex("0x...")?;
//!     let client = ExchangeClient::new(wallet, Network::Testnet);
//!
//!     let state = client.get_user_state().await?;
//!     for position in state.open_positions() {
//!         println!("{}: {}", position.coin, position.szi);
//!     }
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod client;
pub mod error;
pub mod format;
pub mod network;
pub mod signing;
pub mod types;

pub use client::ExchangeClient;
pub use error::{SdkError, SdkResult};
pub use format::{format_optional, format_timestamp, format_usd, round_price, to_wire};
pub use network::Network;
pub use signing::Wallet;
pub use types::*;
