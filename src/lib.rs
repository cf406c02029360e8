//! Leaderboard Relay Library
//!
//! Stores browser session headers and relays Binance futures leaderboard
//! lookups, folding positions and performance into one summary.

pub mod config;
pub mod credentials;
pub mod error;
pub mod leaderboard;
pub mod server;

pub use error::{RelayError, RelayResult};
