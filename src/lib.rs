//! # enka-client
//!
//! An async client for the Enka Network game-profile API: fetches a
//! player's public showcase, parses it into typed domain objects
//! (characters, stats, equipment), and augments those objects with locally
//! cached reference assets (names, icons) that the raw payload omits.
//!
//! ## Core Philosophy
//!
//! - **Cache-first**: every fetch goes through a pluggable cache-aside
//!   layer, so repeated lookups of the same profile within the TTL never
//!   touch the network
//! - **Backend-agnostic**: in-memory, SQLite and Redis backends share one
//!   contract; bring your own by implementing [`cache::CacheBackend`]
//! - **Concurrency-safe**: one shared [`Client`] serves overlapping fetches
//!   with no external locking
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use enka_client::{Client, Language};
//!
//! #[tokio::main]
//! async fn main() -> enka_client::Result<()> {
//!     let client = Client::builder().lang(Language::English).build()?;
//!
//!     let showcase = client.fetch_showcase("901211014").await?;
//!     for character in &showcase.characters {
//!         println!(
//!             "{} (level {})",
//!             character.name.as_deref().unwrap_or("?"),
//!             character.level,
//!         );
//!     }
//!
//!     client.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client implementation and builder |
//! | [`cache`] | Response caching with multiple backends |
//! | [`models`] | Typed showcase payload models |
//! | [`assets`] | Local reference assets and updater |
//! | [`transport`] | HTTP layer and API status mapping |

pub mod assets;
pub mod cache;
pub mod client;
pub mod models;
pub mod transport;

// Re-export main types for convenience
pub use cache::{CacheBackend, CacheKey, CacheStats, MemoryBackend, SqliteBackend};
#[cfg(feature = "redis")]
pub use cache::RedisBackend;
pub use client::{Client, ClientBuilder};
pub use models::{Character, Language, Player, Showcase};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
