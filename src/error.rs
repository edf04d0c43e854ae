use crate::cache::{CacheError, KeyError};
use thiserror::Error;

/// Unified error type for the client.
///
/// Upstream API failures and key-derivation failures surface to the caller
/// unchanged; cache-internal failures never appear here from the fetch path
/// (they degrade to a cache miss inside [`crate::cache::ResponseCache`]).
#[derive(Debug, Error)]
pub enum Error {
    #[error("UID must be a string of 9 digits")]
    WrongUidFormat,

    #[error("player does not exist")]
    PlayerDoesNotExist,

    #[error("game is under maintenance")]
    GameMaintenance,

    #[error("rate limited by the API")]
    RateLimited,

    #[error("general server error")]
    GeneralServerError,

    #[error("server-side library error")]
    ServerLibraryError,

    #[error("gateway timeout")]
    GatewayTimeout,

    #[error("API returned unexpected status {status}")]
    Api { status: u16 },

    #[error("API request timed out")]
    Timeout,

    #[error("network transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cache key error: {0}")]
    Key(#[from] KeyError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("failed to download asset from {url}, status code {status}")]
    AssetDownload { status: u16, url: String },

    #[error("cannot find {key:?} in {file}, consider calling `update_assets()`")]
    AssetMissing { key: String, file: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Maps a non-200 HTTP status from the showcase API to its error.
    ///
    /// The API encodes domain failures as HTTP statuses (404 for an unknown
    /// player, 424 during game maintenance, and so on).
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Error::WrongUidFormat,
            404 => Error::PlayerDoesNotExist,
            424 => Error::GameMaintenance,
            429 => Error::RateLimited,
            500 => Error::GeneralServerError,
            503 => Error::ServerLibraryError,
            504 => Error::GatewayTimeout,
            _ => Error::Api { status },
        }
    }
}
