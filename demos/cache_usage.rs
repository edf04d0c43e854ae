//! Response caching across backends.
//!
//! Run with: cargo run --example cache_usage

use enka_client::{Client, MemoryBackend, SqliteBackend};

#[tokio::main]
async fn main() -> enka_client::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Persistent cache: the second fetch is served from disk, and survives
    // a process restart within the TTL.
    let client = Client::builder()
        .cache(SqliteBackend::open(SqliteBackend::default_path()).await?)
        .build()?;
    client.fetch_showcase("901211014").await?; // cached
    client.fetch_showcase("901211014").await?; // from cache
    println!("sqlite: {:?}", client.cache_stats());
    client.close().await?;

    // In-memory cache (the default): same behavior, process-local.
    let client = Client::builder().cache(MemoryBackend::new()).build()?;
    client.fetch_showcase("901211014").await?; // cached
    client.fetch_showcase("901211014").await?; // from cache
    println!("memory: {:?}", client.cache_stats());
    client.close().await
}
