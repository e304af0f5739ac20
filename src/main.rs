//! TTL Cache - demonstration binary
//!
//! Builds a cache from environment configuration, walks it through capacity
//! overflow and refresh-on-read, and prints the surviving entries as JSON.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{CacheError, CacheService, Config, HashStorageFactory};

/// Main entry point for the demonstration.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Fill the cache to capacity
/// 4. Read the oldest key, then overflow the cache by one
/// 5. Print the remaining entries
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, default_lifetime={}s",
        config.capacity, config.default_lifetime
    );

    let mut cache: CacheService<u32, String> =
        CacheService::from_config(&config, &HashStorageFactory)
            .context("failed to build cache service")?;

    let capacity = u32::try_from(cache.capacity()).context("capacity does not fit a u32 key")?;
    for key in 1..=capacity {
        cache.add_item(key, format!("value-{}", key), config.default_lifetime)?;
    }
    info!("Filled cache with {} entries", cache.len());

    // Key 1 becomes the most recently accessed, so key 2 is evicted next
    let first = cache.get_item(&1)?;
    info!("Read key 1: {}", first);

    cache.add_item(capacity + 1, "overflow".to_string(), config.default_lifetime)?;
    match cache.get_item(&2) {
        Err(CacheError::ItemNotFound(_)) => info!("Key 2 was evicted"),
        Ok(_) if capacity == 1 => info!("Key 2 is the overflow entry"),
        other => info!("Unexpected state for key 2: {:?}", other),
    }

    let mut entries = cache.entries();
    entries.sort_by_key(|(key, _)| *key);
    println!("{}", serde_json::to_string_pretty(&entries)?);

    Ok(())
}
