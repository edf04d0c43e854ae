use crate::assets::{AssetManager, DEFAULT_ASSET_DIR};
use crate::cache::{CacheBackend, CacheConfig, MemoryBackend, ResponseCache, DEFAULT_TTL};
use crate::client::core::Client;
use crate::models::Language;
use crate::transport::{HttpTransport, DEFAULT_TIMEOUT};
use crate::Result;
use reqwest::header::HeaderMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Builder for [`Client`].
///
/// Everything configured here is fixed for the client's lifetime: one
/// backend, one TTL, one language.
pub struct ClientBuilder {
    lang: Language,
    backend: Option<Arc<dyn CacheBackend>>,
    ttl: Duration,
    timeout: Duration,
    headers: Option<HeaderMap>,
    asset_dir: PathBuf,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            lang: Language::default(),
            backend: None,
            ttl: DEFAULT_TTL,
            timeout: DEFAULT_TIMEOUT,
            headers: None,
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            base_url_override: None,
        }
    }

    /// Language used for asset-based augmentation. Defaults to English.
    pub fn lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Cache backend for response caching. Defaults to [`MemoryBackend`]
    /// with its standard capacity.
    pub fn cache(mut self, backend: impl CacheBackend + 'static) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Time-to-live for cached responses. Defaults to 60 seconds.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Total deadline for one API request. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extra headers sent with every request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Directory holding the downloaded reference assets.
    pub fn asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    /// Override the API base URL.
    ///
    /// This is primarily for testing with mock servers; production use
    /// always talks to the real endpoint.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let transport = HttpTransport::new(self.timeout, self.headers)?;

        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(MemoryBackend::new()));
        let cache = ResponseCache::new(CacheConfig::new().with_ttl(self.ttl), backend);

        let mut assets = AssetManager::new(self.asset_dir, self.lang);
        // Assets are optional until downloaded; a missing directory is fine.
        assets.load()?;

        Ok(Client::from_parts(
            transport,
            cache,
            RwLock::new(assets),
            self.lang,
            self.base_url_override,
        ))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
