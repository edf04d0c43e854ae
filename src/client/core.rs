use crate::assets::{AssetManager, AssetUpdater};
use crate::cache::{CacheKey, CacheStats, ResponseCache};
use crate::client::builder::ClientBuilder;
use crate::models::{Language, Player, Showcase};
use crate::transport::HttpTransport;
use crate::{Error, Result};
use std::sync::RwLock;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://enka.network";

const SHOWCASE_ENDPOINT: &str = "gi/showcase";

/// The showcase client.
///
/// One instance is meant to be shared (e.g. behind `Arc`) across all
/// concurrent fetches an application issues; the response cache and its
/// backend provide their own synchronization, so no external locking is
/// needed.
///
/// ```rust,no_run
/// use enka_client::Client;
///
/// # async fn run() -> enka_client::Result<()> {
/// let client = Client::new()?;
/// let showcase = client.fetch_showcase("901211014").await?;
/// println!("{}", showcase.player.nickname.as_deref().unwrap_or("?"));
/// client.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    transport: HttpTransport,
    cache: ResponseCache,
    assets: RwLock<AssetManager>,
    lang: Language,
    base_url: String,
}

impl Client {
    /// A client with default configuration: in-memory cache, English,
    /// 60-second TTL.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(
        transport: HttpTransport,
        cache: ResponseCache,
        assets: RwLock<AssetManager>,
        lang: Language,
        base_url_override: Option<String>,
    ) -> Self {
        Self {
            transport,
            cache,
            assets,
            lang,
            base_url: base_url_override.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// The language used for asset-based augmentation.
    pub fn lang(&self) -> Language {
        self.lang
    }

    /// Fetches a player's full showcase: profile plus detailed characters.
    ///
    /// Responses are served from the cache within the configured TTL; a
    /// miss performs one API request. Characters are augmented with names,
    /// icons and elements when the reference assets are present.
    pub async fn fetch_showcase(&self, uid: &str) -> Result<Showcase> {
        let raw = self.fetch_raw(uid, false).await?;
        let mut showcase = Showcase::parse(raw, uid)?;
        self.augment(&mut showcase);
        Ok(showcase)
    }

    /// Fetches the player profile only (`?info` variant), skipping the
    /// detailed character data.
    pub async fn fetch_player(&self, uid: &str) -> Result<Player> {
        let raw = self.fetch_raw(uid, true).await?;
        Ok(Showcase::parse(raw, uid)?.player)
    }

    async fn fetch_raw(&self, uid: &str, info_only: bool) -> Result<serde_json::Value> {
        validate_uid(uid)?;

        let mut key = CacheKey::builder(SHOWCASE_ENDPOINT).param("uid", uid);
        if info_only {
            // The info variant returns a different (smaller) payload.
            key = key.param("info", "1");
        }
        let key = key.build()?;

        let url = self.showcase_url(uid, info_only);
        self.cache
            .get_or_fetch(&key, || self.transport.get_json(&url))
            .await
    }

    fn showcase_url(&self, uid: &str, info_only: bool) -> String {
        let mut url = format!("{}/api/uid/{uid}", self.base_url);
        if info_only {
            url.push_str("?info");
        }
        url
    }

    fn augment(&self, showcase: &mut Showcase) {
        let assets = self.assets.read().unwrap();
        if !assets.is_loaded() {
            debug!("assets not loaded, skipping augmentation");
            return;
        }

        for character in &mut showcase.characters {
            if let Some(data) = assets.character(character.id, character.skill_depot_id) {
                character.element = data.element;
                if let Some(hash) = data.name_hash {
                    character.name = assets.text(&hash.to_string()).map(str::to_owned);
                }
                if let Some(side_icon) = &data.side_icon {
                    let front_icon = side_icon.replace("_Side", "");
                    character.icon = Some(crate::models::icon_url(&front_icon));
                }
            }
            if let Some(weapon) = &mut character.weapon {
                weapon.name = assets.text(&weapon.name_hash).map(str::to_owned);
            }
            for artifact in &mut character.artifacts {
                artifact.name = assets.text(&artifact.name_hash).map(str::to_owned);
            }
        }
    }

    /// Downloads the latest reference assets and reloads them.
    pub async fn update_assets(&self) -> Result<()> {
        let dir = self.assets.read().unwrap().dir().to_owned();
        AssetUpdater::new(&self.transport, &dir).update().await?;

        let mut assets = self.assets.write().unwrap();
        assets.load()?;
        Ok(())
    }

    /// Drops the cached response for one uid (both payload variants).
    pub async fn invalidate_showcase(&self, uid: &str) -> Result<()> {
        let full = CacheKey::builder(SHOWCASE_ENDPOINT).param("uid", uid).build()?;
        let info = CacheKey::builder(SHOWCASE_ENDPOINT)
            .param("uid", uid)
            .param("info", "1")
            .build()?;
        self.cache.invalidate(&full).await?;
        self.cache.invalidate(&info).await
    }

    /// Empties the response cache.
    pub async fn clear_cache(&self) -> Result<()> {
        self.cache.clear().await
    }

    /// Releases the cache backend's resources. Safe to call more than once;
    /// typically the last thing an application does with the client.
    pub async fn close(&self) -> Result<()> {
        self.cache.close().await
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn validate_uid(uid: &str) -> Result<()> {
    // 9 digits historically; 10-digit uids exist since the 18x servers.
    let ok = (9..=10).contains(&uid.len()) && uid.bytes().all(|b| b.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(Error::WrongUidFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_validation() {
        assert!(validate_uid("901211014").is_ok());
        assert!(validate_uid("1812345678").is_ok());
        assert!(matches!(validate_uid("12345"), Err(Error::WrongUidFormat)));
        assert!(matches!(
            validate_uid("90121101a"),
            Err(Error::WrongUidFormat)
        ));
        assert!(matches!(validate_uid(""), Err(Error::WrongUidFormat)));
    }
}
