use crate::models::{Element, Language};
use crate::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of the downloaded asset files.
pub const DEFAULT_ASSET_DIR: &str = ".enka/assets";

pub(crate) const CHARACTERS_FILE: &str = "characters.json";
pub(crate) const TEXT_MAP_FILE: &str = "text_map.json";

/// Reference data for one character, from `characters.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterAsset {
    #[serde(rename = "Element")]
    pub element: Option<Element>,
    #[serde(rename = "SideIconName")]
    pub side_icon: Option<String>,
    #[serde(rename = "NameTextMapHash")]
    pub name_hash: Option<u64>,
}

/// Loads and serves the local reference assets.
///
/// Lookups are plain map reads; loading is the only I/O. When the asset
/// files have not been downloaded yet, `load` reports `false` and every
/// lookup misses — augmentation is optional by design.
pub struct AssetManager {
    dir: PathBuf,
    lang: Language,
    characters: HashMap<String, CharacterAsset>,
    text_map: HashMap<String, String>,
    loaded: bool,
}

impl AssetManager {
    pub fn new(dir: impl Into<PathBuf>, lang: Language) -> Self {
        Self {
            dir: dir.into(),
            lang,
            characters: HashMap::new(),
            text_map: HashMap::new(),
            loaded: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// (Re)loads both asset files from disk.
    ///
    /// Returns `Ok(false)` when the files are not present yet (run
    /// `update_assets()` first); any other read or parse failure is an
    /// error.
    pub fn load(&mut self) -> Result<bool> {
        let characters = match read_json::<HashMap<String, CharacterAsset>>(
            &self.dir.join(CHARACTERS_FILE),
        )? {
            Some(c) => c,
            None => return Ok(false),
        };
        // text_map.json holds every locale keyed by language code.
        let mut all_langs =
            match read_json::<HashMap<String, HashMap<String, String>>>(
                &self.dir.join(TEXT_MAP_FILE),
            )? {
                Some(t) => t,
                None => return Ok(false),
            };

        self.text_map = all_langs.remove(self.lang.code()).unwrap_or_default();
        self.characters = characters;
        self.loaded = true;
        debug!(
            characters = self.characters.len(),
            texts = self.text_map.len(),
            lang = %self.lang,
            "assets loaded"
        );
        Ok(true)
    }

    /// Looks up a character's reference data.
    ///
    /// Traveler variants are keyed `"{id}-{skill_depot_id}"` in the asset
    /// file; everyone else by plain id.
    pub fn character(&self, id: u32, skill_depot_id: u32) -> Option<&CharacterAsset> {
        self.characters
            .get(&format!("{id}-{skill_depot_id}"))
            .or_else(|| self.characters.get(&id.to_string()))
    }

    /// Resolves a text-map hash to its localized text.
    pub fn text(&self, hash: &str) -> Option<&str> {
        self.text_map.get(hash).map(String::as_str)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_slice(&bytes)?))
}
