//! The top-level showcase response.

use super::character::{Character, RawCharacter};
use super::player::Player;
use crate::Result;
use serde::Deserialize;

/// A player's full showcase: profile plus detailed characters.
#[derive(Debug, Clone)]
pub struct Showcase {
    pub uid: String,
    pub player: Player,
    pub characters: Vec<Character>,
    /// Seconds until the API refreshes this profile, as reported upstream.
    pub ttl: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawShowcase {
    #[serde(default)]
    uid: Option<String>,
    #[serde(rename = "playerInfo")]
    player: Player,
    #[serde(rename = "avatarInfoList", default)]
    avatar_info_list: Vec<RawCharacter>,
    ttl: Option<u64>,
}

impl Showcase {
    /// Parses the raw payload. The `uid` field is echoed by the API; older
    /// payloads omit it, so the requested uid is passed as a fallback.
    pub(crate) fn parse(value: serde_json::Value, requested_uid: &str) -> Result<Self> {
        let raw: RawShowcase = serde_json::from_value(value)?;
        Ok(Showcase {
            uid: raw.uid.unwrap_or_else(|| requested_uid.to_string()),
            player: raw.player,
            characters: raw.avatar_info_list.into_iter().map(Into::into).collect(),
            ttl: raw.ttl,
        })
    }
}
