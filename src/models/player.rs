//! Player profile data.

use serde::{Deserialize, Deserializer};

/// A character preview from the profile's showcase strip.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowcaseCharacter {
    #[serde(rename = "avatarId")]
    pub id: u32,
    #[serde(default)]
    pub level: u8,
    #[serde(rename = "costumeId")]
    pub costume_id: Option<u32>,
}

/// The public player profile, from the payload's `playerInfo` object.
#[derive(Debug, Clone, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub nickname: Option<String>,
    pub level: u8,
    #[serde(default)]
    pub signature: String,
    #[serde(rename = "worldLevel", default)]
    pub world_level: u8,
    #[serde(rename = "finishAchievementNum", default)]
    pub achievements: u32,
    #[serde(rename = "nameCardId", default)]
    pub namecard_id: u32,
    #[serde(rename = "towerFloorIndex", default)]
    pub abyss_floor: u8,
    #[serde(rename = "towerLevelIndex", default)]
    pub abyss_level: u8,
    #[serde(
        rename = "profilePicture",
        default,
        deserialize_with = "profile_picture_id"
    )]
    pub profile_picture_id: Option<u32>,
    #[serde(rename = "showAvatarInfoList", default)]
    pub showcase_characters: Vec<ShowcaseCharacter>,
    #[serde(rename = "fetterCount")]
    pub max_friendship_count: Option<u32>,
}

// The profile picture arrived as `{"avatarId": ..}` historically and as
// `{"id": ..}` since the pfp rework; accept both.
fn profile_picture_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Raw {
        id: Option<u32>,
        #[serde(rename = "avatarId")]
        avatar_id: Option<u32>,
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.id.or(r.avatar_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_picture_accepts_both_formats() {
        let new_style: Player = serde_json::from_str(
            r#"{"nickname": "Traveler", "level": 60, "profilePicture": {"id": 100074}}"#,
        )
        .unwrap();
        assert_eq!(new_style.profile_picture_id, Some(100074));

        let old_style: Player = serde_json::from_str(
            r#"{"nickname": "Traveler", "level": 60, "profilePicture": {"avatarId": 10000089}}"#,
        )
        .unwrap();
        assert_eq!(old_style.profile_picture_id, Some(10000089));
    }

    #[test]
    fn minimal_profile_parses_with_defaults() {
        let player: Player = serde_json::from_str(r#"{"level": 1}"#).unwrap();
        assert_eq!(player.nickname, None);
        assert_eq!(player.achievements, 0);
        assert!(player.showcase_characters.is_empty());
    }
}
