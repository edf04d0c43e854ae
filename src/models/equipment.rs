//! Weapons and artifacts.

use super::enums::{EquipSlot, StatKind};
use serde::Deserialize;

const ICON_BASE_URL: &str = "https://enka.network/ui";

/// A single stat line on a weapon or artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct Stat {
    #[serde(alias = "mainPropId", alias = "appendPropId")]
    pub kind: StatKind,
    #[serde(rename = "statValue")]
    pub value: f64,
}

impl Stat {
    /// Value formatted the way the game displays it.
    pub fn formatted_value(&self) -> String {
        if self.kind.is_percentage() {
            format!("{:.1}%", self.value)
        } else {
            format!("{}", self.value.round() as i64)
        }
    }
}

/// The character's equipped weapon.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub id: u32,
    pub level: u8,
    pub ascension: u8,
    /// Refinement rank, 1 to 5.
    pub refinement: u8,
    pub rarity: u8,
    pub icon: String,
    /// Localized name, filled from the reference assets when loaded.
    pub name: Option<String>,
    pub name_hash: String,
    pub stats: Vec<Stat>,
}

/// An equipped artifact.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub id: u32,
    /// Display level, 0 to 20.
    pub level: u8,
    pub slot: EquipSlot,
    pub rarity: u8,
    pub icon: String,
    /// Localized name, filled from the reference assets when loaded.
    pub name: Option<String>,
    pub name_hash: String,
    pub set_name_hash: String,
    pub main_stat: Stat,
    pub sub_stats: Vec<Stat>,
}

// Raw `equipList` entry. Weapons carry a `weapon` object, artifacts a
// `reliquary` object; the display data lives under `flat` for both.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEquip {
    #[serde(rename = "itemId")]
    pub item_id: u32,
    pub weapon: Option<RawWeaponDetail>,
    pub reliquary: Option<RawReliquaryDetail>,
    pub flat: RawEquipFlat,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawWeaponDetail {
    pub level: u8,
    #[serde(rename = "promoteLevel", default)]
    pub promote_level: u8,
    #[serde(rename = "affixMap", default)]
    pub affix_map: std::collections::BTreeMap<String, u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawReliquaryDetail {
    pub level: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEquipFlat {
    #[serde(rename = "nameTextMapHash")]
    pub name_hash: String,
    #[serde(rename = "setNameTextMapHash")]
    pub set_name_hash: Option<String>,
    #[serde(rename = "rankLevel")]
    pub rarity: u8,
    pub icon: String,
    #[serde(rename = "equipType")]
    pub equip_type: Option<EquipSlot>,
    #[serde(rename = "weaponStats", default)]
    pub weapon_stats: Vec<Stat>,
    #[serde(rename = "reliquaryMainstat")]
    pub reliquary_mainstat: Option<Stat>,
    #[serde(rename = "reliquarySubstats", default)]
    pub reliquary_substats: Vec<Stat>,
}

pub(crate) fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}.png")
}

impl RawEquip {
    pub(crate) fn into_weapon(self) -> Option<Weapon> {
        let detail = self.weapon?;
        Some(Weapon {
            id: self.item_id,
            level: detail.level,
            ascension: detail.promote_level,
            // affixMap holds the refinement index (0-based) keyed by an
            // internal id; the rank shown in game is index + 1.
            refinement: detail.affix_map.values().next().copied().unwrap_or(0) + 1,
            rarity: self.flat.rarity,
            icon: icon_url(&self.flat.icon),
            name: None,
            name_hash: self.flat.name_hash,
            stats: self.flat.weapon_stats,
        })
    }

    pub(crate) fn into_artifact(self) -> Option<Artifact> {
        let detail = self.reliquary?;
        Some(Artifact {
            id: self.item_id,
            // The API reports artifact levels 1-based.
            level: detail.level.saturating_sub(1),
            slot: self.flat.equip_type?,
            rarity: self.flat.rarity,
            icon: icon_url(&self.flat.icon),
            name: None,
            name_hash: self.flat.name_hash,
            set_name_hash: self.flat.set_name_hash.unwrap_or_default(),
            main_stat: self.flat.reliquary_mainstat?,
            sub_stats: self.flat.reliquary_substats,
        })
    }
}
