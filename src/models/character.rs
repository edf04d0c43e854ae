//! Showcased characters.

use super::enums::{Element, StatKind};
use super::equipment::{Artifact, RawEquip, Weapon};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A character's combat property, keyed by the API's numeric fight-prop id.
#[derive(Debug, Clone)]
pub struct FightProp {
    pub id: u32,
    pub value: f64,
}

impl FightProp {
    /// The named stat this prop maps to, if the id is a known one.
    pub fn kind(&self) -> Option<StatKind> {
        StatKind::from_prop_id(self.id)
    }

    /// Value formatted the way the game displays it. Fight props store
    /// percentages as fractions, unlike equipment stat lines.
    pub fn formatted_value(&self) -> String {
        match self.kind() {
            Some(kind) if kind.is_percentage() => format!("{:.1}%", self.value * 100.0),
            _ => format!("{}", self.value.round() as i64),
        }
    }
}

/// A combat talent and its level, from `skillLevelMap`.
#[derive(Debug, Clone)]
pub struct Talent {
    pub id: u32,
    pub level: u8,
}

/// A fully detailed character from the showcase.
///
/// `name`, `icon` and `element` come from the local reference assets, not
/// the payload; they stay `None` until assets are loaded.
#[derive(Debug, Clone)]
pub struct Character {
    pub id: u32,
    pub skill_depot_id: u32,
    pub level: u8,
    pub ascension: u8,
    /// Friendship level, 1 to 10.
    pub friendship_level: u8,
    /// Ids of unlocked constellations, in unlock order.
    pub constellations: Vec<u32>,
    pub talents: Vec<Talent>,
    pub stats: Vec<FightProp>,
    pub weapon: Option<Weapon>,
    pub artifacts: Vec<Artifact>,
    pub costume_id: Option<u32>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub element: Option<Element>,
}

impl Character {
    pub fn constellations_unlocked(&self) -> usize {
        self.constellations.len()
    }

    /// Convenience lookup of a named stat's current value.
    pub fn stat(&self, kind: StatKind) -> Option<f64> {
        self.stats
            .iter()
            .find(|p| p.kind() == Some(kind))
            .map(|p| p.value)
    }
}

// Raw `avatarInfoList` entry.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCharacter {
    #[serde(rename = "avatarId")]
    id: u32,
    #[serde(rename = "skillDepotId", default)]
    skill_depot_id: u32,
    // propMap values carry both numeric and string forms; level ("4001")
    // and ascension ("1002") live in the string `val`.
    #[serde(rename = "propMap", default)]
    prop_map: BTreeMap<String, RawProp>,
    #[serde(rename = "fightPropMap", default)]
    fight_prop_map: BTreeMap<String, f64>,
    #[serde(rename = "skillLevelMap", default)]
    skill_level_map: BTreeMap<String, u8>,
    #[serde(rename = "talentIdList", default)]
    talent_id_list: Vec<u32>,
    #[serde(rename = "fetterInfo", default)]
    fetter_info: RawFetterInfo,
    #[serde(rename = "equipList", default)]
    equip_list: Vec<RawEquip>,
    #[serde(rename = "costumeId")]
    costume_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawProp {
    val: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFetterInfo {
    #[serde(rename = "expLevel", default)]
    exp_level: u8,
}

const PROP_LEVEL: &str = "4001";
const PROP_ASCENSION: &str = "1002";

impl RawCharacter {
    fn prop(&self, key: &str) -> u8 {
        self.prop_map
            .get(key)
            .and_then(|p| p.val.as_deref())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}

impl From<RawCharacter> for Character {
    fn from(raw: RawCharacter) -> Self {
        let level = raw.prop(PROP_LEVEL);
        let ascension = raw.prop(PROP_ASCENSION);

        let stats = raw
            .fight_prop_map
            .iter()
            .filter_map(|(id, value)| {
                id.parse().ok().map(|id| FightProp { id, value: *value })
            })
            .collect();

        let talents = raw
            .skill_level_map
            .iter()
            .filter_map(|(id, level)| {
                id.parse().ok().map(|id| Talent { id, level: *level })
            })
            .collect();

        let mut weapon = None;
        let mut artifacts = Vec::new();
        for equip in raw.equip_list {
            if equip.weapon.is_some() {
                weapon = equip.into_weapon();
            } else if let Some(artifact) = equip.into_artifact() {
                artifacts.push(artifact);
            }
        }

        Character {
            id: raw.id,
            skill_depot_id: raw.skill_depot_id,
            level,
            ascension,
            friendship_level: raw.fetter_info.exp_level,
            constellations: raw.talent_id_list,
            talents,
            stats,
            weapon,
            artifacts,
            costume_id: raw.costume_id,
            name: None,
            icon: None,
            element: None,
        }
    }
}
