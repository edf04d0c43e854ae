//! Enumerations shared across the showcase models.

use serde::Deserialize;
use std::fmt;

/// API locales accepted by the text-map assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Russian,
    Vietnamese,
    Thai,
    Portuguese,
    Korean,
    Japanese,
    Indonesian,
    French,
    Spanish,
    German,
    TraditionalChinese,
    SimplifiedChinese,
    Italian,
    Turkish,
}

impl Language {
    /// The locale code used by the API and the asset files.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::Vietnamese => "vi",
            Language::Thai => "th",
            Language::Portuguese => "pt",
            Language::Korean => "ko",
            Language::Japanese => "ja",
            Language::Indonesian => "id",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::German => "de",
            Language::TraditionalChinese => "zh-tw",
            Language::SimplifiedChinese => "zh-cn",
            Language::Italian => "it",
            Language::Turkish => "tr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A character's element, as named in the reference assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Wind,
    Electric,
    Grass,
    Ice,
    Rock,
    /// Unaligned traveler, or a value this crate does not know yet.
    #[serde(other)]
    Unknown,
}

/// Artifact slot, mapped from the API's `equipType` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EquipSlot {
    #[serde(rename = "EQUIP_BRACER")]
    Flower,
    #[serde(rename = "EQUIP_NECKLACE")]
    Plume,
    #[serde(rename = "EQUIP_SHOES")]
    Sands,
    #[serde(rename = "EQUIP_RING")]
    Goblet,
    #[serde(rename = "EQUIP_DRESS")]
    Circlet,
}

/// Stat identifiers, mapped from the API's `FIGHT_PROP_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StatKind {
    #[serde(rename = "FIGHT_PROP_BASE_HP")]
    BaseHp,
    #[serde(rename = "FIGHT_PROP_BASE_ATTACK")]
    BaseAttack,
    #[serde(rename = "FIGHT_PROP_BASE_DEFENSE")]
    BaseDefense,
    #[serde(rename = "FIGHT_PROP_HP")]
    Hp,
    #[serde(rename = "FIGHT_PROP_HP_PERCENT")]
    HpPercent,
    #[serde(rename = "FIGHT_PROP_ATTACK")]
    Attack,
    #[serde(rename = "FIGHT_PROP_ATTACK_PERCENT")]
    AttackPercent,
    #[serde(rename = "FIGHT_PROP_DEFENSE")]
    Defense,
    #[serde(rename = "FIGHT_PROP_DEFENSE_PERCENT")]
    DefensePercent,
    #[serde(rename = "FIGHT_PROP_CRITICAL")]
    CritRate,
    #[serde(rename = "FIGHT_PROP_CRITICAL_HURT")]
    CritDamage,
    #[serde(rename = "FIGHT_PROP_CHARGE_EFFICIENCY")]
    EnergyRecharge,
    #[serde(rename = "FIGHT_PROP_ELEMENT_MASTERY")]
    ElementalMastery,
    #[serde(rename = "FIGHT_PROP_HEAL_ADD")]
    HealingBonus,
    #[serde(rename = "FIGHT_PROP_PHYSICAL_ADD_HURT")]
    PhysicalDmgBonus,
    #[serde(rename = "FIGHT_PROP_FIRE_ADD_HURT")]
    PyroDmgBonus,
    #[serde(rename = "FIGHT_PROP_ELEC_ADD_HURT")]
    ElectroDmgBonus,
    #[serde(rename = "FIGHT_PROP_WATER_ADD_HURT")]
    HydroDmgBonus,
    #[serde(rename = "FIGHT_PROP_GRASS_ADD_HURT")]
    DendroDmgBonus,
    #[serde(rename = "FIGHT_PROP_WIND_ADD_HURT")]
    AnemoDmgBonus,
    #[serde(rename = "FIGHT_PROP_ROCK_ADD_HURT")]
    GeoDmgBonus,
    #[serde(rename = "FIGHT_PROP_ICE_ADD_HURT")]
    CryoDmgBonus,
    #[serde(other)]
    Unknown,
}

impl StatKind {
    /// Resolves the numeric fight-prop id used in `fightPropMap`.
    ///
    /// Ids without a named mapping (internal or cosmetic props) resolve to
    /// `None`.
    pub fn from_prop_id(id: u32) -> Option<Self> {
        Some(match id {
            1 => StatKind::BaseHp,
            4 => StatKind::BaseAttack,
            7 => StatKind::BaseDefense,
            20 => StatKind::CritRate,
            22 => StatKind::CritDamage,
            23 => StatKind::EnergyRecharge,
            26 => StatKind::HealingBonus,
            28 => StatKind::ElementalMastery,
            30 => StatKind::PhysicalDmgBonus,
            40 => StatKind::PyroDmgBonus,
            41 => StatKind::ElectroDmgBonus,
            42 => StatKind::HydroDmgBonus,
            43 => StatKind::DendroDmgBonus,
            44 => StatKind::AnemoDmgBonus,
            45 => StatKind::GeoDmgBonus,
            46 => StatKind::CryoDmgBonus,
            2000 => StatKind::Hp,
            2001 => StatKind::Attack,
            2002 => StatKind::Defense,
            _ => return None,
        })
    }

    /// Whether values of this stat are fractions to display as percentages.
    pub fn is_percentage(self) -> bool {
        !matches!(
            self,
            StatKind::BaseHp
                | StatKind::BaseAttack
                | StatKind::BaseDefense
                | StatKind::Hp
                | StatKind::Attack
                | StatKind::Defense
                | StatKind::ElementalMastery
                | StatKind::Unknown
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_match_the_api() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::TraditionalChinese.code(), "zh-tw");
        assert_eq!(Language::SimplifiedChinese.code(), "zh-cn");
    }

    #[test]
    fn stat_kind_parses_fight_prop_constants() {
        let kind: StatKind = serde_json::from_str("\"FIGHT_PROP_CRITICAL_HURT\"").unwrap();
        assert_eq!(kind, StatKind::CritDamage);

        let unknown: StatKind = serde_json::from_str("\"FIGHT_PROP_SOMETHING_NEW\"").unwrap();
        assert_eq!(unknown, StatKind::Unknown);
    }

    #[test]
    fn numeric_prop_ids_resolve() {
        assert_eq!(StatKind::from_prop_id(2000), Some(StatKind::Hp));
        assert_eq!(StatKind::from_prop_id(20), Some(StatKind::CritRate));
        assert_eq!(StatKind::from_prop_id(9999), None);
    }
}
