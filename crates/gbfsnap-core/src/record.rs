//! Exported records.
//!
//! Field names on the wire are the short codes downstream tools parse; the
//! serialized order follows the declaration order here. Pass-through page
//! values stay as [`serde_json::Value`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::weapons::WeaponKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SchemaVersion {
    /// Raw awakening class name, no `wkey`.
    V1,
    #[default]
    V2,
}

impl From<SchemaVersion> for u8 {
    fn from(v: SchemaVersion) -> u8 {
        match v {
            SchemaVersion::V1 => 1,
            SchemaVersion::V2 => 2,
        }
    }
}

impl TryFrom<u8> for SchemaVersion {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, String> {
        match n {
            1 => Ok(SchemaVersion::V1),
            2 => Ok(SchemaVersion::V2),
            other => Err(format!("unknown schema version {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySnapshot {
    pub ver: SchemaVersion,
    pub lang: Value,
    #[serde(rename = "p")]
    pub class_id: Option<i64>,
    #[serde(rename = "pcjs")]
    pub class_image: Value,
    #[serde(rename = "ps")]
    pub set_actions: Vec<Option<String>>,
    #[serde(rename = "pce")]
    pub class_element: Value,

    #[serde(rename = "c")]
    pub npc_ids: Vec<Option<i64>>,
    #[serde(rename = "ce")]
    pub npc_elements: Vec<Option<i64>>,
    #[serde(rename = "ci")]
    pub npc_images: Vec<Value>,
    /// Skill counts; index 0 is the main character.
    #[serde(rename = "cb")]
    pub skill_counts: Vec<Value>,
    #[serde(rename = "cst")]
    pub npc_styles: Vec<Value>,
    #[serde(rename = "cn")]
    pub npc_names: Vec<Value>,
    #[serde(rename = "cl")]
    pub npc_levels: Vec<Option<i64>>,
    #[serde(rename = "cs")]
    pub npc_uncaps: Vec<Option<i64>>,
    #[serde(rename = "cp")]
    pub npc_pluses: Vec<Option<i64>>,
    #[serde(rename = "cwr")]
    pub npc_rings: Vec<Value>,
    #[serde(rename = "cpl")]
    pub shield_id: Value,
    #[serde(rename = "fpl")]
    pub familiar_id: Value,
    #[serde(rename = "qs")]
    pub quick_summon: Option<i64>,
    #[serde(rename = "cml")]
    pub master_level: Value,
    #[serde(rename = "cbl")]
    pub proof_level: Value,

    #[serde(rename = "s")]
    pub summon_ids: Vec<Option<i64>>,
    #[serde(rename = "sl")]
    pub summon_levels: Vec<Option<i64>>,
    #[serde(rename = "ss")]
    pub summon_images: Vec<Value>,
    #[serde(rename = "se")]
    pub summon_uncaps: Vec<Option<i64>>,
    #[serde(rename = "sp")]
    pub summon_pluses: Vec<Option<i64>>,
    #[serde(rename = "ssm")]
    pub skin_summon: Value,

    #[serde(rename = "w")]
    pub weapon_images: Vec<Value>,
    #[serde(rename = "wkey", default, skip_serializing_if = "Option::is_none")]
    pub weapon_keys: Option<BTreeMap<String, WeaponKey>>,
    #[serde(rename = "wsm")]
    pub skin_weapons: Vec<Value>,
    #[serde(rename = "wl")]
    pub weapon_skill_levels: Vec<Option<i64>>,
    #[serde(rename = "wsn")]
    pub weapon_skill_icons: Vec<Option<Vec<Value>>>,
    #[serde(rename = "wll")]
    pub weapon_levels: Vec<Option<i64>>,
    #[serde(rename = "wp")]
    pub weapon_pluses: Vec<Option<i64>>,
    #[serde(rename = "wakn")]
    pub weapon_awakenings: Vec<Value>,
    #[serde(rename = "wax")]
    pub weapon_ax: Vec<Value>,
    #[serde(rename = "waxi")]
    pub weapon_ax_icons: Vec<Value>,
    #[serde(rename = "waxt")]
    pub weapon_ax_images: Vec<Value>,

    #[serde(rename = "watk")]
    pub weapons_attack: Value,
    #[serde(rename = "whp")]
    pub weapons_hp: Value,
    #[serde(rename = "satk")]
    pub summons_attack: Value,
    #[serde(rename = "shp")]
    pub summons_hp: Value,
    #[serde(rename = "est")]
    pub estimate: Vec<Value>,
    /// `[secondary class, text]` of each gauge number on the page.
    #[serde(rename = "estx")]
    pub estimate_text: Vec<(Option<String>, String)>,
    #[serde(rename = "mods")]
    pub modifiers: Value,
    #[serde(rename = "sps")]
    pub support_summon: Value,
    #[serde(rename = "spsid")]
    pub support_summon_image: Value,
}

impl PartySnapshot {
    /// Lengths of the per-slot arrays in each section: companions, summons,
    /// weapons. Each inner vector holds equal values for a consistent record.
    pub fn section_lengths(&self) -> [Vec<usize>; 3] {
        [
            vec![
                self.npc_ids.len(),
                self.npc_elements.len(),
                self.npc_images.len(),
                self.skill_counts.len().saturating_sub(1),
                self.npc_styles.len(),
                self.npc_names.len(),
                self.npc_levels.len(),
                self.npc_uncaps.len(),
                self.npc_pluses.len(),
                self.npc_rings.len(),
            ],
            vec![
                self.summon_ids.len(),
                self.summon_levels.len(),
                self.summon_images.len(),
                self.summon_uncaps.len(),
                self.summon_pluses.len(),
            ],
            vec![
                self.weapon_images.len(),
                self.weapon_skill_levels.len(),
                self.weapon_skill_icons.len(),
                self.weapon_levels.len(),
                self.weapon_pluses.len(),
                self.weapon_awakenings.len(),
                self.weapon_ax.len(),
                self.weapon_ax_icons.len(),
                self.weapon_ax_images.len(),
            ],
        ]
    }
}

/// Current awakening level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Awakening {
    /// Digits read from the stacked level elements (v2).
    Level(u64),
    /// Class name of the level element, e.g. `"lv3"` (v1).
    ClassName(String),
}

/// `[icon class, label, secondary text]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusEntry(pub String, pub Option<String>, pub Option<String>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZenithSnapshot {
    pub ver: SchemaVersion,
    pub lang: Value,
    pub id: Option<i64>,
    pub emp: Value,
    pub ring: Value,
    pub awakening: Option<Awakening>,
    pub awaktype: Option<String>,
    pub domain: Vec<BonusEntry>,
    pub saint: Vec<BonusEntry>,
    pub extra: Vec<BonusEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSkill {
    pub lvl: String,
    pub icon: String,
    pub desc: String,
    pub value: String,
}

/// Empty (`{}`) when the page shows no artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<ArtifactSkill>>,
}

impl Artifact {
    pub fn is_empty(&self) -> bool {
        self.img.is_none() && self.skills.is_none()
    }

    pub fn skills(&self) -> &[ArtifactSkill] {
        self.skills.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSnapshot {
    pub ver: SchemaVersion,
    pub lang: Value,
    pub id: Option<i64>,
    pub artifact: Artifact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    Zenith(ZenithSnapshot),
    Artifact(ArtifactSnapshot),
    Party(Box<PartySnapshot>),
}

impl Snapshot {
    pub fn version(&self) -> SchemaVersion {
        match self {
            Snapshot::Party(p) => p.ver,
            Snapshot::Zenith(z) => z.ver,
            Snapshot::Artifact(a) => a.ver,
        }
    }

    /// Compact JSON, the clipboard form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
