// Weapon series whose skill icons do not tell their variants apart; the
// capture records the distinguishing skill's name for them.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const DARK_OPUS: &[&str] = &[
    "1040310600", "1040310700", "1040415000", "1040415100", "1040809400", "1040809500",
    "1040212500", "1040212600", "1040017000", "1040017100", "1040911000", "1040911100",
];

const ULTIMA: &[&str] = &[
    "1040011900", "1040012000", "1040012100", "1040012200", "1040012300", "1040012400",
    "1040109700", "1040109800", "1040109900", "1040110000", "1040110100", "1040110200",
    "1040208800", "1040208900", "1040209000", "1040209100", "1040209200", "1040209300",
    "1040307800", "1040307900", "1040308000", "1040308100", "1040308200", "1040308300",
    "1040410800", "1040410900", "1040411000", "1040411100", "1040411200", "1040411300",
    "1040507400", "1040507500", "1040507600", "1040507700", "1040507800", "1040507900",
    "1040608100", "1040608200", "1040608300", "1040608400", "1040608500", "1040608600",
    "1040706900", "1040707000", "1040707100", "1040707200", "1040707300", "1040707400",
    "1040807000", "1040807100", "1040807200", "1040807300", "1040807400", "1040807500",
    "1040907500", "1040907600", "1040907700", "1040907800", "1040907900", "1040908000",
];

const ORIGIN_DRACONIC: &[&str] = &[
    "1040815900", "1040316500", "1040712800", "1040422200", "1040915600", "1040516500",
];

const DESTRUCTION: &[&str] = &[
    "1040028900", "1040122300", "1040220300", "1040621200", "1040714700", "1040817900",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponSeries {
    DarkOpus,
    Ultima,
    Destruction,
    OriginDraconic,
}

/// Which skill slot names the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySkill {
    Second,
    Third,
}

impl WeaponSeries {
    pub fn of(base_id: &str) -> Option<Self> {
        if DARK_OPUS.contains(&base_id) {
            Some(Self::DarkOpus)
        } else if ULTIMA.contains(&base_id) {
            Some(Self::Ultima)
        } else if DESTRUCTION.contains(&base_id) {
            Some(Self::Destruction)
        } else if ORIGIN_DRACONIC.contains(&base_id) {
            Some(Self::OriginDraconic)
        } else {
            None
        }
    }

    pub fn key_skill(self) -> KeySkill {
        match self {
            Self::DarkOpus | Self::Ultima | Self::Destruction => KeySkill::Third,
            Self::OriginDraconic => KeySkill::Second,
        }
    }
}

/// Image id up to its `_NN` variant suffix.
pub fn base_id(image_id: &str) -> &str {
    image_id.split('_').next().unwrap_or(image_id)
}

/// One `wkey` entry. The skill's `name` is kept as the page had it, `null`
/// included; `None` means the weapon had no such skill and the field is left
/// out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponKey {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub sk2: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub sk3: Option<Value>,
}

// a written `null` is a value here, not an absent field
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}
