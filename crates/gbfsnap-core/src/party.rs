//! Party screen capture.
//!
//! Flattens `Game.view.deck_model.attributes.deck` into the parallel arrays of
//! [`PartySnapshot`]. Scalars are read unguarded and fail the capture when a
//! parent object is missing; per-slot attributes fall back to null; the set
//! action names fall back to four nulls as a whole.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::dispatch;
use crate::dom::{PageDom, class_list};
use crate::error::ExtractError;
use crate::host::{self, HostState};
use crate::js::{Prop, loose_eq_str, parse_int_prefix};
use crate::record::{PartySnapshot, SchemaVersion};
use crate::weapons::{KeySkill, WeaponKey, WeaponSeries, base_id};

const SET_ACTION_SLOTS: usize = 4;
const GAUGE_NUMBER_CLASS: &str = "txt-gauge-num";

pub fn extract_party<S, D>(
    hash: &str,
    state: &S,
    dom: &D,
    ver: SchemaVersion,
) -> Result<PartySnapshot, ExtractError>
where
    S: HostState + ?Sized,
    D: PageDom + ?Sized,
{
    let game = host::game(state);
    let view = game.get("view")?;
    let deck = view.at(&["deck_model", "attributes", "deck"])?;
    let pc = deck.get("pc")?;
    let damage = pc.get("damage_info")?;

    let mut rec = PartySnapshot {
        ver,
        lang: game.get("lang")?.to_value(),
        class_id: pc.at(&["job", "master", "id"])?.parse_int(),
        class_image: pc.at(&["param", "image"])?.to_value(),
        set_actions: Vec::new(),
        class_element: pc.at(&["param", "attribute"])?.to_value(),
        npc_ids: Vec::new(),
        npc_elements: Vec::new(),
        npc_images: Vec::new(),
        skill_counts: vec![pc.at(&["skill", "count"])?.to_value()],
        npc_styles: Vec::new(),
        npc_names: Vec::new(),
        npc_levels: Vec::new(),
        npc_uncaps: Vec::new(),
        npc_pluses: Vec::new(),
        npc_rings: Vec::new(),
        shield_id: pc.get("shield_id")?.to_value(),
        familiar_id: pc.get("familiar_id")?.to_value(),
        quick_summon: None,
        master_level: pc.at(&["job", "param", "master_level"])?.to_value(),
        proof_level: pc.at(&["job", "param", "perfection_proof_level"])?.to_value(),
        summon_ids: Vec::new(),
        summon_levels: Vec::new(),
        summon_images: Vec::new(),
        summon_uncaps: Vec::new(),
        summon_pluses: Vec::new(),
        skin_summon: pc.get("skin_summon_id")?.to_value(),
        weapon_images: Vec::new(),
        weapon_keys: (ver >= SchemaVersion::V2).then(BTreeMap::new),
        skin_weapons: vec![
            pc.get("skin_weapon_id")?.to_value(),
            pc.get("skin_weapon_id_2")?.to_value(),
        ],
        weapon_skill_levels: Vec::new(),
        weapon_skill_icons: Vec::new(),
        weapon_levels: Vec::new(),
        weapon_pluses: Vec::new(),
        weapon_awakenings: Vec::new(),
        weapon_ax: Vec::new(),
        weapon_ax_icons: Vec::new(),
        weapon_ax_images: Vec::new(),
        weapons_attack: pc.get("weapons_attack")?.to_value(),
        weapons_hp: pc.get("weapons_hp")?.to_value(),
        summons_attack: pc.get("summons_attack")?.to_value(),
        summons_hp: pc.get("summons_hp")?.to_value(),
        estimate: vec![
            damage.get("assumed_normal_damage_attribute")?.to_value(),
            damage.get("assumed_normal_damage")?.to_value(),
            damage.get("assumed_advantage_damage")?.to_value(),
        ],
        estimate_text: Vec::new(),
        modifiers: damage.get("effect_value_info")?.to_value(),
        support_summon: truthy_or_null(&damage.get("summon_name")?),
        support_summon_image: {
            let data = view.get("expectancyDamageData")?;
            if data.truthy() {
                truthy_or_null(&data.get("imageId")?)
            } else {
                Value::Null
            }
        },
    };

    rec.quick_summon = quick_summon_index(&pc)?;
    rec.set_actions = set_action_names(&pc).unwrap_or_else(|e| {
        debug!(error = %e, "set actions unreadable, exporting empty slots");
        vec![None; SET_ACTION_SLOTS]
    });

    let npcs = deck.get("npc")?;
    let slots = if dispatch::is_tower_party(hash) {
        let mut flat = Vec::new();
        for group in npcs.values()? {
            flat.extend(group.values()?);
        }
        flat
    } else {
        npcs.values()?
    };
    for npc in &slots {
        push_companion(&mut rec, npc)?;
    }

    for list in ["summons", "sub_summons"] {
        for summon in pc.get(list)?.values()? {
            push_summon(&mut rec, &summon)?;
        }
    }

    for weapon in pc.get("weapons")?.values()? {
        push_weapon(&mut rec, &weapon)?;
    }

    for el in dom.get_elements_by_class_name(None, GAUGE_NUMBER_CLASS) {
        let class = dom.class_name(el);
        let secondary = class_list(&class).get(1).map(|s| s.to_string());
        rec.estimate_text.push((secondary, dom.text_content(el)));
    }

    Ok(rec)
}

fn truthy_or_null(p: &Prop<'_>) -> Value {
    if p.truthy() {
        p.to_value()
    } else {
        Value::Null
    }
}

/// Padded to four entries when fewer actions are set.
fn set_action_names(pc: &Prop<'_>) -> Result<Vec<Option<String>>, ExtractError> {
    let actions = pc.get("set_action")?;
    let mut names = Vec::with_capacity(SET_ACTION_SLOTS);
    if let Some(len) = actions.length()? {
        names.extend((len..SET_ACTION_SLOTS).map(|_| None));
    }
    for action in actions.values()? {
        let name = action.get("name")?;
        names.push(if name.truthy() {
            Some(name.as_str()?.trim().to_string())
        } else {
            None
        });
    }
    Ok(names)
}

/// Position of the quick summon among the summon slots, minus the reserved
/// 0th slot.
fn quick_summon_index(pc: &Prop<'_>) -> Result<Option<i64>, ExtractError> {
    let Some(quick) = pc.get("quick_user_summon_id")?.raw() else {
        return Ok(None);
    };
    let qid = quick.to_string();
    let summons = pc.get("summons")?;
    if summons.is_nullish() {
        return Ok(None);
    }
    for (key, summon) in summons.entries()? {
        let param = summon.get("param")?;
        if param.is_nullish() {
            continue;
        }
        if param
            .get("id")?
            .raw()
            .is_some_and(|id| loose_eq_str(id, &qid))
        {
            return Ok(parse_int_prefix(&key).map(|i| i - 1));
        }
    }
    Ok(None)
}

/// Summon master ids carry a 3-digit suffix that is not part of the id.
pub fn summon_id(raw: &str) -> Option<i64> {
    let keep = raw.chars().count().saturating_sub(3);
    let trimmed: String = raw.chars().take(keep).collect();
    parse_int_prefix(&trimmed)
}

fn push_companion(rec: &mut PartySnapshot, npc: &Prop<'_>) -> Result<(), ExtractError> {
    let master = npc.get("master")?;
    let param = npc.get("param")?;
    rec.npc_ids.push(master.guarded("id").parse_int());
    rec.npc_elements
        .push(master.guarded("attribute").parse_int());
    rec.npc_images.push(param.guarded("image_id_3").to_value());
    rec.skill_counts.push(if param.truthy() {
        npc.at(&["skill", "count"])?.to_value()
    } else {
        Value::Null
    });
    rec.npc_styles.push(if param.truthy() {
        param.get("style")?.to_value()
    } else {
        Value::from(1)
    });
    rec.npc_levels.push(param.guarded("level").parse_int());
    rec.npc_uncaps.push(param.guarded("evolution").parse_int());
    rec.npc_pluses.push(param.guarded("quality").parse_int());
    rec.npc_rings
        .push(param.guarded("has_npcaugment_constant").to_value());
    rec.npc_names.push(master.guarded("short_name").to_value());
    Ok(())
}

fn push_summon(rec: &mut PartySnapshot, summon: &Prop<'_>) -> Result<(), ExtractError> {
    let master = summon.get("master")?;
    let param = summon.get("param")?;
    rec.summon_ids.push(if master.truthy() {
        summon_id(master.get("id")?.as_str()?)
    } else {
        None
    });
    rec.summon_levels.push(param.guarded("level").parse_int());
    rec.summon_images.push(param.guarded("image_id").to_value());
    rec.summon_uncaps.push(param.guarded("evolution").parse_int());
    rec.summon_pluses.push(param.guarded("quality").parse_int());
    Ok(())
}

fn push_weapon(rec: &mut PartySnapshot, weapon: &Prop<'_>) -> Result<(), ExtractError> {
    let master = weapon.get("master")?;
    let param = weapon.get("param")?;
    rec.weapon_images.push(if master.truthy() {
        param.get("image_id")?.to_value()
    } else {
        Value::Null
    });
    rec.weapon_skill_levels
        .push(param.guarded("skill_level").parse_int());
    rec.weapon_skill_icons.push(if param.truthy() {
        let mut icons = Vec::with_capacity(3);
        for slot in ["skill1", "skill2", "skill3"] {
            icons.push(weapon.get(slot)?.guarded("image").to_value());
        }
        Some(icons)
    } else {
        None
    });
    rec.weapon_levels.push(param.guarded("level").parse_int());
    rec.weapon_pluses.push(param.guarded("quality").parse_int());
    rec.weapon_awakenings.push(param.guarded("arousal").to_value());
    rec.weapon_ax_images
        .push(param.guarded("augment_image").to_value());
    rec.weapon_ax_icons
        .push(param.guarded("augment_skill_icon_image").to_value());
    rec.weapon_ax
        .push(param.guarded("augment_skill_info").to_value());

    if let Some(keys) = rec.weapon_keys.as_mut()
        && master.truthy()
    {
        let image_id = param.get("image_id")?;
        if image_id.truthy() {
            let wid = base_id(image_id.as_str()?);
            if let Some(series) = WeaponSeries::of(wid) {
                let slot = match series.key_skill() {
                    KeySkill::Second => "skill2",
                    KeySkill::Third => "skill3",
                };
                // `name` is copied only when the skill exists
                let skill = weapon.get(slot)?;
                let name = if skill.truthy() {
                    skill.get("name")?.raw().cloned()
                } else {
                    None
                };
                let mut key = WeaponKey::default();
                match series.key_skill() {
                    KeySkill::Second => key.sk2 = name,
                    KeySkill::Third => key.sk3 = name,
                }
                keys.insert(wid.to_string(), key);
            }
        }
    }
    Ok(())
}
