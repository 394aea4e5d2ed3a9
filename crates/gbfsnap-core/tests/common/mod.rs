#![allow(dead_code)]

use serde_json::{Value, json};

pub const PARTY_HASH: &str = "#party/index/0/npc/0";
pub const TOWER_HASH: &str = "#tower/party/index/2/npc/0";

fn weapon(image_id: &str, skill2: Value, skill3: Value) -> Value {
    json!({
        "master": {"id": image_id.split('_').next().unwrap()},
        "param": {
            "image_id": image_id,
            "skill_level": "15",
            "level": "150",
            "quality": "99",
            "arousal": {"is_arousal_weapon": false, "level": null},
            "augment_image": null,
            "augment_skill_icon_image": null,
            "augment_skill_info": []
        },
        "skill1": {"image": "skill_atk_8_3"},
        "skill2": skill2,
        "skill3": skill3
    })
}

pub fn npc(id: &str, level: &str, with_skill: bool) -> Value {
    let mut v = json!({
        "master": {"id": id, "attribute": "2", "short_name": format!("npc{id}")},
        "param": {
            "image_id_3": format!("{id}_02"),
            "style": 1,
            "level": level,
            "evolution": "5",
            "quality": "99",
            "has_npcaugment_constant": true
        }
    });
    if with_skill {
        v["skill"] = json!({"count": 3});
    }
    v
}

pub fn empty_slot() -> Value {
    json!({"master": null, "param": null})
}

fn summon(master_id: &str, param_id: Value) -> Value {
    json!({
        "master": {"id": master_id},
        "param": {
            "id": param_id,
            "level": "250",
            "image_id": &master_id[..10],
            "evolution": "6",
            "quality": "99"
        }
    })
}

/// A `Game` object on a party screen with three companions, three main and
/// one sub summon, six weapon slots.
pub fn party_game() -> Value {
    json!({
        "lang": "en",
        "view": {
            "expectancyDamageData": {"imageId": "2040094000"},
            "deck_model": {"attributes": {"deck": {
                "npc": {
                    "1": npc("3040001000", "80", true),
                    "2": npc("3040002000", "100", true),
                    "3": empty_slot()
                },
                "pc": {
                    "job": {
                        "master": {"id": "150201"},
                        "param": {"master_level": 30, "perfection_proof_level": 5}
                    },
                    "param": {"image": "150201_sw_1_01", "attribute": "3"},
                    "skill": {"count": 4},
                    "shield_id": null,
                    "familiar_id": 0,
                    "skin_summon_id": 0,
                    "skin_weapon_id": 0,
                    "skin_weapon_id_2": 0,
                    "weapons_attack": 12000,
                    "weapons_hp": 2400,
                    "summons_attack": 5000,
                    "summons_hp": 1000,
                    "quick_user_summon_id": 333,
                    "set_action": [{"name": " Rage IV "}, {"name": null}],
                    "damage_info": {
                        "assumed_normal_damage_attribute": 3,
                        "assumed_normal_damage": 120000,
                        "assumed_advantage_damage": 180000,
                        "effect_value_info": [{"icon_img": "atk", "value": "+100%"}],
                        "summon_name": ""
                    },
                    "summons": [
                        summon("2040003000000", json!(111)),
                        summon("2040094000000", json!(222)),
                        summon("2040020000000", json!("333"))
                    ],
                    "sub_summons": [empty_slot()],
                    "weapons": [
                        weapon("1040310600_02", json!({"image": "skill_atk", "name": "Pact"}), json!({"image": "skill_def", "name": "Gravitas"})),
                        weapon("1040815900", json!({"image": "skill_ele", "name": "Zeal"}), json!({"image": "skill_hp", "name": "Other"})),
                        weapon("1040011900", json!({"image": "skill_ult"}), json!(null)),
                        weapon("1040000100", json!(null), json!(null)),
                        empty_slot(),
                        weapon("1040028900", json!({"image": "skill_atk"}), json!({"image": "skill_def", "name": null}))
                    ]
                }
            }}}
        }
    })
}

pub const PARTY_PAGE: &str = r#"<html><body>
  <div class="prt-gauge">
    <div class="txt-gauge-num num-normal">120,000</div>
    <div class="txt-gauge-num">180,000</div>
  </div>
</body></html>"#;
