mod common;

use common::{PARTY_HASH, PARTY_PAGE, TOWER_HASH, empty_slot, npc, party_game};
use gbfsnap_core::party::extract_party;
use gbfsnap_core::weapons::WeaponKey;
use gbfsnap_core::{HtmlPage, PartySnapshot, SchemaVersion, Snapshot};
use serde_json::{Value, json};

fn extract(game: &Value, hash: &str) -> PartySnapshot {
    let page = HtmlPage::parse(PARTY_PAGE);
    extract_party(hash, game, &page, SchemaVersion::V2).expect("party capture")
}

#[test]
fn scalars_and_estimates() {
    let rec = extract(&party_game(), PARTY_HASH);
    assert_eq!(rec.lang, json!("en"));
    assert_eq!(rec.class_id, Some(150201));
    assert_eq!(rec.class_image, json!("150201_sw_1_01"));
    assert_eq!(rec.master_level, json!(30));
    assert_eq!(rec.shield_id, Value::Null);
    assert_eq!(rec.skin_weapons, vec![json!(0), json!(0)]);
    assert_eq!(rec.estimate, vec![json!(3), json!(120000), json!(180000)]);
    // empty summon name is falsy
    assert_eq!(rec.support_summon, Value::Null);
    assert_eq!(rec.support_summon_image, json!("2040094000"));
    assert_eq!(
        rec.estimate_text,
        vec![
            (Some("num-normal".to_string()), "120,000".to_string()),
            (None, "180,000".to_string()),
        ]
    );
}

#[test]
fn set_actions_are_front_padded_to_four() {
    let rec = extract(&party_game(), PARTY_HASH);
    assert_eq!(
        rec.set_actions,
        vec![None, None, Some("Rage IV".to_string()), None]
    );

    for n in 0..=4 {
        let mut game = party_game();
        let actions: Vec<Value> = (0..n).map(|i| json!({"name": format!("a{i}")})).collect();
        game["view"]["deck_model"]["attributes"]["deck"]["pc"]["set_action"] = json!(actions);
        let rec = extract(&game, PARTY_HASH);
        assert_eq!(rec.set_actions.len(), 4, "{n} actions");
        assert_eq!(rec.set_actions.iter().filter(|a| a.is_some()).count(), n);
    }
}

#[test]
fn unreadable_set_actions_become_four_nulls() {
    let mut game = party_game();
    let pc = &mut game["view"]["deck_model"]["attributes"]["deck"]["pc"];
    pc["set_action"] = json!([{"name": "ok"}, {"name": 5}]);
    assert_eq!(extract(&game, PARTY_HASH).set_actions, vec![None; 4]);

    let mut game = party_game();
    let pc = game["view"]["deck_model"]["attributes"]["deck"]["pc"]
        .as_object_mut()
        .unwrap();
    pc.remove("set_action");
    assert_eq!(extract(&game, PARTY_HASH).set_actions, vec![None; 4]);
}

#[test]
fn companions_keep_slots_with_null_attributes() {
    let rec = extract(&party_game(), PARTY_HASH);
    assert_eq!(rec.npc_ids, vec![Some(3040001000), Some(3040002000), None]);
    assert_eq!(rec.npc_levels, vec![Some(80), Some(100), None]);
    assert_eq!(rec.npc_styles, vec![json!(1), json!(1), json!(1)]);
    assert_eq!(rec.npc_rings, vec![json!(true), json!(true), Value::Null]);
    assert_eq!(rec.skill_counts, vec![json!(4), json!(3), json!(3), Value::Null]);
    for section in rec.section_lengths() {
        assert!(section.windows(2).all(|w| w[0] == w[1]), "{section:?}");
    }
}

#[test]
fn companion_with_param_but_no_skill_fails_the_capture() {
    let mut game = party_game();
    game["view"]["deck_model"]["attributes"]["deck"]["npc"]["2"] =
        npc("3040002000", "100", false);
    let page = HtmlPage::parse(PARTY_PAGE);
    assert!(extract_party(PARTY_HASH, &game, &page, SchemaVersion::V2).is_err());
}

#[test]
fn tower_companions_are_flattened() {
    let mut game = party_game();
    game["view"]["deck_model"]["attributes"]["deck"]["npc"] = json!([
        [npc("3040001000", "80", true), npc("3040002000", "90", true)],
        [empty_slot()]
    ]);
    let rec = extract(&game, TOWER_HASH);
    assert_eq!(rec.npc_ids, vec![Some(3040001000), Some(3040002000), None]);
    assert_eq!(rec.npc_levels.len(), rec.npc_ids.len());
}

#[test]
fn summons_strip_suffix_and_concatenate_sub_summons() {
    let rec = extract(&party_game(), PARTY_HASH);
    assert_eq!(
        rec.summon_ids,
        vec![Some(2040003000), Some(2040094000), Some(2040020000), None]
    );
    assert_eq!(rec.summon_levels, vec![Some(250), Some(250), Some(250), None]);
    assert_eq!(rec.summon_images.len(), 4);
}

#[test]
fn quick_summon_index_is_offset_by_one() {
    let rec = extract(&party_game(), PARTY_HASH);
    assert_eq!(rec.quick_summon, Some(1));

    let mut game = party_game();
    game["view"]["deck_model"]["attributes"]["deck"]["pc"]["quick_user_summon_id"] = json!(999);
    assert_eq!(extract(&game, PARTY_HASH).quick_summon, None);

    let mut game = party_game();
    game["view"]["deck_model"]["attributes"]["deck"]["pc"]
        .as_object_mut()
        .unwrap()
        .remove("quick_user_summon_id");
    assert_eq!(extract(&game, PARTY_HASH).quick_summon, None);
}

#[test]
fn weapon_keys_follow_series() {
    let rec = extract(&party_game(), PARTY_HASH);
    let keys = rec.weapon_keys.as_ref().expect("v2 has wkey");
    assert_eq!(
        keys.get("1040310600"),
        Some(&WeaponKey {
            sk2: None,
            sk3: Some(json!("Gravitas"))
        })
    );
    assert_eq!(
        keys.get("1040815900"),
        Some(&WeaponKey {
            sk2: Some(json!("Zeal")),
            sk3: None
        })
    );
    // ultima without a third skill still gets an entry
    assert_eq!(keys.get("1040011900"), Some(&WeaponKey::default()));
    // a skill without a name still writes the key, as null
    assert_eq!(
        keys.get("1040028900"),
        Some(&WeaponKey {
            sk2: None,
            sk3: Some(Value::Null)
        })
    );
    assert!(!keys.contains_key("1040000100"));
    assert_eq!(keys.len(), 4);

    assert_eq!(rec.weapon_images[4], Value::Null);
    assert_eq!(rec.weapon_skill_icons[4], None);
    assert_eq!(
        rec.weapon_skill_icons[2],
        Some(vec![json!("skill_atk_8_3"), json!("skill_ult"), Value::Null])
    );
}

#[test]
fn legacy_schema_has_no_weapon_keys() {
    let page = HtmlPage::parse(PARTY_PAGE);
    let rec = extract_party(PARTY_HASH, &party_game(), &page, SchemaVersion::V1).unwrap();
    assert!(rec.weapon_keys.is_none());
    let js = serde_json::to_value(&rec).unwrap();
    assert_eq!(js["ver"], json!(1));
    assert!(js.get("wkey").is_none());
}

#[test]
fn missing_damage_info_propagates() {
    let mut game = party_game();
    game["view"]["deck_model"]["attributes"]["deck"]["pc"]
        .as_object_mut()
        .unwrap()
        .remove("damage_info");
    let page = HtmlPage::parse(PARTY_PAGE);
    let err = extract_party(PARTY_HASH, &game, &page, SchemaVersion::V2).unwrap_err();
    assert!(err.to_string().contains("damage_info"), "{err}");
}

#[test]
fn serialized_record_uses_short_codes_and_round_trips() {
    let rec = extract(&party_game(), PARTY_HASH);
    let snap = Snapshot::Party(Box::new(rec));
    let text = snap.to_json().unwrap();
    assert!(text.starts_with(r#"{"ver":2,"lang":"en","p":150201,"#), "{text}");
    assert!(text.contains(r#""wkey":{"1040011900":{},"1040028900":{"sk3":null},"1040310600":{"sk3":"Gravitas"},"1040815900":{"sk2":"Zeal"}}"#));
    let back: Snapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(back, snap);
}
