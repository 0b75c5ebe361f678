//! Snapshot wire-format tests — the JSON shape older clients and
//! future versions must keep agreeing on.

use empire_core::config::EngineConfig;
use empire_core::state::{GameState, Resource, Stats, Upgrade};

fn reachable_state() -> GameState {
    GameState {
        resources: Resource {
            amount:       1_234.5,
            per_second:   2.5,
            last_updated: 1_700_000_123_456,
        },
        upgrades: vec![
            Upgrade {
                id:          1,
                name:        "Basic Collector".to_string(),
                description: "Enhances your resource collection rate".to_string(),
                cost:        12.0,
                level:       1,
                base_effect: 0.5,
                multiplier:  1.5,
                unlocked:    true,
            },
            Upgrade {
                id:          2,
                name:        "Automated Harvester".to_string(),
                description: "Automatically harvests resources for you".to_string(),
                cost:        50.0,
                level:       0,
                base_effect: 2.0,
                multiplier:  1.6,
                unlocked:    true,
            },
        ],
        stats: Stats {
            total_resources_earned:   5_000.25,
            total_upgrades_purchased: 1,
            total_time_played:        86_400_000,
            last_played_timestamp:    Some(1_700_000_123_000),
        },
    }
}

/// Serialize then deserialize reproduces the state exactly.
#[test]
fn round_trip_preserves_state() {
    let state = reachable_state();
    let json = serde_json::to_string(&state).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);

    // And for a freshly seeded state too.
    let seeded = GameState::seed(EngineConfig::default().catalog, 1_700_000_000_000);
    let json = serde_json::to_string(&seeded).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, seeded);
}

/// The emitted JSON uses the exact camelCase field names of the wire
/// contract — no renames, ever.
#[test]
fn wire_field_names_are_stable() {
    let json: serde_json::Value =
        serde_json::to_value(reachable_state()).unwrap();

    let resources = &json["resources"];
    for field in ["amount", "perSecond", "lastUpdated"] {
        assert!(!resources[field].is_null(), "resources.{field} missing");
    }

    let upgrade = &json["upgrades"][0];
    for field in [
        "id", "name", "description", "cost", "level", "baseEffect", "multiplier", "unlocked",
    ] {
        assert!(!upgrade[field].is_null(), "upgrades[].{field} missing");
    }

    let stats = &json["stats"];
    for field in [
        "totalResourcesEarned",
        "totalUpgradesPurchased",
        "totalTimePlayed",
        "lastPlayedTimestamp",
    ] {
        assert!(!stats[field].is_null(), "stats.{field} missing");
    }
}

/// Unknown fields from newer writers are ignored on load.
#[test]
fn unknown_fields_are_tolerated() {
    let mut json = serde_json::to_value(reachable_state()).unwrap();
    json["prestigeLevel"] = 3.into();
    json["resources"]["bonusPool"] = 12.5.into();
    json["stats"]["achievements"] = serde_json::json!(["first-click"]);

    let state: GameState =
        serde_json::from_value(json).expect("Extra fields must not break loading");
    assert_eq!(state, reachable_state());
}

/// lastPlayedTimestamp is the one optional field: absent loads as None
/// and None is omitted on write.
#[test]
fn last_played_timestamp_is_optional() {
    let mut json = serde_json::to_value(reachable_state()).unwrap();
    json["stats"]
        .as_object_mut()
        .unwrap()
        .remove("lastPlayedTimestamp");

    let state: GameState = serde_json::from_value(json).unwrap();
    assert_eq!(state.stats.last_played_timestamp, None);

    let rewritten = serde_json::to_value(&state).unwrap();
    assert!(
        rewritten["stats"].get("lastPlayedTimestamp").is_none(),
        "None must serialize as an absent field, not null"
    );
}

/// Every other field is required: dropping one makes the snapshot
/// corrupt, which the engine answers with a fresh seed.
#[test]
fn missing_required_fields_fail_to_parse() {
    for (section, field) in [
        ("resources", "amount"),
        ("resources", "perSecond"),
        ("resources", "lastUpdated"),
        ("stats", "totalResourcesEarned"),
        ("stats", "totalTimePlayed"),
    ] {
        let mut json = serde_json::to_value(reachable_state()).unwrap();
        json[section].as_object_mut().unwrap().remove(field);
        assert!(
            serde_json::from_value::<GameState>(json).is_err(),
            "Parsing should fail without {section}.{field}"
        );
    }

    let mut json = serde_json::to_value(reachable_state()).unwrap();
    json["upgrades"][0].as_object_mut().unwrap().remove("multiplier");
    assert!(
        serde_json::from_value::<GameState>(json).is_err(),
        "Parsing should fail without upgrades[].multiplier"
    );
}
