//! End-to-end runs of mission presets through the public API.

use std::collections::HashMap;

use rampart_sim::core::config::SimConfig;
use rampart_sim::core::enums::{ActorKind, MissionOutcome, MissionState};
use rampart_sim::core::error::ScenarioError;
use rampart_sim::core::events::MissionEvent;
use rampart_sim::scenario::{parse_preset, MissionPreset};
use rampart_sim::MissionController;
use serde_json::Value;

const DEMO: &str = r#"{
    "name": "Crossroads",
    "settings": { "player_health_max": 500 },
    "waves": [
        { "start_time": 0.0, "enemy_kind": "runner", "spawn_count": 2, "spawn_interval": 1.0 },
        { "start_time": 4.0, "enemy_kind": "brute", "spawn_count": 1, "spawn_interval": 0.0, "path_index": 1 }
    ],
    "paths": [
        [[-8.0, 0.0, 0.0], [8.0, 0.0, 0.0]],
        [[0.0, 0.0, -8.0], [0.0, 0.0, 8.0]]
    ],
    "catalog": {
        "enemies": {
            "runner": { "health": 60, "speed": 2.0 },
            "brute": { "health": 300, "speed": 0.5, "player_damage": 250 }
        },
        "projectiles": ["bolt"],
        "towers": [
            { "name": "ballista", "weapon": { "range": 7.0, "damage": 40, "interval": 0.5, "projectile_kind": "bolt", "projectile_speed": 15.0, "projectile_lifetime": 1.0, "spread_radians": 0.0 } }
        ]
    },
    "towers": [
        { "kind": "ballista", "position": [2.0, 0.0, 2.0] }
    ]
}"#;

fn run(controller: &mut MissionController, dt: f64, max_secs: f64) -> Vec<MissionEvent> {
    let mut events = controller.take_events();
    while controller.state() == MissionState::Active && controller.mission_time() < max_secs {
        controller.tick(dt);
        events.extend(controller.take_events());
    }
    events
}

/// Replace actor ids with their order of first appearance. Ids come from a
/// process-wide counter, so two runs never share raw values.
fn normalize_ids(value: &mut Value, seen: &mut HashMap<u64, u64>) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                let is_id = matches!(key.as_str(), "id" | "tower" | "source" | "instigator");
                match field.as_u64().filter(|_| is_id) {
                    Some(raw) => {
                        let next = seen.len() as u64;
                        *field = Value::from(*seen.entry(raw).or_insert(next));
                    }
                    None => normalize_ids(field, seen),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_ids(item, seen);
            }
        }
        _ => {}
    }
}

fn normalized(events: &[MissionEvent]) -> Value {
    let mut value = serde_json::to_value(events).unwrap();
    normalize_ids(&mut value, &mut HashMap::new());
    value
}

#[test]
fn test_parse_preset_fills_defaults() {
    let preset = parse_preset(DEMO).unwrap();
    assert_eq!(preset.name, "Crossroads");
    assert_eq!(preset.settings.player_health_max, 500);
    assert_eq!(preset.waves[1].path_index, 1);
    assert_eq!(preset.paths.len(), 2);

    let runner = &preset.catalog.enemies["runner"];
    assert_eq!(runner.health, 60);
    assert_eq!(runner.player_damage, 100);

    let ballista = preset.catalog.towers.find("ballista").unwrap();
    assert_eq!(ballista.init_duration, 1.0);
    assert_eq!(ballista.weapon.as_ref().unwrap().damage, 40);
}

#[test]
fn test_parse_preset_rejects_bad_missions() {
    let unknown_enemy = DEMO.replace("\"brute\", \"spawn_count\"", "\"ogre\", \"spawn_count\"");
    assert!(matches!(
        parse_preset(&unknown_enemy),
        Err(ScenarioError::Invalid(msg)) if msg.contains("ogre")
    ));

    let short_path = DEMO.replace("[[0.0, 0.0, -8.0], [0.0, 0.0, 8.0]]", "[[0.0, 0.0, -8.0]]");
    assert!(matches!(
        parse_preset(&short_path),
        Err(ScenarioError::Invalid(_))
    ));

    let denormal_interval = DEMO.replace("\"interval\": 0.5", "\"interval\": 1e-320");
    assert!(matches!(
        parse_preset(&denormal_interval),
        Err(ScenarioError::Invalid(msg)) if msg.contains("ballista")
    ));

    assert!(matches!(
        parse_preset("{ \"name\": 3 }"),
        Err(ScenarioError::Parse(_))
    ));
}

#[test]
fn test_preset_start_places_towers() {
    let preset = parse_preset(DEMO).unwrap();
    let mut controller = preset.controller(SimConfig::default());
    let placed = preset.start(&mut controller).unwrap();

    assert_eq!(placed.len(), 1);
    assert_eq!(controller.registry().count_of_kind(ActorKind::Tower), 1);
    assert_eq!(controller.registry().count_of_kind(ActorKind::Enemy), 1);
    assert_eq!(controller.player_health(), 500);
}

#[test]
fn test_training_mission_ends_in_victory() {
    let preset = MissionPreset::training();
    let mut controller = preset.controller(SimConfig::default());
    preset.start(&mut controller).unwrap();

    let events = run(&mut controller, 0.05, 100.0);

    assert_eq!(controller.state(), MissionState::Ended);
    assert_eq!(controller.outcome(), Some(MissionOutcome::Victory));
    assert!(controller.player_health() > 0);
    assert_eq!(controller.enemies_alive(), 0);

    let spawned = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                MissionEvent::ActorSpawned {
                    kind: ActorKind::Enemy,
                    ..
                }
            )
        })
        .count();
    assert_eq!(spawned, 8);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, MissionEvent::TowerAttacked { .. })),
        "the gun should get shots off"
    );
    let ended: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            MissionEvent::MissionEnded { outcome, .. } => Some(*outcome),
            _ => None,
        })
        .collect();
    assert_eq!(ended, vec![MissionOutcome::Victory]);
}

#[test]
fn test_same_seed_same_mission() {
    let mut preset = parse_preset(DEMO).unwrap();
    if let Some(weapon) = preset.catalog.towers.presets[0].weapon.as_mut() {
        weapon.spread_radians = 0.1;
    }

    let mut first = preset.controller(SimConfig::default());
    let mut second = preset.controller(SimConfig::default());
    preset.start(&mut first).unwrap();
    preset.start(&mut second).unwrap();

    let a = run(&mut first, 0.1, 60.0);
    let b = run(&mut second, 0.1, 60.0);

    assert_eq!(first.outcome(), second.outcome());
    assert_eq!(first.tick_count(), second.tick_count());
    assert_eq!(first.player_health(), second.player_health());
    assert_eq!(normalized(&a), normalized(&b));
}
