#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::components::Damage;
    use crate::config::*;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::{MissionError, SpawnError};
    use crate::events::MissionEvent;
    use crate::types::{ActorId, Location, MissionClock};

    #[test]
    fn test_actor_ids_are_unique_and_increasing() {
        let a = ActorId::next();
        let b = ActorId::next();
        let c = ActorId::next();
        assert!(a < b && b < c, "ids should increase: {a} {b} {c}");
    }

    #[test]
    fn test_clock_advance() {
        let mut clock = MissionClock::default();
        for _ in 0..4 {
            clock.advance(0.25);
        }
        assert_eq!(clock.tick, 4);
        assert!((clock.elapsed_secs - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_location_look_at() {
        let mut loc = Location::at(DVec3::new(1.0, 0.0, 1.0));
        loc.look_at(DVec3::new(4.0, 0.0, 1.0));
        assert!((loc.forward - DVec3::X).length() < 1e-12);

        // Looking at its own position keeps the previous facing.
        loc.look_at(loc.position);
        assert!((loc.forward - DVec3::X).length() < 1e-12);
    }

    #[test]
    fn test_settings_defaults_from_empty_json() {
        let settings: MissionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.player_health_max, DEFAULT_PLAYER_HEALTH);

        let enemy: EnemyDef = serde_json::from_str(r#"{"health": 30}"#).unwrap();
        assert_eq!(enemy.health, 30);
        assert_eq!(enemy.speed, DEFAULT_ENEMY_SPEED);
    }

    #[test]
    fn test_wave_def_path_index_defaults_to_zero() {
        let wave: WaveDef = serde_json::from_str(
            r#"{"start_time": 2.0, "enemy_kind": "grunt", "spawn_count": 3, "spawn_interval": 0.5}"#,
        )
        .unwrap();
        assert_eq!(wave, WaveDef::new(2.0, "grunt", 3, 0.5));
        assert_eq!(wave.on_path(2).path_index, 2);
    }

    #[test]
    fn test_tower_preset_without_weapon_parses() {
        let preset: TowerPreset = serde_json::from_str(r#"{"name": "husk"}"#).unwrap();
        assert!(preset.weapon.is_none());
        assert_eq!(preset.init_duration, DEFAULT_TOWER_INIT_DURATION);
    }

    #[test]
    fn test_projectile_settings_from_weapon() {
        let weapon = TowerWeaponAttributes {
            damage: 7,
            projectile_speed: 30.0,
            projectile_lifetime: 2.0,
            projectile_kind: "arrow".into(),
            ..Default::default()
        };
        let settings = weapon.projectile_settings();
        assert_eq!(settings.kind, "arrow");
        assert_eq!(settings.damage, 7);
        assert_eq!(settings.speed, 30.0);
        assert_eq!(settings.lifetime, 2.0);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = MissionEvent::ActorDied {
            id: ActorId(9),
            kind: ActorKind::Enemy,
            damage: Damage::new(-5, Some(ActorId(3)), None),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ActorDied");
        assert_eq!(json["damage"]["amount"], -5);

        let attacked = MissionEvent::TowerAttacked {
            tower: ActorId(1),
            aim_point: DVec3::new(1.0, 2.0, 3.0),
            projectile_kind: "bullet".into(),
        };
        let json = serde_json::to_value(&attacked).unwrap();
        assert_eq!(json["aim_point"], serde_json::json!([1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_error_messages() {
        let err = SpawnError::MissingComponent {
            kind: "husk".into(),
            part: "weapon",
        };
        assert_eq!(err.to_string(), "'husk' is missing required component: weapon");

        assert_eq!(MissionError::EmptyPathSet.to_string(), "mission has no paths");
    }

    #[test]
    fn test_weapon_interval_must_be_finite_and_positive() {
        assert_eq!(TowerWeaponAttributes::default().invalid_reason(), None);
        for interval in [0.0, -1.0, 1e-320, f64::NAN, f64::INFINITY] {
            let weapon = TowerWeaponAttributes {
                interval,
                ..Default::default()
            };
            assert!(
                weapon.invalid_reason().is_some(),
                "interval {interval} should be rejected"
            );
        }
        let fastest = TowerWeaponAttributes {
            interval: MIN_ATTACK_INTERVAL,
            ..Default::default()
        };
        assert_eq!(fastest.invalid_reason(), None);
    }

    #[test]
    fn test_mission_state_default_is_init() {
        assert_eq!(MissionState::default(), MissionState::Init);
        assert_eq!(TowerMode::default(), TowerMode::Init);
    }
}
