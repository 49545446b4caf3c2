#[cfg(test)]
mod tests {
    use glam::{DQuat, DVec3};

    use crate::commands::PlayerCommand;
    use crate::config::TuningConfig;
    use crate::constants::*;
    use crate::error::ConfigError;
    use crate::events::GameEvent;
    use crate::enums::{RetrievalMode, TetherOutcome};
    use crate::state::GameStateSnapshot;
    use crate::types::{clamp01, Pose, Ray, SimTime};

    // ---- Configuration ----

    #[test]
    fn test_default_config_is_valid() {
        let config = TuningConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.tether.spring_k - SPRING_K).abs() < 1e-12);
        assert!((config.tether.stop_distance - STOP_DISTANCE).abs() < 1e-12);
        assert_eq!(config.tether.rope_segments, ROPE_SEGMENTS);
        assert!((config.camera.aim_shoulder.x - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let json = r#"{ "tether": { "reel_in_rate": 0.0, "max_hook_time": 2.5 } }"#;
        let config = TuningConfig::from_json(json).unwrap();
        assert_eq!(config.tether.reel_in_rate, 0.0);
        assert_eq!(config.tether.max_hook_time, 2.5);
        // Untouched sections keep their defaults.
        assert_eq!(config.tether.spring_k, SPRING_K);
        assert_eq!(config.scan.assist_radius, AIM_ASSIST_RADIUS);
        assert_eq!(config.gather.collect_at_fraction, COLLECT_AT_FRACTION);
    }

    #[test]
    fn test_shoulder_offsets_parse_as_arrays() {
        let json = r#"{ "camera": { "aim_shoulder": [1.0, 0.2, 0.0] } }"#;
        let config = TuningConfig::from_json(json).unwrap();
        assert_eq!(config.camera.aim_shoulder, DVec3::new(1.0, 0.2, 0.0));
    }

    #[test]
    fn test_rejects_non_positive_spring() {
        let json = r#"{ "tether": { "spring_k": 0.0 } }"#;
        match TuningConfig::from_json(json) {
            Err(ConfigError::NonPositive { field, .. }) => assert_eq!(field, "tether.spring_k"),
            other => panic!("expected NonPositive, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_collect_fraction_out_of_range() {
        let mut config = TuningConfig::default();
        config.gather.collect_at_fraction = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "gather.collect_at_fraction",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_reel_rate_and_nan() {
        let mut config = TuningConfig::default();
        config.tether.reel_in_rate = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Negative { .. })));

        let mut config = TuningConfig::default();
        config.camera.blend_rate = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite { .. })));
    }

    #[test]
    fn test_rejects_single_segment_rope() {
        let mut config = TuningConfig::default();
        config.tether.rope_segments = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooFewSegments(1))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = TuningConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse tuning config"));
    }

    // ---- Types ----

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -4.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-12);
        assert!((ray.at(2.0) - DVec3::new(0.0, 0.0, -2.0)).length() < 1e-12);

        let degenerate = Ray::new(DVec3::ONE, DVec3::ZERO);
        assert_eq!(degenerate.direction, DVec3::NEG_Z);
    }

    #[test]
    fn test_pose_compose_applies_parent_rotation() {
        let parent = Pose {
            position: DVec3::new(1.0, 0.0, 0.0),
            rotation: DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2),
        };
        let child = Pose::from_position(DVec3::new(0.0, 0.0, -1.0));
        let world = parent.compose(&child);
        // -Z rotated +90° about Y points along -X.
        assert!((world.position - DVec3::new(0.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..250 {
            time.advance(DT);
        }
        assert_eq!(time.tick, 250);
        assert!((time.elapsed_secs - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.9), 0.9);
        assert_eq!(clamp01(3.0), 1.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
    }

    // ---- Wire shapes ----

    /// Commands use an internally tagged representation for the input layer.
    #[test]
    fn test_command_tagging() {
        let json = serde_json::to_string(&PlayerCommand::SetAiming { aiming: true }).unwrap();
        assert_eq!(json, r#"{"type":"SetAiming","aiming":true}"#);

        let back: PlayerCommand = serde_json::from_str(r#"{"type":"FireReel"}"#).unwrap();
        assert_eq!(back, PlayerCommand::FireReel);
    }

    #[test]
    fn test_event_tagging() {
        let event = GameEvent::Collected {
            target: 7,
            item: "abalone".into(),
            amount: 1,
            mode: RetrievalMode::Reel,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "Collected");
        assert_eq!(value["mode"], "Reel");

        let resolved = GameEvent::ReelResolved {
            target: 7,
            outcome: TetherOutcome::TimedOut,
        };
        let value = serde_json::to_value(&resolved).unwrap();
        assert_eq!(value["outcome"], "TimedOut");
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"reel\""));
        assert!(json.contains("\"gather\""));
    }
}
